pub use errors::{ServiceError, ServiceResult};

pub mod appointments;
pub mod catalog;
pub mod errors;
pub mod scheduling;
pub mod working_hours;
