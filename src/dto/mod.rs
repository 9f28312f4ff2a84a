//! JSON response shapes.

pub mod appointments;
pub mod services;
pub mod working_hours;
