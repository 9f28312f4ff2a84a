//! Domain entities and value objects, independent of persistence.

pub mod appointment;
pub mod service;
pub mod types;
pub mod working_hour;
