//! Diesel row models and their conversions to domain entities.

pub mod appointment;
pub mod config;
pub mod service;
pub mod working_hour;
