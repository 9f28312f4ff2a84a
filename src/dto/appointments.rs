use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::appointment::Appointment;
use crate::domain::service::Service;
use crate::domain::types::{AppointmentStatus, BookingSource, ServiceId};

/// Appointment enriched with the booked service's catalog details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentDto {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_id: i32,
    pub service_name: Option<String>,
    pub service_duration: Option<i32>,
    pub service_price: Option<f64>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub created_by: BookingSource,
    pub created_at: String,
}

impl AppointmentDto {
    pub fn new(appointment: Appointment, service: Option<&Service>) -> Self {
        Self {
            id: appointment.id.get(),
            customer_name: appointment.customer_name.into_inner(),
            customer_phone: appointment.customer_phone.into_inner(),
            service_id: appointment.service_id.get(),
            service_name: service.map(|s| s.name.as_str().to_string()),
            service_duration: service.map(|s| s.duration_minutes.get()),
            service_price: service.map(|s| s.price.get()),
            appointment_date: appointment.appointment_date.to_string(),
            appointment_time: appointment.appointment_time.to_string(),
            status: appointment.status,
            created_by: appointment.created_by,
            created_at: appointment
                .created_at
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
        }
    }
}

/// Free start times for one service on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableSlotsDto {
    pub date: String,
    pub service_id: i32,
    pub available_slots: Vec<String>,
}

impl AvailableSlotsDto {
    pub fn new(date: NaiveDate, service_id: ServiceId, available_slots: Vec<String>) -> Self {
        Self {
            date: date.to_string(),
            service_id: service_id.get(),
            available_slots,
        }
    }
}
