use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AppointmentId, AppointmentStatus, BookingSource, CustomerName, CustomerPhone, DurationMinutes,
    ServiceId,
};

/// A booking of one service at a specific date and time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer_name: CustomerName,
    pub customer_phone: CustomerPhone,
    pub service_id: ServiceId,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_by: BookingSource,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    /// Interval occupied by the appointment for a service of `duration`.
    pub fn interval(&self, duration: DurationMinutes) -> TimeInterval {
        TimeInterval::starting_at(self.appointment_date, self.appointment_time, duration)
    }
}

/// Data required to insert a new [`Appointment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub customer_name: CustomerName,
    pub customer_phone: CustomerPhone,
    pub service_id: ServiceId,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub created_by: BookingSource,
    pub created_at: NaiveDateTime,
}

/// Partial update of an existing [`Appointment`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentUpdate {
    pub customer_name: Option<CustomerName>,
    pub customer_phone: Option<CustomerPhone>,
    pub service_id: Option<ServiceId>,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
}

impl AppointmentUpdate {
    /// Whether the update moves the appointment in time.
    pub fn reschedules(&self) -> bool {
        self.appointment_date.is_some() || self.appointment_time.is_some()
    }
}

/// Half-open span `[start, end)` on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// The end saturates at [`NaiveDateTime::MAX`] instead of overflowing.
    pub fn starting_at(date: NaiveDate, time: NaiveTime, duration: DurationMinutes) -> Self {
        let start = date.and_time(time);
        let end = start
            .checked_add_signed(duration.as_duration())
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    /// Intervals that merely touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }
}
