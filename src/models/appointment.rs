use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use crate::domain::appointment::{
    Appointment as DomainAppointment, AppointmentUpdate as DomainAppointmentUpdate,
    NewAppointment as DomainNewAppointment,
};
use crate::domain::types::{
    AppointmentStatus, BookingSource, CustomerName, CustomerPhone, TypeConstraintError,
};

/// Diesel model representing the `appointments` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct Appointment {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Appointment`]; new rows always start as `pending`.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct NewAppointment {
    pub customer_name: String,
    pub customer_phone: String,
    pub service_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::appointments)]
pub struct AppointmentChangeset {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub service_id: Option<i32>,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
}

impl TryFrom<Appointment> for DomainAppointment {
    type Error = TypeConstraintError;

    fn try_from(row: Appointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            customer_name: CustomerName::new(row.customer_name)?,
            customer_phone: CustomerPhone::new(row.customer_phone)?,
            service_id: row.service_id.try_into()?,
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            status: AppointmentStatus::try_from(row.status)?,
            created_by: BookingSource::try_from(row.created_by)?,
            created_at: row.created_at,
        })
    }
}

impl From<DomainNewAppointment> for NewAppointment {
    fn from(appointment: DomainNewAppointment) -> Self {
        Self {
            customer_name: appointment.customer_name.into_inner(),
            customer_phone: appointment.customer_phone.into_inner(),
            service_id: appointment.service_id.get(),
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            status: AppointmentStatus::Pending.as_str().to_string(),
            created_by: appointment.created_by.as_str().to_string(),
            created_at: appointment.created_at,
        }
    }
}

impl From<DomainAppointmentUpdate> for AppointmentChangeset {
    fn from(update: DomainAppointmentUpdate) -> Self {
        Self {
            customer_name: update.customer_name.map(CustomerName::into_inner),
            customer_phone: update.customer_phone.map(CustomerPhone::into_inner),
            service_id: update.service_id.map(i32::from),
            appointment_date: update.appointment_date,
            appointment_time: update.appointment_time,
        }
    }
}
