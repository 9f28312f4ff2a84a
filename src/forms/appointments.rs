use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::appointment::{AppointmentUpdate, NewAppointment};
use crate::domain::types::{
    AppointmentStatus, BookingSource, CustomerName, CustomerPhone, ServiceId, TypeConstraintError,
};
use crate::forms::{parse_date, parse_time};
use crate::repository::AppointmentListQuery;

#[derive(Deserialize, Validate)]
pub struct CreateAppointmentForm {
    #[validate(length(min = 2))]
    pub customer_name: String,
    #[validate(length(min = 1))]
    pub customer_phone: String,
    #[validate(range(min = 1))]
    pub service_id: i32,
    pub appointment_date: String,
    pub appointment_time: String,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAppointmentPayload {
    pub customer_name: CustomerName,
    pub customer_phone: CustomerPhone,
    pub service_id: ServiceId,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub created_by: BookingSource,
}

impl CreateAppointmentPayload {
    pub fn into_new_appointment(self, created_at: NaiveDateTime) -> NewAppointment {
        NewAppointment {
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            service_id: self.service_id,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            created_by: self.created_by,
            created_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateAppointmentFormError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Validation failed: {0}")]
    TypeConstraint(String),
    #[error("appointment_date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("appointment_time must be in HH:MM format")]
    InvalidTime,
}

impl From<ValidationErrors> for CreateAppointmentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateAppointmentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateAppointmentForm> for CreateAppointmentPayload {
    type Error = CreateAppointmentFormError;

    fn try_from(value: CreateAppointmentForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let appointment_date =
            parse_date(&value.appointment_date).ok_or(CreateAppointmentFormError::InvalidDate)?;
        let appointment_time =
            parse_time(&value.appointment_time).ok_or(CreateAppointmentFormError::InvalidTime)?;
        let created_by = match value.created_by.as_deref() {
            Some(source) => BookingSource::try_from(source)?,
            None => BookingSource::default(),
        };

        Ok(Self {
            customer_name: CustomerName::new(value.customer_name)?,
            customer_phone: CustomerPhone::new(value.customer_phone)?,
            service_id: ServiceId::new(value.service_id)?,
            appointment_date,
            appointment_time,
            created_by,
        })
    }
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateAppointmentForm {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    #[validate(range(min = 1))]
    pub service_id: Option<i32>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
}

#[derive(Debug, Error)]
pub enum UpdateAppointmentFormError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Validation failed: {0}")]
    TypeConstraint(String),
    #[error("appointment_date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("appointment_time must be in HH:MM format")]
    InvalidTime,
}

impl From<ValidationErrors> for UpdateAppointmentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateAppointmentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateAppointmentForm> for AppointmentUpdate {
    type Error = UpdateAppointmentFormError;

    fn try_from(value: UpdateAppointmentForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let appointment_date = value
            .appointment_date
            .map(|d| parse_date(&d).ok_or(UpdateAppointmentFormError::InvalidDate))
            .transpose()?;
        let appointment_time = value
            .appointment_time
            .map(|t| parse_time(&t).ok_or(UpdateAppointmentFormError::InvalidTime))
            .transpose()?;

        Ok(Self {
            customer_name: value.customer_name.map(CustomerName::new).transpose()?,
            customer_phone: value.customer_phone.map(CustomerPhone::new).transpose()?,
            service_id: value.service_id.map(ServiceId::new).transpose()?,
            appointment_date,
            appointment_time,
        })
    }
}

#[derive(Deserialize)]
pub struct UpdateStatusForm {
    pub status: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateStatusFormError {
    #[error("Status is required")]
    Missing,
    #[error("Invalid status. Must be: pending, confirmed, completed, or cancelled")]
    Invalid,
}

impl TryFrom<UpdateStatusForm> for AppointmentStatus {
    type Error = UpdateStatusFormError;

    fn try_from(value: UpdateStatusForm) -> Result<Self, Self::Error> {
        match value.status.as_deref().map(str::trim) {
            None | Some("") => Err(UpdateStatusFormError::Missing),
            Some(status) => {
                AppointmentStatus::try_from(status).map_err(|_| UpdateStatusFormError::Invalid)
            }
        }
    }
}

/// Query string of the available-slots endpoint.
#[derive(Deserialize, Default)]
pub struct AvailableSlotsForm {
    pub date: Option<String>,
    pub service_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableSlotsPayload {
    pub date: NaiveDate,
    pub service_id: ServiceId,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AvailableSlotsFormError {
    #[error("Date parameter is required (YYYY-MM-DD)")]
    MissingDate,
    #[error("service_id parameter is required")]
    MissingServiceId,
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate,
}

impl TryFrom<AvailableSlotsForm> for AvailableSlotsPayload {
    type Error = AvailableSlotsFormError;

    fn try_from(value: AvailableSlotsForm) -> Result<Self, Self::Error> {
        let date = value
            .date
            .filter(|d| !d.trim().is_empty())
            .ok_or(AvailableSlotsFormError::MissingDate)?;
        let service_id = value
            .service_id
            .and_then(|id| ServiceId::new(id).ok())
            .ok_or(AvailableSlotsFormError::MissingServiceId)?;
        let date = parse_date(&date).ok_or(AvailableSlotsFormError::InvalidDate)?;

        Ok(Self { date, service_id })
    }
}

/// Optional filters of the appointment listing.
#[derive(Deserialize, Default)]
pub struct AppointmentListForm {
    pub status: Option<String>,
    pub date: Option<String>,
    pub service_id: Option<i32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppointmentListFormError {
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate,
    #[error("Invalid status. Must be: pending, confirmed, completed, or cancelled")]
    InvalidStatus,
}

impl TryFrom<AppointmentListForm> for AppointmentListQuery {
    type Error = AppointmentListFormError;

    fn try_from(value: AppointmentListForm) -> Result<Self, Self::Error> {
        let mut query = AppointmentListQuery::default();
        if let Some(status) = value.status.filter(|s| !s.trim().is_empty()) {
            let status = AppointmentStatus::try_from(status)
                .map_err(|_| AppointmentListFormError::InvalidStatus)?;
            query = query.status(status);
        }
        if let Some(date) = value.date.filter(|d| !d.trim().is_empty()) {
            query = query.date(parse_date(&date).ok_or(AppointmentListFormError::InvalidDate)?);
        }
        if let Some(service_id) = value.service_id.and_then(|id| ServiceId::new(id).ok()) {
            query = query.service(service_id);
        }
        Ok(query)
    }
}
