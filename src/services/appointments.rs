use std::collections::HashMap;

use crate::domain::appointment::{Appointment, AppointmentUpdate};
use crate::domain::types::{AppointmentId, AppointmentStatus};
use crate::dto::appointments::{AppointmentDto, AvailableSlotsDto};
use crate::forms::appointments::{AvailableSlotsPayload, CreateAppointmentPayload};
use crate::models::config::SchedulingConfig;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, BookingTransaction,
    RepositoryError, ServiceListQuery, ServiceReader, WorkingHourReader,
};
use crate::services::scheduling::{self, BookingOutcome, BookingRejection};

use super::{ServiceError, ServiceResult};

/// Book a new appointment.
///
/// Validation and the insert happen inside one booking transaction, so two
/// requests for the same slot cannot both succeed. A unique-index violation
/// raised by storage is reported as [`BookingRejection::SlotTaken`].
pub fn create_appointment<R>(
    payload: CreateAppointmentPayload,
    config: &SchedulingConfig,
    repo: &R,
) -> ServiceResult<BookingOutcome<AppointmentDto>>
where
    R: BookingTransaction,
{
    let now = config.now();
    let service_id = payload.service_id;
    let date = payload.appointment_date;
    let time = payload.appointment_time;
    let new_appointment = payload.into_new_appointment(now);

    let result = repo.booking_transaction(|store| {
        if let Err(rejection) = scheduling::can_book(store, service_id, date, time, now)? {
            return Ok(Err(rejection));
        }
        let created = store.create_appointment(&new_appointment)?;
        let service = store.get_service_by_id(created.service_id)?;
        Ok(Ok(AppointmentDto::new(created, service.as_ref())))
    });

    match result {
        Ok(Ok(appointment)) => {
            log::info!(
                "Booked appointment {} for service {} at {} {}",
                appointment.id,
                service_id,
                date,
                time
            );
            Ok(Ok(appointment))
        }
        Ok(Err(rejection)) => {
            log::info!("Rejected booking for service {service_id} at {date} {time}: {rejection}");
            Ok(Err(rejection))
        }
        Err(RepositoryError::ConstraintViolation(e)) => {
            log::warn!("Concurrent booking for service {service_id} at {date} {time}: {e}");
            Ok(Err(BookingRejection::SlotTaken))
        }
        Err(e) => {
            log::error!("Failed to create appointment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_appointments<R>(
    query: AppointmentListQuery,
    repo: &R,
) -> ServiceResult<Vec<AppointmentDto>>
where
    R: AppointmentReader + ServiceReader,
{
    let appointments = repo.list_appointments(query).map_err(|e| {
        log::error!("Failed to list appointments: {e}");
        ServiceError::Internal
    })?;

    let services: HashMap<_, _> = repo
        .list_services(ServiceListQuery::default())
        .map_err(|e| {
            log::error!("Failed to list services: {e}");
            ServiceError::Internal
        })?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    Ok(appointments
        .into_iter()
        .map(|a| {
            let service = services.get(&a.service_id);
            AppointmentDto::new(a, service)
        })
        .collect())
}

pub fn get_appointment<R>(id: AppointmentId, repo: &R) -> ServiceResult<AppointmentDto>
where
    R: AppointmentReader + ServiceReader,
{
    let appointment = match repo.get_appointment_by_id(id) {
        Ok(Some(appointment)) => appointment,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get appointment: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let service = repo.get_service_by_id(appointment.service_id).map_err(|e| {
        log::error!("Failed to get service: {e}");
        ServiceError::Internal
    })?;

    Ok(AppointmentDto::new(appointment, service.as_ref()))
}

/// Edit customer details, service or schedule of an appointment.
///
/// A changed service must exist and be active. When the service, date or
/// time changes, the new slot is checked for conflicts with every other live
/// booking inside a booking transaction.
pub fn update_appointment<R>(
    id: AppointmentId,
    update: AppointmentUpdate,
    repo: &R,
) -> ServiceResult<BookingOutcome<AppointmentDto>>
where
    R: BookingTransaction,
{
    let result = repo.booking_transaction(|store| {
        let Some(current) = store.get_appointment_by_id(id)? else {
            return Ok(Err(ServiceError::NotFound));
        };

        if let Some(service_id) = update.service_id {
            match store.get_service_by_id(service_id)? {
                Some(service) if service.is_active => {}
                _ => return Ok(Err(ServiceError::Form("Service not available".to_string()))),
            }
        }

        let moves_slot = update.reschedules() || update.service_id.is_some();
        if moves_slot && current.status.occupies_slot() {
            let service_id = update.service_id.unwrap_or(current.service_id);
            let date = update.appointment_date.unwrap_or(current.appointment_date);
            let time = update.appointment_time.unwrap_or(current.appointment_time);
            if scheduling::check_conflict(store, service_id, date, time, Some(id))?.is_some() {
                return Ok(Ok(Err(BookingRejection::SlotTaken)));
            }
        }

        store.update_appointment(id, &update)?;

        let Some(updated) = store.get_appointment_by_id(id)? else {
            return Ok(Err(ServiceError::NotFound));
        };
        let service = store.get_service_by_id(updated.service_id)?;
        Ok(Ok(Ok(AppointmentDto::new(updated, service.as_ref()))))
    });

    match result {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(err)) => Err(err),
        Err(RepositoryError::ConstraintViolation(e)) => {
            log::warn!("Concurrent reschedule of appointment {id}: {e}");
            Ok(Err(BookingRejection::SlotTaken))
        }
        Err(e) => {
            log::error!("Failed to update appointment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Move an appointment to `status`.
///
/// Reviving a cancelled appointment re-checks its slot, since another
/// booking may have taken it in the meantime.
pub fn update_status<R>(
    id: AppointmentId,
    status: AppointmentStatus,
    repo: &R,
) -> ServiceResult<BookingOutcome<AppointmentDto>>
where
    R: BookingTransaction,
{
    let result = repo.booking_transaction(|store| {
        let Some(current) = store.get_appointment_by_id(id)? else {
            return Ok(None);
        };

        if !current.status.occupies_slot()
            && status.occupies_slot()
            && scheduling::check_conflict(
                store,
                current.service_id,
                current.appointment_date,
                current.appointment_time,
                Some(id),
            )?
            .is_some()
        {
            return Ok(Some(Err(BookingRejection::SlotTaken)));
        }

        store.update_appointment_status(id, status)?;
        let service = store.get_service_by_id(current.service_id)?;
        let updated = Appointment { status, ..current };
        Ok(Some(Ok(AppointmentDto::new(updated, service.as_ref()))))
    });

    match result {
        Ok(Some(outcome)) => Ok(outcome),
        Ok(None) => Err(ServiceError::NotFound),
        Err(RepositoryError::ConstraintViolation(e)) => {
            log::warn!("Status change of appointment {id} collides with a live booking: {e}");
            Ok(Err(BookingRejection::SlotTaken))
        }
        Err(e) => {
            log::error!("Failed to update appointment status: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_appointment<R>(id: AppointmentId, repo: &R) -> ServiceResult<()>
where
    R: AppointmentWriter,
{
    match repo.delete_appointment(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete appointment: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Free `HH:MM` start times for the requested service and date.
pub fn available_slots<R>(
    payload: AvailableSlotsPayload,
    config: &SchedulingConfig,
    repo: &R,
) -> ServiceResult<AvailableSlotsDto>
where
    R: ServiceReader + WorkingHourReader + AppointmentReader,
{
    match scheduling::available_slots(repo, config, payload.date, payload.service_id) {
        Ok(slots) => Ok(AvailableSlotsDto::new(
            payload.date,
            payload.service_id,
            slots.into_iter().map(scheduling::format_slot).collect(),
        )),
        Err(e) => {
            log::error!("Failed to compute available slots: {e}");
            Err(ServiceError::Internal)
        }
    }
}
