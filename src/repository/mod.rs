use std::cell::RefCell;

use chrono::{NaiveDate, Weekday};
use diesel::sqlite::SqliteConnection;

use crate::db::{DbConnection, DbPool};
use crate::domain::appointment::{Appointment, AppointmentUpdate, NewAppointment};
use crate::domain::service::{NewService, Service, ServiceUpdate};
use crate::domain::types::{AppointmentId, AppointmentStatus, ServiceId, WorkingHourId};
use crate::domain::working_hour::WorkingHour;

pub use errors::{RepositoryError, RepositoryResult};

pub mod appointment;
pub mod errors;
pub mod service;
#[cfg(test)]
pub mod test;
pub mod working_hour;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut conn = self.conn()?;
        f(&mut conn)
    }
}

/// Repository view bound to a single open write transaction.
///
/// Handed to [`BookingTransaction::booking_transaction`] callbacks so that
/// reads and the final insert share one connection and one lock.
pub struct SqliteTransaction<'c> {
    conn: RefCell<&'c mut SqliteConnection>,
}

impl<'c> SqliteTransaction<'c> {
    fn new(conn: &'c mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut conn = self.conn.borrow_mut();
        f(&mut **conn)
    }
}

/// Query parameters used when listing services.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceListQuery {
    /// Restrict to services that accept bookings.
    pub active_only: bool,
}

impl ServiceListQuery {
    pub fn active() -> Self {
        Self { active_only: true }
    }
}

/// Query parameters used when listing appointments.
#[derive(Debug, Clone, Default)]
pub struct AppointmentListQuery {
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    pub service_id: Option<ServiceId>,
}

impl AppointmentListQuery {
    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
    pub fn service(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }
}

/// Read-only operations for the service catalog.
pub trait ServiceReader {
    /// Retrieve a service by its identifier, active or not.
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    /// List services ordered by identifier.
    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<Vec<Service>>;
}

/// Write operations for the service catalog.
pub trait ServiceWriter {
    /// Persist a new, active service.
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service>;
    /// Apply a partial update.
    fn update_service(&self, id: ServiceId, update: &ServiceUpdate) -> RepositoryResult<usize>;
}

/// Read-only operations for weekly working hours.
pub trait WorkingHourReader {
    /// Working hours configured for `day`, if any.
    fn get_working_hours_for_day(&self, day: Weekday) -> RepositoryResult<Option<WorkingHour>>;
    fn get_working_hour_by_id(&self, id: WorkingHourId) -> RepositoryResult<Option<WorkingHour>>;
    /// All configured days, Monday first.
    fn list_working_hours(&self) -> RepositoryResult<Vec<WorkingHour>>;
}

/// Write operations for weekly working hours.
pub trait WorkingHourWriter {
    /// Overwrite open/close times and the closed flag of an existing record.
    fn update_working_hour(&self, hours: &WorkingHour) -> RepositoryResult<usize>;
}

/// Read-only operations for appointments.
pub trait AppointmentReader {
    /// Appointments for `service_id` on `date` that still occupy their slot,
    /// optionally leaving out one appointment.
    fn list_active_appointments(
        &self,
        service_id: ServiceId,
        date: NaiveDate,
        exclude: Option<AppointmentId>,
    ) -> RepositoryResult<Vec<Appointment>>;
    /// List appointments matching the query, ordered by date then time.
    fn list_appointments(&self, query: AppointmentListQuery)
    -> RepositoryResult<Vec<Appointment>>;
    fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>>;
}

/// Write operations for appointments.
pub trait AppointmentWriter {
    /// Persist a new `pending` appointment and return it.
    fn create_appointment(&self, appointment: &NewAppointment) -> RepositoryResult<Appointment>;
    fn update_appointment(
        &self,
        id: AppointmentId,
        update: &AppointmentUpdate,
    ) -> RepositoryResult<usize>;
    fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> RepositoryResult<usize>;
    fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<usize>;
}

/// Everything a booking decision reads plus the writes it guards.
pub trait BookingStore:
    ServiceReader + ServiceWriter + WorkingHourReader + AppointmentReader + AppointmentWriter
{
}

impl<T> BookingStore for T where
    T: ServiceReader + ServiceWriter + WorkingHourReader + AppointmentReader + AppointmentWriter
{
}

/// Serialized execution of validate-then-write booking steps.
pub trait BookingTransaction {
    /// Run `f` while holding exclusive write access to appointments and
    /// service durations.
    ///
    /// No other booking transaction can interleave between the reads `f`
    /// performs and the writes it makes. An `Err` returned by `f` rolls back.
    fn booking_transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&dyn BookingStore) -> RepositoryResult<T>;
}

impl BookingTransaction for DieselRepository {
    fn booking_transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&dyn BookingStore) -> RepositoryResult<T>,
    {
        let mut conn = self.conn()?;
        // BEGIN IMMEDIATE takes the database write lock up front, so the
        // conflict check and the insert see the same snapshot.
        conn.immediate_transaction(|conn| {
            let store = SqliteTransaction::new(conn);
            f(&store)
        })
    }
}
