//! Appointment scheduling rules.
//!
//! Everything here is a pure read over the repository traits: conflict
//! detection between bookings of one service, validation against the weekly
//! working hours, enumeration of free start times and the composite
//! [`can_book`] gate. Business outcomes are returned as values
//! ([`BookingRejection`]); only data access failures travel through `Err`.

use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::domain::appointment::{Appointment, TimeInterval};
use crate::domain::types::{AppointmentId, DurationMinutes, ServiceId, weekday_name};
use crate::domain::working_hour::WorkingHour;
use crate::models::config::SchedulingConfig;
use crate::repository::{AppointmentReader, RepositoryResult, ServiceReader, WorkingHourReader};

/// Message reported when every booking check passes.
pub const AVAILABLE: &str = "Available";

/// Reason a booking request was refused.
///
/// `Display` renders the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    ServiceNotFound,
    ServiceInactive,
    NoWorkingHours(Weekday),
    Closed(Weekday),
    /// Carries the configured opening time.
    BeforeOpening(NaiveTime),
    /// Carries the configured closing time.
    AfterClosing(NaiveTime),
    SlotTaken,
    InPast,
}

impl Display for BookingRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ServiceNotFound => write!(f, "Service not found"),
            Self::ServiceInactive => write!(f, "Service is not available"),
            Self::NoWorkingHours(day) => {
                write!(f, "No working hours set for {}", weekday_name(*day))
            }
            Self::Closed(day) => write!(f, "Salon is closed on {}", weekday_name(*day)),
            Self::BeforeOpening(open) => {
                write!(f, "Appointment time is before opening time ({open})")
            }
            Self::AfterClosing(close) => {
                write!(f, "Appointment would end after closing time ({close})")
            }
            Self::SlotTaken => write!(f, "Time slot is already booked"),
            Self::InPast => write!(f, "Cannot book appointments in the past"),
        }
    }
}

/// Outcome of a booking-related operation that may be refused by policy.
pub type BookingOutcome<T> = Result<T, BookingRejection>;

/// User-facing message for a booking decision: [`AVAILABLE`] or the reason
/// it was refused.
pub fn describe(outcome: &BookingOutcome<()>) -> String {
    match outcome {
        Ok(()) => AVAILABLE.to_string(),
        Err(rejection) => rejection.to_string(),
    }
}

/// Find an existing booking that overlaps `[time, time + duration)` for the
/// service on `date`.
///
/// Cancelled appointments and `exclude` are ignored. Returns `None` when the
/// service does not exist. When several bookings overlap, any one of them may
/// be returned: existence is the contract, not identity.
pub fn check_conflict<R>(
    repo: &R,
    service_id: ServiceId,
    date: NaiveDate,
    time: NaiveTime,
    exclude: Option<AppointmentId>,
) -> RepositoryResult<Option<Appointment>>
where
    R: ServiceReader + AppointmentReader + ?Sized,
{
    let Some(service) = repo.get_service_by_id(service_id)? else {
        return Ok(None);
    };

    let candidate = TimeInterval::starting_at(date, time, service.duration_minutes);
    // The comparison set is scoped to one service, so every existing booking
    // shares the candidate's duration.
    let conflict = repo
        .list_active_appointments(service_id, date, exclude)?
        .into_iter()
        .find(|existing| existing.interval(service.duration_minutes).overlaps(&candidate));

    Ok(conflict)
}

/// First pair of live bookings that would overlap if each lasted `duration`.
///
/// Used before lengthening a service. All bookings of one service share its
/// duration, so checking neighbours in start order is enough.
pub fn find_overlap(
    appointments: &[Appointment],
    duration: DurationMinutes,
) -> Option<(&Appointment, &Appointment)> {
    let mut live: Vec<&Appointment> = appointments
        .iter()
        .filter(|appointment| appointment.status.occupies_slot())
        .collect();
    live.sort_by_key(|appointment| (appointment.appointment_date, appointment.appointment_time));

    live.windows(2).find_map(|pair| {
        let (earlier, later) = (pair[0], pair[1]);
        earlier
            .interval(duration)
            .overlaps(&later.interval(duration))
            .then_some((earlier, later))
    })
}

/// Check that a booking of `duration` starting at `time` fits inside the
/// working hours configured for the weekday of `date`.
pub fn is_within_working_hours<R>(
    repo: &R,
    date: NaiveDate,
    time: NaiveTime,
    duration: DurationMinutes,
) -> RepositoryResult<BookingOutcome<()>>
where
    R: WorkingHourReader + ?Sized,
{
    let day = date.weekday();
    let Some(hours) = repo.get_working_hours_for_day(day)? else {
        return Ok(Err(BookingRejection::NoWorkingHours(day)));
    };

    Ok(fits_opening_window(&hours, date, time, duration))
}

fn fits_opening_window(
    hours: &WorkingHour,
    date: NaiveDate,
    time: NaiveTime,
    duration: DurationMinutes,
) -> BookingOutcome<()> {
    if hours.is_closed {
        return Err(BookingRejection::Closed(hours.day_of_week));
    }

    let candidate = TimeInterval::starting_at(date, time, duration);
    if candidate.start < date.and_time(hours.open_time) {
        return Err(BookingRejection::BeforeOpening(hours.open_time));
    }
    if candidate.end > date.and_time(hours.close_time) {
        return Err(BookingRejection::AfterClosing(hours.close_time));
    }

    Ok(())
}

/// Free start times for `service_id` on `date`, in ascending order.
///
/// Candidates begin at the opening time and advance by the configured slot
/// granularity while the whole service still fits before closing. A
/// candidate is kept when it overlaps no live booking. Missing service,
/// missing working hours and closed days all yield an empty list. Nothing is
/// cached; each call reflects the current bookings.
pub fn available_slots<R>(
    repo: &R,
    config: &SchedulingConfig,
    date: NaiveDate,
    service_id: ServiceId,
) -> RepositoryResult<Vec<NaiveTime>>
where
    R: ServiceReader + WorkingHourReader + AppointmentReader + ?Sized,
{
    let Some(service) = repo.get_service_by_id(service_id)? else {
        return Ok(Vec::new());
    };
    let hours = match repo.get_working_hours_for_day(date.weekday())? {
        Some(hours) if !hours.is_closed => hours,
        _ => return Ok(Vec::new()),
    };

    let duration = service.duration_minutes;
    let booked: Vec<TimeInterval> = repo
        .list_active_appointments(service_id, date, None)?
        .iter()
        .map(|appointment| appointment.interval(duration))
        .collect();

    let close = date.and_time(hours.close_time);
    let step = config.slot_step();
    let mut slots = Vec::new();
    let mut start = date.and_time(hours.open_time);

    loop {
        let candidate = TimeInterval::starting_at(start.date(), start.time(), duration);
        if candidate.end > close {
            break;
        }
        if !booked.iter().any(|b| b.overlaps(&candidate)) {
            slots.push(start.time());
        }
        match start.checked_add_signed(step) {
            Some(next) => start = next,
            None => break,
        }
    }

    log::debug!(
        "Computed {} free slots for service {} on {}",
        slots.len(),
        service_id,
        date
    );

    Ok(slots)
}

/// Zero-padded 24-hour `HH:MM` rendering of a slot.
pub fn format_slot(slot: NaiveTime) -> String {
    slot.format("%H:%M").to_string()
}

/// Decide whether a new booking may be made.
///
/// Checks run in a fixed order and the first failure wins: the service must
/// exist, be active, fit the working hours, not collide with a live booking
/// and not start before `now`.
pub fn can_book<R>(
    repo: &R,
    service_id: ServiceId,
    date: NaiveDate,
    time: NaiveTime,
    now: NaiveDateTime,
) -> RepositoryResult<BookingOutcome<()>>
where
    R: ServiceReader + WorkingHourReader + AppointmentReader + ?Sized,
{
    let Some(service) = repo.get_service_by_id(service_id)? else {
        return Ok(Err(BookingRejection::ServiceNotFound));
    };
    if !service.is_active {
        return Ok(Err(BookingRejection::ServiceInactive));
    }

    if let Err(rejection) = is_within_working_hours(repo, date, time, service.duration_minutes)? {
        return Ok(Err(rejection));
    }

    if check_conflict(repo, service_id, date, time, None)?.is_some() {
        return Ok(Err(BookingRejection::SlotTaken));
    }

    if date.and_time(time) < now {
        return Ok(Err(BookingRejection::InPast));
    }

    Ok(Ok(()))
}
