use crate::domain::types::{WorkingHourId, weekday_name};
use crate::domain::working_hour::WorkingHourUpdate;
use crate::dto::working_hours::WorkingHourDto;
use crate::repository::{WorkingHourReader, WorkingHourWriter};

use super::{ServiceError, ServiceResult};

/// The weekly schedule, Monday first.
pub fn list_working_hours<R>(repo: &R) -> ServiceResult<Vec<WorkingHourDto>>
where
    R: WorkingHourReader,
{
    match repo.list_working_hours() {
        Ok(week) => Ok(week.into_iter().map(WorkingHourDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list working hours: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_working_hour<R>(id: WorkingHourId, repo: &R) -> ServiceResult<WorkingHourDto>
where
    R: WorkingHourReader,
{
    match repo.get_working_hour_by_id(id) {
        Ok(Some(hours)) => Ok(hours.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get working hours: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Change the opening window of one weekday.
///
/// The merged record must still open before it closes unless the day is
/// marked closed.
pub fn update_working_hour<R>(
    id: WorkingHourId,
    update: WorkingHourUpdate,
    repo: &R,
) -> ServiceResult<WorkingHourDto>
where
    R: WorkingHourReader + WorkingHourWriter,
{
    let current = match repo.get_working_hour_by_id(id) {
        Ok(Some(hours)) => hours,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get working hours: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let updated = update.apply(&current)?;

    match repo.update_working_hour(&updated) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Updated working hours for {}", weekday_name(updated.day_of_week));
            Ok(updated.into())
        }
        Err(e) => {
            log::error!("Failed to update working hours: {e}");
            Err(ServiceError::Internal)
        }
    }
}
