use crate::domain::service::{NewService, ServiceUpdate};
use crate::domain::types::ServiceId;
use crate::dto::services::ServiceDto;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, BookingTransaction, ServiceListQuery, ServiceReader,
    ServiceWriter,
};
use crate::services::scheduling;

use super::{ServiceError, ServiceResult};

pub fn list_active_services<R>(repo: &R) -> ServiceResult<Vec<ServiceDto>>
where
    R: ServiceReader,
{
    match repo.list_services(ServiceListQuery::active()) {
        Ok(services) => Ok(services.into_iter().map(ServiceDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list services: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch one bookable service. Deactivated services are reported as missing.
pub fn get_service<R>(id: ServiceId, repo: &R) -> ServiceResult<ServiceDto>
where
    R: ServiceReader,
{
    match repo.get_service_by_id(id) {
        Ok(Some(service)) if service.is_active => Ok(service.into()),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get service: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_service<R>(service: NewService, repo: &R) -> ServiceResult<ServiceDto>
where
    R: ServiceWriter,
{
    match repo.create_service(&service) {
        Ok(created) => {
            log::info!("Added service {} ({})", created.id, created.name);
            Ok(created.into())
        }
        Err(e) => {
            log::error!("Failed to create service: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Apply a partial update to a service.
///
/// Lengthening a service stretches every booking it already has, so the
/// update is refused when two live bookings would then overlap. The check
/// and the write share one booking transaction.
pub fn update_service<R>(id: ServiceId, update: ServiceUpdate, repo: &R) -> ServiceResult<ServiceDto>
where
    R: BookingTransaction,
{
    let result = repo.booking_transaction(|store| {
        let Some(current) = store.get_service_by_id(id)? else {
            return Ok(Err(ServiceError::NotFound));
        };

        if let Some(duration) = update
            .duration_minutes
            .filter(|duration| *duration > current.duration_minutes)
        {
            let booked = store.list_appointments(AppointmentListQuery::default().service(id))?;
            if let Some((earlier, later)) = scheduling::find_overlap(&booked, duration) {
                return Ok(Err(ServiceError::Form(format!(
                    "Appointments {} and {} would overlap with a {duration}-minute duration",
                    earlier.id, later.id
                ))));
            }
        }

        store.update_service(id, &update)?;
        Ok(store.get_service_by_id(id)?.ok_or(ServiceError::NotFound))
    });

    match result {
        Ok(Ok(service)) => {
            log::info!("Updated service {} ({})", service.id, service.name);
            Ok(service.into())
        }
        Ok(Err(ServiceError::Form(message))) => {
            log::info!("Refused update of service {id}: {message}");
            Err(ServiceError::Form(message))
        }
        Ok(Err(err)) => Err(err),
        Err(e) => {
            log::error!("Failed to update service: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Soft delete: the service stops accepting bookings but existing
/// appointments keep their reference.
pub fn deactivate_service<R>(id: ServiceId, repo: &R) -> ServiceResult<ServiceDto>
where
    R: ServiceReader + ServiceWriter,
{
    let update = ServiceUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    match repo.update_service(id, &update) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => log::info!("Deactivated service {id}"),
        Err(e) => {
            log::error!("Failed to deactivate service: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.get_service_by_id(id) {
        Ok(Some(service)) => Ok(service.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get service: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        AppointmentId, AppointmentStatus, DurationMinutes, ServiceName, ServicePrice,
    };
    use crate::repository::test::TestRepository;
    use crate::services::scheduling::check_conflict;
    use crate::services::scheduling::fixtures::{appointment, booking_day, salon, service, time};

    fn sid(id: i32) -> ServiceId {
        ServiceId::new(id).unwrap()
    }

    #[test]
    fn lists_only_active_services() {
        let repo = salon();
        let services = list_active_services(&repo).unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].id, 1);
    }

    #[test]
    fn inactive_service_is_not_found() {
        let repo = salon();
        assert_eq!(get_service(sid(2), &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(get_service(sid(1), &repo).unwrap().duration_minutes, 30);
    }

    #[test]
    fn added_service_is_active() {
        let repo = salon();
        let created = add_service(
            NewService {
                name: ServiceName::new("Beard Trim").unwrap(),
                description: None,
                duration_minutes: DurationMinutes::new(20).unwrap(),
                price: ServicePrice::new(15.0).unwrap(),
            },
            &repo,
        )
        .unwrap();
        assert!(created.is_active);
        assert_eq!(created.id, 3);
        assert_eq!(list_active_services(&repo).unwrap().len(), 2);
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let repo = salon();
        let updated = update_service(
            sid(1),
            ServiceUpdate {
                price: Some(ServicePrice::new(40.0).unwrap()),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        assert_eq!(updated.price, 40.0);
        assert_eq!(updated.name, "Service 1");
        assert_eq!(updated.duration_minutes, 30);
    }

    #[test]
    fn update_of_missing_service_is_not_found() {
        let repo = salon();
        let err = update_service(sid(9), ServiceUpdate::default(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn lengthening_service_cannot_overlap_bookings() {
        let repo = TestRepository::new(
            vec![service(1, 30, true)],
            vec![],
            vec![
                appointment(1, 1, booking_day(), time(10, 0), AppointmentStatus::Confirmed),
                appointment(2, 1, booking_day(), time(10, 30), AppointmentStatus::Confirmed),
            ],
        );
        let longer = ServiceUpdate {
            duration_minutes: Some(DurationMinutes::new(60).unwrap()),
            ..Default::default()
        };

        let err = update_service(sid(1), longer, &repo).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Form(
                "Appointments 1 and 2 would overlap with a 60-minute duration".to_string()
            )
        );
        assert_eq!(get_service(sid(1), &repo).unwrap().duration_minutes, 30);
        assert!(
            check_conflict(
                &repo,
                sid(1),
                booking_day(),
                time(10, 0),
                Some(AppointmentId::new(1).unwrap())
            )
            .unwrap()
            .is_none()
        );
    }

    #[test]
    fn service_can_grow_into_free_time_or_shrink() {
        let repo = TestRepository::new(
            vec![service(1, 30, true)],
            vec![],
            vec![
                appointment(1, 1, booking_day(), time(10, 0), AppointmentStatus::Confirmed),
                appointment(2, 1, booking_day(), time(10, 30), AppointmentStatus::Cancelled),
                appointment(3, 1, booking_day(), time(11, 0), AppointmentStatus::Pending),
            ],
        );
        let grown = update_service(
            sid(1),
            ServiceUpdate {
                duration_minutes: Some(DurationMinutes::new(60).unwrap()),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        assert_eq!(grown.duration_minutes, 60);

        let shrunk = update_service(
            sid(1),
            ServiceUpdate {
                duration_minutes: Some(DurationMinutes::new(20).unwrap()),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        assert_eq!(shrunk.duration_minutes, 20);
    }

    #[test]
    fn deactivation_hides_service() {
        let repo = salon();
        let deactivated = deactivate_service(sid(1), &repo).unwrap();
        assert!(!deactivated.is_active);
        assert!(list_active_services(&repo).unwrap().is_empty());
        assert_eq!(deactivate_service(sid(9), &repo).unwrap_err(), ServiceError::NotFound);
    }
}
