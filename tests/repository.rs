use chrono::{NaiveDate, NaiveTime, Utc, Weekday};
use salon_booking::domain::appointment::{AppointmentUpdate, NewAppointment};
use salon_booking::domain::service::{NewService, ServiceUpdate};
use salon_booking::domain::types::{
    AppointmentStatus, BookingSource, CustomerName, CustomerPhone, DurationMinutes, ServiceId,
    ServiceName, ServicePrice,
};
use salon_booking::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, DieselRepository,
    ServiceListQuery, ServiceReader, ServiceWriter, WorkingHourReader, WorkingHourWriter,
};

mod common;

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn haircut() -> NewService {
    NewService {
        name: ServiceName::new("Haircut").unwrap(),
        description: None,
        duration_minutes: DurationMinutes::new(30).unwrap(),
        price: ServicePrice::new(25.0).unwrap(),
    }
}

fn booking(service_id: ServiceId, date: NaiveDate, start: NaiveTime) -> NewAppointment {
    NewAppointment {
        customer_name: CustomerName::new("Jane Doe").unwrap(),
        customer_phone: CustomerPhone::new("5551234567").unwrap(),
        service_id,
        appointment_date: date,
        appointment_time: start,
        created_by: BookingSource::Receptionist,
        created_at: Utc::now().naive_utc(),
    }
}

#[test]
fn seeded_week_is_ordered_monday_first() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let week = repo.list_working_hours().expect("should list working hours");
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].day_of_week, Weekday::Mon);
    assert_eq!(week[0].open_time, time(9, 0));
    assert_eq!(week[0].close_time, time(18, 0));
    assert_eq!(week[6].day_of_week, Weekday::Sun);
    assert!(week[6].is_closed);

    let friday = repo
        .get_working_hours_for_day(Weekday::Fri)
        .expect("should query friday")
        .expect("friday should be seeded");
    assert!(!friday.is_closed);
}

#[test]
fn working_hours_update_round_trips() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut monday = repo
        .get_working_hours_for_day(Weekday::Mon)
        .unwrap()
        .unwrap();
    monday.open_time = time(10, 30);
    assert_eq!(repo.update_working_hour(&monday).unwrap(), 1);

    let stored = repo.get_working_hour_by_id(monday.id).unwrap().unwrap();
    assert_eq!(stored.open_time, time(10, 30));
    assert_eq!(stored.day_of_week, Weekday::Mon);
}

#[test]
fn service_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo.create_service(&haircut()).expect("should create service");
    assert!(created.is_active);
    assert_eq!(created.name.as_str(), "Haircut");

    let update = ServiceUpdate {
        duration_minutes: Some(DurationMinutes::new(45).unwrap()),
        ..Default::default()
    };
    assert_eq!(repo.update_service(created.id, &update).unwrap(), 1);
    assert_eq!(
        repo.update_service(created.id, &ServiceUpdate::default()).unwrap(),
        0
    );

    let stored = repo.get_service_by_id(created.id).unwrap().unwrap();
    assert_eq!(stored.duration_minutes, 45);
    assert_eq!(stored.price, 25.0);

    let deactivate = ServiceUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    repo.update_service(created.id, &deactivate).unwrap();
    assert!(repo.list_services(ServiceListQuery::active()).unwrap().is_empty());
    assert_eq!(repo.list_services(ServiceListQuery::default()).unwrap().len(), 1);
}

#[test]
fn appointment_crud_and_filters() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let service = repo.create_service(&haircut()).unwrap();
    let date = NaiveDate::from_ymd_opt(2030, 3, 6).unwrap();

    let late = repo
        .create_appointment(&booking(service.id, date, time(14, 0)))
        .expect("should create appointment");
    let early = repo
        .create_appointment(&booking(service.id, date, time(9, 0)))
        .expect("should create appointment");
    assert_eq!(late.status, AppointmentStatus::Pending);
    assert_eq!(late.created_by, BookingSource::Receptionist);

    let listed = repo
        .list_appointments(AppointmentListQuery::default().date(date))
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);

    repo.update_appointment_status(early.id, AppointmentStatus::Cancelled)
        .unwrap();
    let live = repo.list_active_appointments(service.id, date, None).unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, late.id);
    assert!(
        repo.list_active_appointments(service.id, date, Some(late.id))
            .unwrap()
            .is_empty()
    );

    let cancelled = repo
        .list_appointments(AppointmentListQuery::default().status(AppointmentStatus::Cancelled))
        .unwrap();
    assert_eq!(cancelled.len(), 1);

    let update = AppointmentUpdate {
        customer_name: Some(CustomerName::new("John Roe").unwrap()),
        appointment_time: Some(time(15, 0)),
        ..Default::default()
    };
    assert_eq!(repo.update_appointment(late.id, &update).unwrap(), 1);
    assert_eq!(
        repo.update_appointment(late.id, &AppointmentUpdate::default())
            .unwrap(),
        0
    );
    let moved = repo.get_appointment_by_id(late.id).unwrap().unwrap();
    assert_eq!(moved.customer_name.as_str(), "John Roe");
    assert_eq!(moved.appointment_time, time(15, 0));

    assert_eq!(repo.delete_appointment(late.id).unwrap(), 1);
    assert_eq!(repo.delete_appointment(late.id).unwrap(), 0);
    assert!(repo.get_appointment_by_id(late.id).unwrap().is_none());
}
