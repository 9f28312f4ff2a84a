use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{NaiveDate, Weekday};

use crate::domain::appointment::{Appointment, AppointmentUpdate, NewAppointment};
use crate::domain::service::{NewService, Service, ServiceUpdate};
use crate::domain::types::{AppointmentId, AppointmentStatus, ServiceId, WorkingHourId};
use crate::domain::working_hour::WorkingHour;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, BookingStore, BookingTransaction,
    RepositoryResult, ServiceListQuery, ServiceReader, ServiceWriter, WorkingHourReader,
    WorkingHourWriter,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    services: Mutex<HashMap<ServiceId, Service>>,
    working_hours: Mutex<Vec<WorkingHour>>,
    appointments: Mutex<Vec<Appointment>>,
    booking_lock: Mutex<()>,
}

impl TestRepository {
    pub fn new(
        services: Vec<Service>,
        working_hours: Vec<WorkingHour>,
        appointments: Vec<Appointment>,
    ) -> Self {
        Self {
            services: Mutex::new(services.into_iter().map(|s| (s.id, s)).collect()),
            working_hours: Mutex::new(working_hours),
            appointments: Mutex::new(appointments),
            booking_lock: Mutex::new(()),
        }
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }

    fn next_appointment_id(appointments: &[Appointment]) -> AppointmentId {
        let next = appointments.iter().map(|a| a.id.get()).max().unwrap_or(0) + 1;
        AppointmentId::new(next).unwrap()
    }
}

impl ServiceReader for TestRepository {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        Ok(self.services.lock().unwrap().get(&id).cloned())
    }

    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<Vec<Service>> {
        let mut items: Vec<Service> = self
            .services
            .lock()
            .unwrap()
            .values()
            .filter(|s| !query.active_only || s.is_active)
            .cloned()
            .collect();
        items.sort_by_key(|s| s.id);
        Ok(items)
    }
}

impl ServiceWriter for TestRepository {
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service> {
        let mut services = self.services.lock().unwrap();
        let next = services.keys().map(|id| id.get()).max().unwrap_or(0) + 1;
        let created = Service {
            id: ServiceId::new(next).unwrap(),
            name: service.name.clone(),
            description: service.description.clone(),
            duration_minutes: service.duration_minutes,
            price: service.price,
            is_active: true,
        };
        services.insert(created.id, created.clone());
        Ok(created)
    }

    fn update_service(&self, id: ServiceId, update: &ServiceUpdate) -> RepositoryResult<usize> {
        let mut services = self.services.lock().unwrap();
        let Some(service) = services.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(name) = &update.name {
            service.name = name.clone();
        }
        if let Some(description) = &update.description {
            service.description = Some(description.clone());
        }
        if let Some(duration) = update.duration_minutes {
            service.duration_minutes = duration;
        }
        if let Some(price) = update.price {
            service.price = price;
        }
        if let Some(is_active) = update.is_active {
            service.is_active = is_active;
        }
        Ok(1)
    }
}

impl WorkingHourReader for TestRepository {
    fn get_working_hours_for_day(&self, day: Weekday) -> RepositoryResult<Option<WorkingHour>> {
        Ok(self
            .working_hours
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.day_of_week == day)
            .cloned())
    }

    fn get_working_hour_by_id(&self, id: WorkingHourId) -> RepositoryResult<Option<WorkingHour>> {
        Ok(self
            .working_hours
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == id)
            .cloned())
    }

    fn list_working_hours(&self) -> RepositoryResult<Vec<WorkingHour>> {
        let mut week = self.working_hours.lock().unwrap().clone();
        week.sort_by_key(|h| h.day_of_week.num_days_from_monday());
        Ok(week)
    }
}

impl WorkingHourWriter for TestRepository {
    fn update_working_hour(&self, hours: &WorkingHour) -> RepositoryResult<usize> {
        let mut week = self.working_hours.lock().unwrap();
        match week.iter_mut().find(|h| h.id == hours.id) {
            Some(existing) => {
                *existing = hours.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl AppointmentReader for TestRepository {
    fn list_active_appointments(
        &self,
        service_id: ServiceId,
        date: NaiveDate,
        exclude: Option<AppointmentId>,
    ) -> RepositoryResult<Vec<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.service_id == service_id && a.appointment_date == date)
            .filter(|a| a.status.occupies_slot())
            .filter(|a| Some(a.id) != exclude)
            .cloned()
            .collect())
    }

    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut items: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| query.status.is_none_or(|s| a.status == s))
            .filter(|a| query.date.is_none_or(|d| a.appointment_date == d))
            .filter(|a| query.service_id.is_none_or(|id| a.service_id == id))
            .cloned()
            .collect();
        items.sort_by_key(|a| (a.appointment_date, a.appointment_time));
        Ok(items)
    }

    fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }
}

impl AppointmentWriter for TestRepository {
    fn create_appointment(&self, appointment: &NewAppointment) -> RepositoryResult<Appointment> {
        let mut appointments = self.appointments.lock().unwrap();
        let created = Appointment {
            id: Self::next_appointment_id(&appointments),
            customer_name: appointment.customer_name.clone(),
            customer_phone: appointment.customer_phone.clone(),
            service_id: appointment.service_id,
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            status: AppointmentStatus::Pending,
            created_by: appointment.created_by,
            created_at: appointment.created_at,
        };
        appointments.push(created.clone());
        Ok(created)
    }

    fn update_appointment(
        &self,
        id: AppointmentId,
        update: &AppointmentUpdate,
    ) -> RepositoryResult<usize> {
        let mut appointments = self.appointments.lock().unwrap();
        let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(0);
        };
        if let Some(name) = &update.customer_name {
            appointment.customer_name = name.clone();
        }
        if let Some(phone) = &update.customer_phone {
            appointment.customer_phone = phone.clone();
        }
        if let Some(service_id) = update.service_id {
            appointment.service_id = service_id;
        }
        if let Some(date) = update.appointment_date {
            appointment.appointment_date = date;
        }
        if let Some(time) = update.appointment_time {
            appointment.appointment_time = time;
        }
        Ok(1)
    }

    fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> RepositoryResult<usize> {
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.iter_mut().find(|a| a.id == id) {
            Some(appointment) => {
                appointment.status = status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<usize> {
        let mut appointments = self.appointments.lock().unwrap();
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        Ok(before - appointments.len())
    }
}

impl BookingTransaction for TestRepository {
    fn booking_transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&dyn BookingStore) -> RepositoryResult<T>,
    {
        let _guard = self.booking_lock.lock().unwrap();
        f(self)
    }
}
