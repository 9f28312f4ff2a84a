use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::appointment::{Appointment, AppointmentUpdate, NewAppointment};
use crate::domain::types::{AppointmentId, AppointmentStatus, ServiceId};
use crate::models::appointment::{
    Appointment as DbAppointment, AppointmentChangeset, NewAppointment as DbNewAppointment,
};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, DieselRepository,
    RepositoryError, RepositoryResult, SqliteTransaction,
};

fn load_active(
    conn: &mut SqliteConnection,
    service_id: ServiceId,
    date: NaiveDate,
    exclude: Option<AppointmentId>,
) -> RepositoryResult<Vec<Appointment>> {
    use crate::schema::appointments;

    let mut query = appointments::table
        .filter(appointments::service_id.eq(service_id.get()))
        .filter(appointments::appointment_date.eq(date))
        .filter(appointments::status.ne(AppointmentStatus::Cancelled.as_str()))
        .into_boxed::<diesel::sqlite::Sqlite>();

    if let Some(exclude) = exclude {
        query = query.filter(appointments::id.ne(exclude.get()));
    }

    let items = query
        .order(appointments::appointment_time.asc())
        .load::<DbAppointment>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Appointment>, _>>()?;

    Ok(items)
}

fn load_filtered(
    conn: &mut SqliteConnection,
    query: AppointmentListQuery,
) -> RepositoryResult<Vec<Appointment>> {
    use crate::schema::appointments;

    let mut items = appointments::table.into_boxed::<diesel::sqlite::Sqlite>();
    if let Some(status) = query.status {
        items = items.filter(appointments::status.eq(status.as_str()));
    }
    if let Some(date) = query.date {
        items = items.filter(appointments::appointment_date.eq(date));
    }
    if let Some(service_id) = query.service_id {
        items = items.filter(appointments::service_id.eq(service_id.get()));
    }

    let items = items
        .order((
            appointments::appointment_date.asc(),
            appointments::appointment_time.asc(),
        ))
        .load::<DbAppointment>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Appointment>, _>>()?;

    Ok(items)
}

fn find_by_id(
    conn: &mut SqliteConnection,
    id: AppointmentId,
) -> RepositoryResult<Option<Appointment>> {
    use crate::schema::appointments;

    let row = appointments::table
        .filter(appointments::id.eq(id.get()))
        .first::<DbAppointment>(conn)
        .optional()?;

    Ok(row.map(TryInto::try_into).transpose()?)
}

fn insert(
    conn: &mut SqliteConnection,
    appointment: &NewAppointment,
) -> RepositoryResult<Appointment> {
    use crate::schema::appointments;

    let row: DbNewAppointment = appointment.clone().into();
    let created = diesel::insert_into(appointments::table)
        .values(row)
        .get_result::<DbAppointment>(conn)?;

    Ok(created.try_into()?)
}

fn update(
    conn: &mut SqliteConnection,
    id: AppointmentId,
    update: &AppointmentUpdate,
) -> RepositoryResult<usize> {
    use crate::schema::appointments;

    let changeset: AppointmentChangeset = update.clone().into();
    match diesel::update(appointments::table.filter(appointments::id.eq(id.get())))
        .set(changeset)
        .execute(conn)
    {
        Ok(affected) => Ok(affected),
        // Diesel refuses an all-`None` changeset; there is nothing to write.
        Err(diesel::result::Error::QueryBuilderError(_)) => Ok(0),
        Err(e) => Err(RepositoryError::from(e)),
    }
}

fn set_status(
    conn: &mut SqliteConnection,
    id: AppointmentId,
    status: AppointmentStatus,
) -> RepositoryResult<usize> {
    use crate::schema::appointments;

    let affected = diesel::update(appointments::table.filter(appointments::id.eq(id.get())))
        .set(appointments::status.eq(status.as_str()))
        .execute(conn)?;

    Ok(affected)
}

fn remove(conn: &mut SqliteConnection, id: AppointmentId) -> RepositoryResult<usize> {
    use crate::schema::appointments;

    let affected = diesel::delete(appointments::table.filter(appointments::id.eq(id.get())))
        .execute(conn)?;

    Ok(affected)
}

impl AppointmentReader for DieselRepository {
    fn list_active_appointments(
        &self,
        service_id: ServiceId,
        date: NaiveDate,
        exclude: Option<AppointmentId>,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(|conn| load_active(conn, service_id, date, exclude))
    }

    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(|conn| load_filtered(conn, query))
    }

    fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>> {
        self.with_conn(|conn| find_by_id(conn, id))
    }
}

impl AppointmentReader for SqliteTransaction<'_> {
    fn list_active_appointments(
        &self,
        service_id: ServiceId,
        date: NaiveDate,
        exclude: Option<AppointmentId>,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(|conn| load_active(conn, service_id, date, exclude))
    }

    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(|conn| load_filtered(conn, query))
    }

    fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>> {
        self.with_conn(|conn| find_by_id(conn, id))
    }
}

impl AppointmentWriter for DieselRepository {
    fn create_appointment(&self, appointment: &NewAppointment) -> RepositoryResult<Appointment> {
        self.with_conn(|conn| insert(conn, appointment))
    }

    fn update_appointment(
        &self,
        id: AppointmentId,
        changes: &AppointmentUpdate,
    ) -> RepositoryResult<usize> {
        self.with_conn(|conn| update(conn, id, changes))
    }

    fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> RepositoryResult<usize> {
        self.with_conn(|conn| set_status(conn, id, status))
    }

    fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<usize> {
        self.with_conn(|conn| remove(conn, id))
    }
}

impl AppointmentWriter for SqliteTransaction<'_> {
    fn create_appointment(&self, appointment: &NewAppointment) -> RepositoryResult<Appointment> {
        self.with_conn(|conn| insert(conn, appointment))
    }

    fn update_appointment(
        &self,
        id: AppointmentId,
        changes: &AppointmentUpdate,
    ) -> RepositoryResult<usize> {
        self.with_conn(|conn| update(conn, id, changes))
    }

    fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> RepositoryResult<usize> {
        self.with_conn(|conn| set_status(conn, id, status))
    }

    fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<usize> {
        self.with_conn(|conn| remove(conn, id))
    }
}
