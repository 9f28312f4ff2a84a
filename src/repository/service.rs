use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::service::{NewService, Service, ServiceUpdate};
use crate::domain::types::ServiceId;
use crate::models::service::{
    NewService as DbNewService, Service as DbService, ServiceChangeset,
};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, ServiceListQuery, ServiceReader,
    ServiceWriter, SqliteTransaction,
};

fn find_service(conn: &mut SqliteConnection, id: ServiceId) -> RepositoryResult<Option<Service>> {
    use crate::schema::services;

    let service = services::table
        .filter(services::id.eq(id.get()))
        .first::<DbService>(conn)
        .optional()?;

    Ok(service.map(TryInto::try_into).transpose()?)
}

fn load_services(
    conn: &mut SqliteConnection,
    query: ServiceListQuery,
) -> RepositoryResult<Vec<Service>> {
    use crate::schema::services;

    let mut items = services::table.into_boxed::<diesel::sqlite::Sqlite>();
    if query.active_only {
        items = items.filter(services::is_active.eq(true));
    }

    let items = items
        .order(services::id.asc())
        .load::<DbService>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Service>, _>>()?;

    Ok(items)
}

impl ServiceReader for DieselRepository {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        self.with_conn(|conn| find_service(conn, id))
    }

    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<Vec<Service>> {
        self.with_conn(|conn| load_services(conn, query))
    }
}

impl ServiceReader for SqliteTransaction<'_> {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        self.with_conn(|conn| find_service(conn, id))
    }

    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<Vec<Service>> {
        self.with_conn(|conn| load_services(conn, query))
    }
}

fn insert_service(conn: &mut SqliteConnection, service: &NewService) -> RepositoryResult<Service> {
    use crate::schema::services;

    let db_service: DbNewService = service.clone().into();
    let created = diesel::insert_into(services::table)
        .values(db_service)
        .get_result::<DbService>(conn)?;

    Ok(created.try_into()?)
}

fn write_service_update(
    conn: &mut SqliteConnection,
    id: ServiceId,
    update: &ServiceUpdate,
) -> RepositoryResult<usize> {
    use crate::schema::services;

    let changeset: ServiceChangeset = update.clone().into();

    match diesel::update(services::table.filter(services::id.eq(id.get())))
        .set(changeset)
        .execute(conn)
    {
        Ok(affected) => Ok(affected),
        // Nothing to write.
        Err(diesel::result::Error::QueryBuilderError(_)) => Ok(0),
        Err(e) => Err(RepositoryError::from(e)),
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service> {
        self.with_conn(|conn| insert_service(conn, service))
    }

    fn update_service(&self, id: ServiceId, update: &ServiceUpdate) -> RepositoryResult<usize> {
        self.with_conn(|conn| write_service_update(conn, id, update))
    }
}

impl ServiceWriter for SqliteTransaction<'_> {
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service> {
        self.with_conn(|conn| insert_service(conn, service))
    }

    fn update_service(&self, id: ServiceId, update: &ServiceUpdate) -> RepositoryResult<usize> {
        self.with_conn(|conn| write_service_update(conn, id, update))
    }
}
