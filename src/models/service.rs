use diesel::prelude::*;

use crate::domain::service::{
    NewService as DomainNewService, Service as DomainService, ServiceUpdate as DomainServiceUpdate,
};
use crate::domain::types::{
    DurationMinutes, ServiceDescription, ServiceName, ServicePrice, TypeConstraintError,
};

/// Diesel model representing the `services` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::services)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price: f64,
    pub is_active: bool,
}

/// Insertable form of [`Service`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price: f64,
    pub is_active: bool,
}

/// Changeset for partial service updates; `None` fields are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::services)]
pub struct ServiceChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            id: service.id.try_into()?,
            name: ServiceName::new(service.name)?,
            description: service
                .description
                .filter(|d| !d.trim().is_empty())
                .map(ServiceDescription::new)
                .transpose()?,
            duration_minutes: DurationMinutes::new(service.duration_minutes)?,
            price: ServicePrice::new(service.price)?,
            is_active: service.is_active,
        })
    }
}

impl From<DomainNewService> for NewService {
    fn from(service: DomainNewService) -> Self {
        Self {
            name: service.name.into_inner(),
            description: service.description.map(ServiceDescription::into_inner),
            duration_minutes: service.duration_minutes.get(),
            price: service.price.get(),
            is_active: true,
        }
    }
}

impl From<DomainServiceUpdate> for ServiceChangeset {
    fn from(update: DomainServiceUpdate) -> Self {
        Self {
            name: update.name.map(ServiceName::into_inner),
            description: update.description.map(ServiceDescription::into_inner),
            duration_minutes: update.duration_minutes.map(DurationMinutes::get),
            price: update.price.map(ServicePrice::get),
            is_active: update.is_active,
        }
    }
}
