use serde::Serialize;

use crate::domain::service::Service;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price: f64,
    pub is_active: bool,
}

impl From<Service> for ServiceDto {
    fn from(value: Service) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.map(|d| d.into_inner()),
            duration_minutes: value.duration_minutes.get(),
            price: value.price.get(),
            is_active: value.is_active,
        }
    }
}
