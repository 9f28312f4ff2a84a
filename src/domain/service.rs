use serde::{Deserialize, Serialize};

use crate::domain::types::{DurationMinutes, ServiceDescription, ServiceId, ServiceName, ServicePrice};

/// A bookable salon service from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: ServiceName,
    pub description: Option<ServiceDescription>,
    pub duration_minutes: DurationMinutes,
    pub price: ServicePrice,
    /// Inactive services stay in the catalog but accept no new bookings.
    pub is_active: bool,
}

/// Data required to insert a new [`Service`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewService {
    pub name: ServiceName,
    pub description: Option<ServiceDescription>,
    pub duration_minutes: DurationMinutes,
    pub price: ServicePrice,
}

/// Partial update applied to an existing [`Service`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceUpdate {
    pub name: Option<ServiceName>,
    pub description: Option<ServiceDescription>,
    pub duration_minutes: Option<DurationMinutes>,
    pub price: Option<ServicePrice>,
    pub is_active: Option<bool>,
}
