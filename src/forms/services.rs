use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::service::{NewService, ServiceUpdate};
use crate::domain::types::{
    DurationMinutes, ServiceDescription, ServiceName, ServicePrice, TypeConstraintError,
};

fn optional_description(
    value: Option<String>,
) -> Result<Option<ServiceDescription>, TypeConstraintError> {
    value
        .filter(|d| !d.trim().is_empty())
        .map(ServiceDescription::new)
        .transpose()
}

#[derive(Deserialize, Validate)]
pub struct AddServiceForm {
    #[validate(length(min = 2))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

#[derive(Debug, Error)]
pub enum AddServiceFormError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Validation failed: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddServiceFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddServiceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddServiceForm> for NewService {
    type Error = AddServiceFormError;

    fn try_from(value: AddServiceForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: ServiceName::new(value.name)?,
            description: optional_description(value.description)?,
            duration_minutes: DurationMinutes::new(value.duration_minutes)?,
            price: ServicePrice::new(value.price)?,
        })
    }
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateServiceForm {
    #[validate(length(min = 2))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Error)]
pub enum UpdateServiceFormError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Validation failed: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateServiceFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateServiceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateServiceForm> for ServiceUpdate {
    type Error = UpdateServiceFormError;

    fn try_from(value: UpdateServiceForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name.map(ServiceName::new).transpose()?,
            description: optional_description(value.description)?,
            duration_minutes: value.duration_minutes.map(DurationMinutes::new).transpose()?,
            price: value.price.map(ServicePrice::new).transpose()?,
            is_active: value.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_rejects_non_positive_duration() {
        let form = AddServiceForm {
            name: "Haircut".into(),
            description: None,
            duration_minutes: 0,
            price: 20.0,
        };
        assert!(matches!(
            NewService::try_from(form),
            Err(AddServiceFormError::Validation(_))
        ));
    }

    #[test]
    fn add_form_drops_blank_description() {
        let form = AddServiceForm {
            name: "Colour".into(),
            description: Some("   ".into()),
            duration_minutes: 90,
            price: 0.0,
        };
        let service = NewService::try_from(form).unwrap();
        assert!(service.description.is_none());
        assert_eq!(service.duration_minutes, 90);
    }

    #[test]
    fn update_form_rejects_negative_price() {
        let form = UpdateServiceForm {
            price: Some(-5.0),
            ..Default::default()
        };
        assert!(ServiceUpdate::try_from(form).is_err());
    }
}
