//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::appointments::{
    AppointmentListFormError, AvailableSlotsFormError, CreateAppointmentFormError,
    UpdateAppointmentFormError, UpdateStatusFormError,
};
use crate::forms::services::{AddServiceFormError, UpdateServiceFormError};
use crate::forms::working_hours::UpdateWorkingHourFormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

macro_rules! form_error_into_service_error {
    ($($form_error:ty),+ $(,)?) => {
        $(
            impl From<$form_error> for ServiceError {
                fn from(val: $form_error) -> Self {
                    ServiceError::Form(val.to_string())
                }
            }
        )+
    };
}

form_error_into_service_error!(
    CreateAppointmentFormError,
    UpdateAppointmentFormError,
    UpdateStatusFormError,
    AvailableSlotsFormError,
    AppointmentListFormError,
    AddServiceFormError,
    UpdateServiceFormError,
    UpdateWorkingHourFormError,
);
