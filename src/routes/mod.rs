use actix_web::http::StatusCode;
use actix_web::{HttpResponse, error, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod appointments;
pub mod catalog;
pub mod health;
pub mod working_hours;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// JSON `{"error": message}` response with the given status.
pub fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error: message })
}

/// Map a service failure to an HTTP response; `not_found` is the message
/// reported for [`ServiceError::NotFound`].
pub fn service_error_response(err: ServiceError, not_found: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, not_found),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            json_error(StatusCode::BAD_REQUEST, &message)
        }
        ServiceError::Internal => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn bad_request(err: impl std::fmt::Display) -> error::Error {
    let response = json_error(StatusCode::BAD_REQUEST, &err.to_string());
    error::InternalError::from_response(err.to_string(), response).into()
}

/// Register every API route under `/api`.
///
/// Malformed JSON bodies, query strings and path segments are answered with
/// the same `{"error": ...}` shape as business failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _| {
            let response = json_error(StatusCode::NOT_FOUND, "Not found");
            error::InternalError::from_response(err.to_string(), response).into()
        }))
        .service(
            web::scope("/api")
                .service(health::health)
                .service(
                    web::scope("/appointments")
                        // Registered before `/{id}` so the literal segment wins.
                        .service(appointments::available_slots)
                        .service(appointments::create_appointment)
                        .service(appointments::list_appointments)
                        .service(appointments::get_appointment)
                        .service(appointments::update_appointment)
                        .service(appointments::update_status)
                        .service(appointments::delete_appointment),
                )
                .service(
                    web::scope("/services")
                        .service(catalog::list_services)
                        .service(catalog::get_service)
                        .service(catalog::add_service)
                        .service(catalog::update_service)
                        .service(catalog::delete_service),
                )
                .service(
                    web::scope("/working-hours")
                        .service(working_hours::list_working_hours)
                        .service(working_hours::get_working_hour)
                        .service(working_hours::update_working_hour),
                ),
        );
}
