use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::domain::appointment::AppointmentUpdate;
use crate::domain::types::{AppointmentId, AppointmentStatus};
use crate::forms::appointments::{
    AppointmentListForm, AvailableSlotsForm, AvailableSlotsPayload, CreateAppointmentForm,
    CreateAppointmentPayload, UpdateAppointmentForm, UpdateStatusForm,
};
use crate::models::config::SchedulingConfig;
use crate::repository::{AppointmentListQuery, DieselRepository};
use crate::routes::{json_error, service_error_response};
use crate::services::ServiceError;
use crate::services::appointments::{
    available_slots as available_slots_service, create_appointment as create_appointment_service,
    delete_appointment as delete_appointment_service, get_appointment as get_appointment_service,
    list_appointments as list_appointments_service,
    update_appointment as update_appointment_service, update_status as update_status_service,
};

const NOT_FOUND: &str = "Appointment not found";

fn appointment_id(raw: i32) -> Result<AppointmentId, HttpResponse> {
    AppointmentId::new(raw).map_err(|_| json_error(StatusCode::NOT_FOUND, NOT_FOUND))
}

#[post("")]
pub async fn create_appointment(
    repo: web::Data<DieselRepository>,
    config: web::Data<SchedulingConfig>,
    web::Json(form): web::Json<CreateAppointmentForm>,
) -> impl Responder {
    let payload: CreateAppointmentPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match create_appointment_service(payload, config.get_ref(), repo.get_ref()) {
        Ok(Ok(appointment)) => HttpResponse::Created().json(json!({
            "message": "Appointment created successfully",
            "appointment": appointment,
        })),
        Ok(Err(rejection)) => json_error(StatusCode::BAD_REQUEST, &rejection.to_string()),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[get("")]
pub async fn list_appointments(
    repo: web::Data<DieselRepository>,
    web::Query(form): web::Query<AppointmentListForm>,
) -> impl Responder {
    let query: AppointmentListQuery = match form.try_into() {
        Ok(query) => query,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match list_appointments_service(query, repo.get_ref()) {
        Ok(appointments) => HttpResponse::Ok().json(appointments),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[get("/available-slots")]
pub async fn available_slots(
    repo: web::Data<DieselRepository>,
    config: web::Data<SchedulingConfig>,
    web::Query(form): web::Query<AvailableSlotsForm>,
) -> impl Responder {
    let payload: AvailableSlotsPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match available_slots_service(payload, config.get_ref(), repo.get_ref()) {
        Ok(slots) => HttpResponse::Ok().json(slots),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[get("/{id}")]
pub async fn get_appointment(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = match appointment_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match get_appointment_service(id, repo.get_ref()) {
        Ok(appointment) => HttpResponse::Ok().json(appointment),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[put("/{id}")]
pub async fn update_appointment(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    web::Json(form): web::Json<UpdateAppointmentForm>,
) -> impl Responder {
    let id = match appointment_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let update: AppointmentUpdate = match form.try_into() {
        Ok(update) => update,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match update_appointment_service(id, update, repo.get_ref()) {
        Ok(Ok(appointment)) => HttpResponse::Ok().json(json!({
            "message": "Appointment updated successfully",
            "appointment": appointment,
        })),
        Ok(Err(rejection)) => json_error(StatusCode::BAD_REQUEST, &rejection.to_string()),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[put("/{id}/status")]
pub async fn update_status(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    web::Json(form): web::Json<UpdateStatusForm>,
) -> impl Responder {
    let id = match appointment_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let status: AppointmentStatus = match form.try_into() {
        Ok(status) => status,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match update_status_service(id, status, repo.get_ref()) {
        Ok(Ok(appointment)) => HttpResponse::Ok().json(json!({
            "message": format!("Appointment {id} status updated to {status}"),
            "appointment": appointment,
        })),
        Ok(Err(rejection)) => json_error(StatusCode::BAD_REQUEST, &rejection.to_string()),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[delete("/{id}")]
pub async fn delete_appointment(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = match appointment_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match delete_appointment_service(id, repo.get_ref()) {
        Ok(()) => {
            HttpResponse::Ok().json(json!({ "message": "Appointment deleted successfully" }))
        }
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}
