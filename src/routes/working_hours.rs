use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, put, web};
use serde_json::json;

use crate::domain::types::WorkingHourId;
use crate::domain::working_hour::WorkingHourUpdate;
use crate::forms::working_hours::UpdateWorkingHourForm;
use crate::repository::DieselRepository;
use crate::routes::{json_error, service_error_response};
use crate::services::ServiceError;
use crate::services::working_hours::{
    get_working_hour as get_working_hour_service, list_working_hours as list_working_hours_service,
    update_working_hour as update_working_hour_service,
};

const NOT_FOUND: &str = "Working hours not found";

fn working_hour_id(raw: i32) -> Result<WorkingHourId, HttpResponse> {
    WorkingHourId::new(raw).map_err(|_| json_error(StatusCode::NOT_FOUND, NOT_FOUND))
}

#[get("")]
pub async fn list_working_hours(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_working_hours_service(repo.get_ref()) {
        Ok(week) => HttpResponse::Ok().json(week),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[get("/{id}")]
pub async fn get_working_hour(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = match working_hour_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match get_working_hour_service(id, repo.get_ref()) {
        Ok(hours) => HttpResponse::Ok().json(hours),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[put("/{id}")]
pub async fn update_working_hour(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    web::Json(form): web::Json<UpdateWorkingHourForm>,
) -> impl Responder {
    let id = match working_hour_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let update: WorkingHourUpdate = match form.try_into() {
        Ok(update) => update,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match update_working_hour_service(id, update, repo.get_ref()) {
        Ok(hours) => HttpResponse::Ok().json(json!({
            "message": format!("Working hours for {} updated", hours.day_of_week),
            "working_hours": hours,
        })),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}
