use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::domain::service::{NewService, ServiceUpdate};
use crate::domain::types::ServiceId;
use crate::forms::services::{AddServiceForm, UpdateServiceForm};
use crate::repository::DieselRepository;
use crate::routes::{json_error, service_error_response};
use crate::services::ServiceError;
use crate::services::catalog::{
    add_service as add_service_service, deactivate_service, get_service as get_service_service,
    list_active_services, update_service as update_service_service,
};

const NOT_FOUND: &str = "Service not available";

fn service_id(raw: i32) -> Result<ServiceId, HttpResponse> {
    ServiceId::new(raw).map_err(|_| json_error(StatusCode::NOT_FOUND, NOT_FOUND))
}

#[get("")]
pub async fn list_services(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_active_services(repo.get_ref()) {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[get("/{id}")]
pub async fn get_service(repo: web::Data<DieselRepository>, path: web::Path<i32>) -> impl Responder {
    let id = match service_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match get_service_service(id, repo.get_ref()) {
        Ok(service) => HttpResponse::Ok().json(service),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[post("")]
pub async fn add_service(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddServiceForm>,
) -> impl Responder {
    let service: NewService = match form.try_into() {
        Ok(service) => service,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match add_service_service(service, repo.get_ref()) {
        Ok(service) => HttpResponse::Created().json(json!({
            "message": format!("Service {} added successfully", service.name),
            "service": service,
        })),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

#[put("/{id}")]
pub async fn update_service(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
    web::Json(form): web::Json<UpdateServiceForm>,
) -> impl Responder {
    let id = match service_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let update: ServiceUpdate = match form.try_into() {
        Ok(update) => update,
        Err(e) => return service_error_response(ServiceError::from(e), NOT_FOUND),
    };

    match update_service_service(id, update, repo.get_ref()) {
        Ok(service) => HttpResponse::Ok().json(json!({
            "message": format!("Service {} updated successfully", service.name),
            "service": service,
        })),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}

/// Deactivates rather than deletes, so past appointments keep their service.
#[delete("/{id}")]
pub async fn delete_service(
    repo: web::Data<DieselRepository>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = match service_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match deactivate_service(id, repo.get_ref()) {
        Ok(service) => HttpResponse::Ok().json(json!({
            "message": format!("Service {} deactivated", service.name),
        })),
        Err(err) => service_error_response(err, NOT_FOUND),
    }
}
