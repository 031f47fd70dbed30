//! Service catalog handlers for the REST API.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use washbay_types::error::CatalogError;
use washbay_types::service::{CreateServiceRequest, Service, ServiceId, UpdateServiceRequest};

use crate::http::error::AppError;
use crate::http::extractors::query::ServiceListQuery;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

fn parse_service_id(raw: &str) -> Result<ServiceId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Catalog(CatalogError::NotFound))
}

/// POST /api/v1/services - Add a service to the catalog.
pub async fn create_service(
    State(state): State<AppState>,
    Json(body): Json<CreateServiceRequest>,
) -> Result<(StatusCode, ApiResponse<Service>), AppError> {
    let timer = RequestTimer::start();

    let service = state.catalog_service.add_service(body).await?;
    let self_link = format!("/api/v1/services/{}", service.id);

    Ok((StatusCode::CREATED, timer.finish(service).with_link("self", &self_link)))
}

/// GET /api/v1/services - List the catalog.
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> Result<ApiResponse<Vec<Service>>, AppError> {
    let timer = RequestTimer::start();
    let services = state.catalog_service.list_services(query.active_only).await?;
    Ok(timer.finish(services).with_link("self", "/api/v1/services"))
}

/// GET /api/v1/services/{id} - Get a service by ID.
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Service>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_service_id(&id)?;

    let service = state.catalog_service.get_service(&id).await?;
    Ok(timer
        .finish(service)
        .with_link("self", &format!("/api/v1/services/{id}")))
}

/// PUT /api/v1/services/{id} - Partially update a service.
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateServiceRequest>,
) -> Result<ApiResponse<Service>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_service_id(&id)?;

    let service = state.catalog_service.update_service(&id, body).await?;
    Ok(timer
        .finish(service)
        .with_link("self", &format!("/api/v1/services/{id}")))
}
