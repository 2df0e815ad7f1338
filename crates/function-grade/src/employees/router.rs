use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AssessmentRequest, EmployeeId, NewEmployee, PreviewRequest};
use super::repository::EmployeeRepository;
use super::service::{GradingService, GradingServiceError};
use crate::grading::Role;

/// Router builder exposing the catalog, grading, and employee endpoints.
pub fn grading_router<R>(service: Arc<GradingService<R>>) -> Router
where
    R: EmployeeRepository + 'static,
{
    Router::new()
        .route("/api/v1/catalog/families", get(families_handler::<R>))
        .route("/api/v1/catalog/roles", get(roles_handler::<R>))
        .route("/api/v1/grading/preview", post(preview_handler::<R>))
        .route(
            "/api/v1/employees",
            get(list_employees_handler::<R>).post(create_employee_handler::<R>),
        )
        .route(
            "/api/v1/employees/:employee_id",
            get(get_employee_handler::<R>).delete(delete_employee_handler::<R>),
        )
        .route(
            "/api/v1/employees/:employee_id/assessment",
            put(save_assessment_handler::<R>),
        )
        .route("/api/v1/export/employees.csv", get(export_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RolesQuery {
    family: Option<String>,
}

pub(crate) async fn families_handler<R>(State(service): State<Arc<GradingService<R>>>) -> Response
where
    R: EmployeeRepository + 'static,
{
    Json(service.engine().catalog().families()).into_response()
}

pub(crate) async fn roles_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Query(query): Query<RolesQuery>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    let catalog = service.engine().catalog();
    let roles: Vec<&Role> = match query.family.as_deref() {
        Some(family) => catalog.roles_in(family).collect(),
        None => catalog.roles().iter().collect(),
    };
    Json(roles).into_response()
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Json(request): Json<PreviewRequest>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match service.preview(&request) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_employees_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match blocking(service, |service| service.list_employees()).await {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_employee_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Json(new): Json<NewEmployee>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match blocking(service, move |service| service.add_employee(new)).await {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_employee_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match blocking(service, move |service| {
        service.get_employee(&EmployeeId(employee_id))
    })
    .await
    {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_employee_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match blocking(service, move |service| {
        service.remove_employee(&EmployeeId(employee_id))
    })
    .await
    {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_assessment_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Path(employee_id): Path<String>,
    Json(request): Json<AssessmentRequest>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    match blocking(service, move |service| {
        service.save_assessment(&EmployeeId(employee_id), request)
    })
    .await
    {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R>(State(service): State<Arc<GradingService<R>>>) -> Response
where
    R: EmployeeRepository + 'static,
{
    let exported = blocking(service, |service| {
        let mut buffer = Vec::new();
        service.export_overview(&mut buffer).map(|()| buffer)
    })
    .await;
    match exported {
        Ok(buffer) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            buffer,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

/// Run a service call on the blocking pool; the file store does synchronous
/// I/O under a mutex.
async fn blocking<R, T, F>(
    service: Arc<GradingService<R>>,
    work: F,
) -> Result<T, GradingServiceError>
where
    R: EmployeeRepository + 'static,
    T: Send + 'static,
    F: FnOnce(&GradingService<R>) -> Result<T, GradingServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&service)).await?
}

fn error_response(error: GradingServiceError) -> Response {
    let status = error.status_code();
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
