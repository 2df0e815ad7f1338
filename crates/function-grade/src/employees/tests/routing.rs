use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::employees::router::{create_employee_handler, get_employee_handler};
use crate::employees::{grading_router, GradingService, JsonFileRepository};
use crate::grading::GradingEngine;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

#[tokio::test]
async fn families_route_lists_catalog_families() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/catalog/families")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(5));
    assert_eq!(body[0], "Bedrijfsbureau");
}

#[tokio::test]
async fn roles_route_filters_by_family() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/catalog/roles?family=Projectleiding")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let roles = body.as_array().expect("role list");
    assert_eq!(roles.len(), 4);
    assert!(roles.iter().all(|role| role["family"] == "Projectleiding"));
}

#[tokio::test]
async fn preview_route_returns_outcome() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/grading/preview",
            json!({ "family": "Montage", "answers": montage_answers() }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["final_level"], 5);
    assert_eq!(body["basis"]["kind"], "core_majority");
    assert_eq!(body["best_role"]["code"], "MON_5");
    assert!(repository.employees.lock().expect("mutex").is_empty());
}

#[tokio::test]
async fn preview_route_rejects_invalid_answers() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/grading/preview",
            json!({ "family": "Montage", "answers": { "complexity_0": 5 } }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("complexity_0"));
}

#[tokio::test]
async fn create_handler_returns_created_employee() {
    let (service, _) = build_service();

    let response = create_employee_handler::<MemoryRepository>(
        State(Arc::new(service)),
        axum::Json(new_employee("Jan", "Montage")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["name"], "Jan");
    assert!(body["assessment"].is_null());
}

#[tokio::test]
async fn create_handler_rejects_missing_name() {
    let (service, _) = build_service();

    let response = create_employee_handler::<MemoryRepository>(
        State(Arc::new(service)),
        axum::Json(new_employee(" ", "Montage")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_handler_returns_not_found_for_unknown_employee() {
    let (service, _) = build_service();

    let response = get_employee_handler::<MemoryRepository>(
        State(Arc::new(service)),
        Path("missing".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_handler_returns_internal_error_on_repository_failure() {
    let service = GradingService::new(Arc::new(UnavailableRepository), GradingEngine::standard());

    let response = get_employee_handler::<UnavailableRepository>(
        State(Arc::new(service)),
        Path("any".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn assessment_route_saves_and_delete_route_removes() {
    let (service, repository) = build_service();
    let employee = service
        .add_employee(new_employee("Sanne", "Montage"))
        .expect("employee added");
    let router = router_with_service(service);
    let uri = format!("/api/v1/employees/{}/assessment", employee.id);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({
                "family": "Montage",
                "answers": montage_answers(),
                "review_note": "agreed",
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["best_role_code"], "MON_5");
    assert_eq!(body["review_note"], "agreed");

    let response = router
        .oneshot(
            Request::delete(format!("/api/v1/employees/{}", employee.id))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(repository.employees.lock().expect("mutex").is_empty());
}

#[tokio::test]
async fn export_route_serves_csv() {
    let (service, _) = build_service();
    service
        .add_employee(new_employee("Jan", "Montage"))
        .expect("employee added");
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/export/employees.csv")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let csv = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(csv.starts_with("ID,Naam,Afdeling"));
    assert!(csv.contains(",Jan,Montage,"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn file_backed_routes_persist_between_requests() {
    let path = temp_data_file("routing-file");
    let service = GradingService::new(
        Arc::new(JsonFileRepository::new(&path)),
        GradingEngine::standard(),
    );
    let router = grading_router(Arc::new(service));

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/employees",
            json!({ "name": "Anouk", "department": "Montage" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = router
        .oneshot(
            Request::get("/api/v1/employees")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(listed.status(), StatusCode::OK);
    let body = read_json_body(listed).await;
    assert_eq!(body[0]["name"], "Anouk");
    assert!(path.exists());
}
