use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::{acme_fixture, build_service, service_with_totals, submission};
use crate::market::memory::InMemoryMarketRepository;
use crate::market::router::market_router;
use crate::market::service::MarketService;

fn router_for(service: MarketService<InMemoryMarketRepository>) -> axum::Router {
    market_router(Arc::new(service))
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn search_returns_total_and_joined_page() {
    let (service, _) = service_with_totals(&[550_000, 700_000]);
    let router = router_for(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/salaries/search?city=pune&limit=1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total"), Some(&json!(2)));
    assert_eq!(payload.get("limit"), Some(&json!(1)));

    let results = payload
        .get("results")
        .and_then(Value::as_array)
        .expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].get("company"), Some(&json!("Acme")));
    assert_eq!(results[0].get("location"), Some(&json!("Pune, Maharashtra")));
}

#[tokio::test]
async fn search_rejects_out_of_range_limit() {
    let (service, _) = service_with_totals(&[550_000]);
    let router = router_for(service);

    for query in ["limit=0", "limit=101"] {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/v1/salaries/search?{query}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        let payload = read_json_body(response).await;
        assert!(payload.get("error").is_some());
    }
}

#[tokio::test]
async fn duplicate_company_creation_conflicts() {
    let (service, _) = build_service();
    acme_fixture(&service);
    let router = router_for(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/companies")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "name": "Acme" })).expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn inconsistent_submission_is_unprocessable() {
    let (service, _) = build_service();
    let (company_id, role_id, location_id) = acme_fixture(&service);
    let router = router_for(service);

    let mut bad = submission(company_id, role_id, location_id);
    bad.total_compensation += 1;

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/salaries")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&bad).expect("serialize")))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("total compensation"));
}

#[tokio::test]
async fn valid_submission_is_created_and_searchable() {
    let (service, _) = build_service();
    let (company_id, role_id, location_id) = acme_fixture(&service);
    let router = router_for(service);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/salaries")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&submission(company_id, role_id, location_id))
                        .expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    assert_eq!(created.get("total_compensation"), Some(&json!(550_000)));

    let search = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/salaries/search")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    let payload = read_json_body(search).await;
    assert_eq!(payload.get("total"), Some(&json!(1)));
}

#[tokio::test]
async fn summary_stats_endpoint_reports_and_404s_when_empty() {
    let (service, _) = service_with_totals(&[10, 20, 30, 40, 50]);
    let router = router_for(service);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/stats/summary")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("mean"), Some(&json!(30.0)));
    assert_eq!(payload.get("median"), Some(&json!(30)));

    let empty = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/stats/summary?company=globex")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn location_stats_endpoint_averages_one_city() {
    let (service, _) = service_with_totals(&[100_000, 300_000]);
    let router = router_for(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/salaries/by-location/pune")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("location"), Some(&json!("Pune, Maharashtra")));
    assert_eq!(payload.get("count"), Some(&json!(2)));
    assert_eq!(payload.get("average"), Some(&json!(200_000.0)));
}

#[tokio::test]
async fn generate_endpoint_requires_seeded_populations() {
    let (service, _) = build_service();
    let router = router_for(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/admin/generate")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "count": 5 })).expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn generate_endpoint_reports_inserted_count() {
    let (service, _) = build_service();
    acme_fixture(&service);
    let router = router_for(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/admin/generate")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "count": 4 })).expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("inserted"), Some(&json!(4)));
}
