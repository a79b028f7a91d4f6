use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{NewCompany, NewLocation, NewRole, RecordSubmission};
use super::query::{PageRequest, RecordFilter};
use super::repository::MarketRepository;
use super::service::{MarketError, MarketService};

/// Router builder exposing HTTP endpoints for search, statistics, intake,
/// and the offline generate primitive.
pub fn market_router<R>(service: Arc<MarketService<R>>) -> Router
where
    R: MarketRepository + 'static,
{
    Router::new()
        .route("/api/v1/salaries/search", get(search_handler::<R>))
        .route("/api/v1/salaries", post(submit_record_handler::<R>))
        .route(
            "/api/v1/salaries/by-location/:city",
            get(location_stats_handler::<R>),
        )
        .route("/api/v1/stats/summary", get(summary_stats_handler::<R>))
        .route("/api/v1/companies", post(create_company_handler::<R>))
        .route("/api/v1/roles", post(create_role_handler::<R>))
        .route("/api/v1/locations", post(create_location_handler::<R>))
        .route("/api/v1/admin/generate", post(generate_handler::<R>))
        .with_state(service)
}

/// Flat query-string shape for search; parameter names follow the public
/// search API (min_salary/max_salary bound total compensation).
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    company: Option<String>,
    city: Option<String>,
    role: Option<String>,
    min_salary: Option<u64>,
    max_salary: Option<u64>,
    min_experience: Option<u8>,
    max_experience: Option<u8>,
    employment_type: Option<String>,
    is_remote: Option<bool>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl SearchParams {
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            company: self.company.clone(),
            city: self.city.clone(),
            role: self.role.clone(),
            min_total: self.min_salary,
            max_total: self.max_salary,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            employment_type: self.employment_type.clone(),
            is_remote: self.is_remote,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRequest {
    count: usize,
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    R: MarketRepository + 'static,
{
    let page = match PageRequest::from_optional(params.limit, params.offset) {
        Ok(page) => page,
        Err(violation) => return error_response(MarketError::InvalidQuery(violation)),
    };

    match service.search(&params.filter(), page) {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_stats_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    R: MarketRepository + 'static,
{
    match service.aggregate(&params.filter()) {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn location_stats_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Path(city): Path<String>,
) -> Response
where
    R: MarketRepository + 'static,
{
    match service.location_average(&city) {
        Ok(average) => (StatusCode::OK, Json(average)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_record_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Json(submission): Json<RecordSubmission>,
) -> Response
where
    R: MarketRepository + 'static,
{
    match service.submit_record(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_company_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Json(submission): Json<NewCompany>,
) -> Response
where
    R: MarketRepository + 'static,
{
    match service.create_company(submission) {
        Ok(company) => (StatusCode::CREATED, Json(company)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_role_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Json(submission): Json<NewRole>,
) -> Response
where
    R: MarketRepository + 'static,
{
    match service.create_role(submission) {
        Ok(role) => (StatusCode::CREATED, Json(role)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_location_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Json(submission): Json<NewLocation>,
) -> Response
where
    R: MarketRepository + 'static,
{
    match service.create_location(submission) {
        Ok(location) => (StatusCode::CREATED, Json(location)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn generate_handler<R>(
    State(service): State<Arc<MarketService<R>>>,
    Json(request): Json<GenerateRequest>,
) -> Response
where
    R: MarketRepository + 'static,
{
    match service.generate(request.count) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MarketError) -> Response {
    let status = match &error {
        MarketError::Validation(_)
        | MarketError::Referential { .. }
        | MarketError::EmptyPopulation => StatusCode::UNPROCESSABLE_ENTITY,
        MarketError::DuplicateEntity { .. } => StatusCode::CONFLICT,
        MarketError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        MarketError::NoDataAvailable => StatusCode::NOT_FOUND,
        MarketError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
