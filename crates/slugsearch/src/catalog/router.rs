use crate::catalog::categories::GeCategory;
use crate::catalog::filter::{AvailabilityFilter, ClassTypeFilter, FilterState};
use crate::catalog::freshness::time_ago;
use crate::catalog::repository::CatalogRepository;
use crate::catalog::service::{CatalogService, ServiceError};
use crate::client::{CatalogClient, ClientError};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Router builder exposing the catalog read endpoints.
pub fn catalog_router<R, C>(service: Arc<CatalogService<R, C>>) -> Router
where
    R: CatalogRepository + 'static,
    C: CatalogClient + 'static,
{
    Router::new()
        .route("/api/courses", get(courses_handler::<R, C>))
        .route("/api/courses/:degree", get(requirements_handler::<R, C>))
        .route("/api/degrees", get(degrees_handler::<R, C>))
        .route("/api/last_update", get(last_update_handler::<R, C>))
        .route("/api/classes", get(class_search_handler::<R, C>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CourseQuery {
    /// GE category code; omitted means the AnyGE wildcard.
    #[serde(default)]
    course: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    availability: Option<AvailabilityFilter>,
    #[serde(default)]
    class_type: Option<ClassTypeFilter>,
}

impl CourseQuery {
    fn filter_state(&self) -> FilterState {
        FilterState {
            search: self.search.clone().unwrap_or_default(),
            availability: self.availability.unwrap_or_default(),
            class_type: self.class_type.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassSearchQuery {
    q: String,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    availability: Option<AvailabilityFilter>,
    #[serde(default)]
    class_type: Option<ClassTypeFilter>,
}

pub(crate) async fn courses_handler<R, C>(
    State(service): State<Arc<CatalogService<R, C>>>,
    Query(query): Query<CourseQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CatalogClient + 'static,
{
    let category = match query.course.as_deref() {
        None => GeCategory::AnyGe,
        Some(code) => match GeCategory::from_code(code) {
            Some(category) => category,
            None => {
                let payload = json!({ "error": format!("unknown GE category '{code}'") });
                return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
            }
        },
    };

    match service.search(category, &query.filter_state()) {
        Ok(data) => (StatusCode::OK, Json(json!({ "data": data }))).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn requirements_handler<R, C>(
    State(service): State<Arc<CatalogService<R, C>>>,
    Path(degree): Path<String>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CatalogClient + 'static,
{
    match service.major_requirements(&degree) {
        Ok(Some(requirements)) => (StatusCode::OK, Json(requirements)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "Degree not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn degrees_handler<R, C>(
    State(service): State<Arc<CatalogService<R, C>>>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CatalogClient + 'static,
{
    match service.degrees() {
        Ok(degrees) => (StatusCode::OK, Json(degrees)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn last_update_handler<R, C>(
    State(service): State<Arc<CatalogService<R, C>>>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CatalogClient + 'static,
{
    match service.last_updated() {
        Ok(stamp) => {
            let payload = json!({
                "last_update": stamp,
                "freshness": time_ago(stamp, Utc::now()),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn class_search_handler<R, C>(
    State(service): State<Arc<CatalogService<R, C>>>,
    Query(query): Query<ClassSearchQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CatalogClient + 'static,
{
    if query.q.trim().is_empty() {
        let payload = json!({ "error": "missing search query" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let filter = FilterState {
        search: query.search.clone().unwrap_or_default(),
        availability: query.availability.unwrap_or_default(),
        class_type: query.class_type.unwrap_or_default(),
    };

    match service.class_search(&query.q, &filter).await {
        Ok(data) => (StatusCode::OK, Json(json!({ "data": data }))).into_response(),
        Err(err) => service_error_response(err),
    }
}

fn service_error_response(err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::Client(ClientError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Client(_) | ServiceError::RefreshFailed => StatusCode::BAD_GATEWAY,
        ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
