//! HTTP request handlers for the Lexis service.
//!
//! Implements record creation, lookup, deletion and the two filter
//! endpoints using axum. Every route is served with and without a
//! trailing slash.

use crate::error::ApiError;
use crate::response::{
    filters_to_json, FilteredResponse, HealthResponse, InterpretedQueryResponse, MessageResponse,
    NaturalLanguageResponse, RecordResponse,
};
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router as AxumRouter,
};
use lexis_analyzer::{analyze, build_structured_filter, interpret};
use lexis_domain::{AnalyzedRecord, InsertOutcome, RecordStore};
use lexis_store::StoreError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Record store shared by all handlers
pub type SharedStore = Arc<Mutex<dyn RecordStore<Error = StoreError> + Send>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub store: SharedStore,
}

impl AppState {
    /// Wrap a store for sharing across handlers
    pub fn new<S>(store: S) -> Self
    where
        S: RecordStore<Error = StoreError> + Send + 'static,
    {
        let store: SharedStore = Arc::new(Mutex::new(store));
        Self { store }
    }
}

fn to_responses(records: Vec<AnalyzedRecord>) -> Vec<RecordResponse> {
    records.into_iter().map(RecordResponse::from).collect()
}

/// Pull a non-empty string `value` out of a JSON request body
fn extract_value(body: &[u8]) -> Result<String, ApiError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| ApiError::MissingField)?;

    match payload.get("value") {
        None | Some(Value::Null) => Err(ApiError::MissingField),
        Some(Value::String(s)) if s.is_empty() => Err(ApiError::MissingField),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ApiError::InvalidType),
    }
}

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

/// GET / - List every record
async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<RecordResponse>>, ApiError> {
    let records = state.store.lock().await.list_all()?;
    Ok(Json(to_responses(records)))
}

/// POST /strings/ - Analyze and store a string
async fn create_string(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    let value = extract_value(&body)?;
    let properties = analyze(&value)?;
    let record = AnalyzedRecord::new(value, properties, now_millis());

    let outcome = state.store.lock().await.insert_if_absent(record.clone())?;
    match outcome {
        InsertOutcome::Inserted => {
            info!("Stored string {}", record.id());
            Ok((StatusCode::CREATED, Json(RecordResponse::from(record))))
        }
        InsertOutcome::AlreadyExists => {
            debug!("Rejected duplicate string {}", record.id());
            Err(ApiError::DuplicateContent)
        }
    }
}

/// GET /strings/ - Structured filter over query parameters
async fn filter_strings(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<FilteredResponse>, ApiError> {
    let filter = build_structured_filter(&params).inspect_err(|e| debug!("{}", e))?;
    let records = state.store.lock().await.filter(&filter.predicates())?;

    Ok(Json(FilteredResponse {
        count: records.len(),
        data: to_responses(records),
        filters_applied: filters_to_json(filter.applied()),
    }))
}

/// GET /strings/filter-by-natural-language/?query=... - Free-text filter
async fn natural_language_filter(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let query = params.get("query").map(String::as_str).unwrap_or_default();
    let interpreted = interpret(query)?;
    let records = state.store.lock().await.filter(&interpreted.predicates)?;

    if records.is_empty() {
        debug!("Query {:?} parsed but matched nothing", interpreted.original);
        return Err(ApiError::ParsedEmptyResult);
    }

    Ok(Json(NaturalLanguageResponse {
        count: records.len(),
        data: to_responses(records),
        interpreted_query: InterpretedQueryResponse {
            original: interpreted.original,
            parsed_filters: filters_to_json(interpreted.predicates.entries()),
        },
    }))
}

/// GET /strings/{value}/ - Fetch one record by exact value
async fn get_string(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let Path(value) = path?;
    let record = state
        .store
        .lock()
        .await
        .get_by_value(&value)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(RecordResponse::from(record)))
}

/// DELETE /strings/{value}/ - Remove one record by exact value
async fn delete_string(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(value) = path?;
    if !state.store.lock().await.delete_by_value(&value)? {
        return Err(ApiError::NotFound);
    }

    info!("Deleted string {:?}", value);
    Ok(Json(MessageResponse {
        message: "String successfully deleted".to_string(),
    }))
}

/// GET /health - Liveness probe
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let records = state.store.lock().await.count()?;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        records,
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(list_all))
        .route("/health", get(health_check))
        .route("/strings", get(filter_strings).post(create_string))
        .route("/strings/", get(filter_strings).post(create_string))
        .route(
            "/strings/filter-by-natural-language",
            get(natural_language_filter),
        )
        .route(
            "/strings/filter-by-natural-language/",
            get(natural_language_filter),
        )
        .route("/strings/:value", get(get_string).delete(delete_string))
        .route("/strings/:value/", get(get_string).delete(delete_string))
        .with_state(state)
}
