//! API error taxonomy and its HTTP mapping

use crate::response::ErrorResponse;
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use lexis_analyzer::{AnalyzeError, QueryError};
use lexis_store::StoreError;
use thiserror::Error;
use tracing::{debug, error};

/// Every user-facing failure of the HTTP API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not JSON, or `value` is missing, null or empty
    #[error("Invalid request body or missing 'value' field")]
    MissingField,

    /// `value` is present but not a string
    #[error("Invalid data type for 'value' (must be string)")]
    InvalidType,

    /// A record with the same content hash exists
    #[error("String has already been analyzed")]
    DuplicateContent,

    /// Path segment could not be decoded
    #[error("Invalid string value in request path")]
    InvalidPath,

    /// No record with the requested value
    #[error("String does not exist in the system")]
    NotFound,

    /// A structured filter parameter failed validation
    #[error("Invalid query parameter values or types")]
    InvalidQueryParameter,

    /// No trigger phrase matched
    #[error("Unable to parse natural language query")]
    UnparseableQuery,

    /// Triggers matched but no record satisfies them
    #[error("Query parsed but resulted in no matches.")]
    ParsedEmptyResult,

    /// Unexpected store failure; detail is logged, not returned
    #[error("An unexpected error occurred")]
    InternalError(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField => StatusCode::BAD_REQUEST,
            ApiError::InvalidType => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DuplicateContent => StatusCode::CONFLICT,
            ApiError::InvalidPath => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidQueryParameter => StatusCode::BAD_REQUEST,
            ApiError::UnparseableQuery => StatusCode::BAD_REQUEST,
            ApiError::ParsedEmptyResult => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::InternalError(detail) = &self {
            error!("Internal error: {}", detail);
        }

        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Rejected path: {}", rejection.body_text());
        ApiError::InvalidPath
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::InternalError(e.to_string())
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(e: AnalyzeError) -> Self {
        match e {
            AnalyzeError::EmptyValue => ApiError::MissingField,
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidParameter { .. } => ApiError::InvalidQueryParameter,
            QueryError::Unparseable(_) => ApiError::UnparseableQuery,
        }
    }
}
