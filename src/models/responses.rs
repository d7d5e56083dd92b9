use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::models::domain::{AggregateAnalysis, MatchResult};

/// Response for the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub request_id: String,
    pub matches: Vec<MatchResult>,
    pub analysis: AggregateAnalysis,
    /// Number of grants scored, qualifying or not
    pub total_grants: usize,
}

/// Per-client entry of a batch analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAnalysisSummary {
    pub client_id: Option<String>,
    pub client_name: String,
    pub match_count: usize,
    pub top_score: Option<u8>,
    pub analysis: AggregateAnalysis,
}

/// Response for the batch analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalyzeResponse {
    pub request_id: String,
    pub results: Vec<ClientAnalysisSummary>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST.as_u16(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(ResponseError::status_code(self)).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let err = ErrorResponse::bad_request("invalid_json", "Invalid JSON: EOF");
        assert_eq!(err.to_string(), "invalid_json: Invalid JSON: EOF");
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);

        let err = ErrorResponse {
            status_code: 42,
            ..err
        };
        assert_eq!(ResponseError::status_code(&err), StatusCode::BAD_REQUEST);
    }
}
