// Route exports
pub mod matches;

use actix_web::{error, web, HttpRequest};

use crate::models::ErrorResponse;

/// Request bodies above this size are rejected before deserialization
const JSON_LIMIT: usize = 4 * 1024 * 1024;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(matches::configure));
}

/// JSON extractor settings: size limit and a structured 400 for bad payloads
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(handle_json_payload_error)
}

fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::bad_request("invalid_json", format!("Invalid JSON: {err}")).into()
}
