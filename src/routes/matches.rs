use actix_web::{web, HttpResponse, Responder, ResponseError};
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, BatchAnalyzeRequest, BatchAnalyzeResponse,
    ClientAnalysisSummary, ErrorResponse, GrantAnalysis, HealthResponse, ScoreRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/analyze", web::post().to(analyze))
        .route("/matches/analyze/batch", web::post().to(analyze_batch))
        .route("/matches/score", web::post().to(score));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    ErrorResponse::bad_request("Validation failed", errors.to_string()).error_response()
}

/// Analyze one client against a set of grant sources
///
/// POST /api/v1/matches/analyze
///
/// Request body:
/// ```json
/// {
///   "client": { "name": "string", "category": "Education", "budget": 200000, ... },
///   "sources": [{ "name": "string", "type": "private_foundation", "grants": [...] }]
/// }
/// ```
async fn analyze(state: web::Data<AppState>, req: web::Json<AnalyzeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for analyze request: {:?}", errors);
        return validation_failed(errors);
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let total_grants: usize = req.sources.iter().map(|s| s.grants.len()).sum();

    let result = match &req.client {
        Some(client) => {
            tracing::info!(
                "Analyzing client {} against {} sources ({} grants), request {}",
                client.name,
                req.sources.len(),
                total_grants,
                request_id
            );
            state.matcher.analyze(client, &req.sources)
        }
        None => {
            tracing::warn!(
                "Analyze request {} has no client, returning empty analysis",
                request_id
            );
            GrantAnalysis::empty()
        }
    };

    tracing::info!(
        "Returning {} matches (from {} grants) for request {}",
        result.matches.len(),
        total_grants,
        request_id
    );

    HttpResponse::Ok().json(AnalyzeResponse {
        request_id,
        matches: result.matches,
        analysis: result.analysis,
        total_grants,
    })
}

/// Score a single client/grant/source triple
///
/// POST /api/v1/matches/score
async fn score(state: web::Data<AppState>, req: web::Json<ScoreRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let score = state.matcher.score(&req.client, &req.grant, &req.source);

    tracing::debug!(
        "Scored grant '{}' for {}: {}",
        req.grant.title,
        req.client.name,
        score.total
    );

    HttpResponse::Ok().json(score)
}

/// Analyze several clients against the same sources
///
/// POST /api/v1/matches/analyze/batch
async fn analyze_batch(
    state: web::Data<AppState>,
    req: web::Json<BatchAnalyzeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let today = chrono::Utc::now().date_naive();
    let req = req.into_inner();

    let results = state
        .matcher
        .analyze_batch_at(&req.clients, &req.sources, today)
        .into_iter()
        .zip(&req.clients)
        .map(|(result, client)| ClientAnalysisSummary {
            client_id: client.id.clone(),
            client_name: client.name.clone(),
            match_count: result.matches.len(),
            top_score: result.matches.first().map(|m| m.match_score.total),
            analysis: result.analysis,
        })
        .collect::<Vec<_>>();

    tracing::info!("Batch analysis {} covered {} clients", request_id, results.len());

    HttpResponse::Ok().json(BatchAnalyzeResponse { request_id, results })
}
