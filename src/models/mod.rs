// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AggregateAnalysis, Client, DeadlineStatus, FactorCaps, GeographicScope, Grant, GrantAnalysis,
    GrantSource, MatchResult, MatchScore, MatchThresholds, ScoreBreakdown, SourceSummary,
    SourceType, TimelineStep,
};
pub use requests::{AnalyzeRequest, BatchAnalyzeRequest, ScoreRequest};
pub use responses::{
    AnalyzeResponse, BatchAnalyzeResponse, ClientAnalysisSummary, ErrorResponse, HealthResponse,
};
