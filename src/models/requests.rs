use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Client, Grant, GrantSource};

/// Request to analyze one client against a set of grant sources
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[validate(nested)]
    #[serde(default)]
    pub client: Option<Client>,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub sources: Vec<GrantSource>,
}

/// Request to score a single client/grant/source triple
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[validate(nested)]
    pub client: Client,
    pub source: GrantSource,
    pub grant: Grant,
}

/// Request to analyze several clients against the same sources
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalyzeRequest {
    #[validate(length(min = 1, max = 100))]
    #[validate(nested)]
    pub clients: Vec<Client>,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub sources: Vec<GrantSource>,
}
