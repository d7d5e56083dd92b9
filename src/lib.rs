//! Grant Match - client/grant compatibility scoring for Grant Funds
//!
//! This library scores grantee organizations against funder opportunities.
//! Each grant gets a 0-100 score broken down into category, budget,
//! geographic, population and experience factors, along with reasons,
//! a suggested timeline and next steps.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{extract_max_amount, overlap, Matcher};
pub use models::{
    AggregateAnalysis, Client, Grant, GrantAnalysis, GrantSource, MatchResult, MatchScore,
};
