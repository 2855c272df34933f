use serde::{Deserialize, Serialize};

use crate::models::domain::LeadScore;

/// Response for the single-lead evaluation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleLeadResponse {
    pub lead_id: i64,
    pub relevance_score: f64,
    pub lead_name: String,
}

/// Response for the batch evaluation endpoint, order matching the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleLeadsResponse {
    pub results: Vec<LeadScore>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
