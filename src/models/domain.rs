use serde::{Deserialize, Serialize};

/// A sales prospect profile scored against a product
///
/// `lead_id` is caller-assigned and only meaningful within one request
/// batch; nothing is persisted between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadProfile {
    pub name: String,
    pub lead_id: i64,
    pub experience: String,
    pub education: String,
    pub company: String,
    pub company_overview: String,
    pub company_industry: String,
}

/// Per-lead scoring result for the batch path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadScore {
    pub lead_id: i64,
    pub relevance_score: f64,
}
