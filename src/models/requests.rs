use serde::{Deserialize, Serialize};

use crate::models::domain::LeadProfile;

/// Product description payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    pub details: String,
}

/// Request to evaluate the relevancy of a product for one lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleEvaluationRequest {
    pub product: ProductDetails,
    pub lead: LeadProfile,
}

/// Request to evaluate the relevancy of a product for a batch of leads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultipleLeadsRequest {
    pub product_details: String,
    pub leads: Vec<LeadProfile>,
}
