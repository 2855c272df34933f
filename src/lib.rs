//! Lead Match - product-lead relevancy scoring service
//!
//! Scores how relevant a product is to a sales lead by prompting a hosted
//! LLM completion API with the product description and the lead's profile,
//! then parsing a bounded numeric score out of the free-text reply.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_relevancy_prompt, extract_score, RelevancyEvaluator, RetryPolicy};
pub use crate::models::{
    LeadProfile, LeadScore, MultipleLeadsRequest, MultipleLeadsResponse, ProductDetails,
    SingleEvaluationRequest, SingleLeadResponse,
};
pub use crate::services::{CompletionBackend, CompletionError, OpenAiClient};
