// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{LeadProfile, LeadScore};
pub use requests::{MultipleLeadsRequest, ProductDetails, SingleEvaluationRequest};
pub use responses::{ErrorResponse, HealthResponse, MultipleLeadsResponse, SingleLeadResponse};
