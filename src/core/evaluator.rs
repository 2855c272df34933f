use crate::core::{prompt::build_relevancy_prompt, retry::RetryPolicy, score::extract_score};
use crate::models::{LeadProfile, LeadScore};
use crate::services::{CompletionBackend, CompletionError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Scores product-lead fit through the completion backend
///
/// Constructed once at startup and shared across requests; holds no mutable
/// state. Completion failures never surface to callers: a lead whose
/// evaluation fails scores 0.0, indistinguishable from a genuinely poor
/// match, so one bad lead can never abort a batch.
#[derive(Clone)]
pub struct RelevancyEvaluator {
    backend: Arc<dyn CompletionBackend>,
    retry: RetryPolicy,
    lead_delay: Duration,
}

impl RelevancyEvaluator {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        retry: RetryPolicy,
        lead_delay: Duration,
    ) -> Self {
        Self {
            backend,
            retry,
            lead_delay,
        }
    }

    /// Invoke the completion backend, retrying transient failures
    ///
    /// Only rate-limit and upstream-API errors re-attempt; anything else
    /// propagates immediately. Exhausting the attempt cap propagates the
    /// last error.
    async fn invoke_with_retry(&self, prompt: &str) -> Result<String, CompletionError> {
        let mut attempt = 1;
        loop {
            match self.backend.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts() => {
                    warn!("Completion attempt {} failed, retrying after delay: {}", attempt, e);
                    tokio::time::sleep(self.retry.delay_before_retry(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Score one lead against a product description
    ///
    /// Returns a value in [0, 10]. Backend failures degrade to 0.0.
    pub async fn evaluate_lead(&self, product_details: &str, lead: &LeadProfile) -> f64 {
        let prompt = build_relevancy_prompt(product_details, lead);

        match self.invoke_with_retry(&prompt).await {
            Ok(text) => extract_score(&text),
            Err(e) => {
                error!("Failed to evaluate relevancy for lead {}: {}", lead.lead_id, e);
                0.0
            }
        }
    }

    /// Score an ordered batch of leads
    ///
    /// Leads are evaluated strictly sequentially with a pause between
    /// consecutive evaluations (none after the last) to stay under the
    /// completion API's rate limits. Output order matches input order.
    pub async fn evaluate_leads(
        &self,
        product_details: &str,
        leads: &[LeadProfile],
    ) -> Vec<LeadScore> {
        let mut results = Vec::with_capacity(leads.len());

        for (i, lead) in leads.iter().enumerate() {
            let score = self.evaluate_lead(product_details, lead).await;

            results.push(LeadScore {
                lead_id: lead.lead_id,
                relevance_score: score,
            });

            if i + 1 < leads.len() {
                tokio::time::sleep(self.lead_delay).await;
            }
        }

        results
    }
}
