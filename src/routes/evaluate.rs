use crate::core::RelevancyEvaluator;
use crate::models::{
    HealthResponse, MultipleLeadsRequest, MultipleLeadsResponse, SingleEvaluationRequest,
    SingleLeadResponse,
};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<RelevancyEvaluator>,
}

/// Configure all evaluation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/evaluate-single", web::post().to(evaluate_single))
        .route("/evaluate-multiple", web::post().to(evaluate_multiple));
}

/// Health check endpoint
///
/// Never touches the completion service.
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Evaluate the relevancy of a product for a single lead
///
/// POST /evaluate-single
///
/// Request body:
/// ```json
/// {
///   "product": {"details": "string"},
///   "lead": {
///     "name": "string",
///     "lead_id": 1,
///     "experience": "string",
///     "education": "string",
///     "company": "string",
///     "company_overview": "string",
///     "company_industry": "string"
///   }
/// }
/// ```
async fn evaluate_single(
    state: web::Data<AppState>,
    req: web::Json<SingleEvaluationRequest>,
) -> impl Responder {
    tracing::info!("Evaluating product relevancy for lead {}", req.lead.lead_id);

    let score = state
        .evaluator
        .evaluate_lead(&req.product.details, &req.lead)
        .await;

    HttpResponse::Ok().json(SingleLeadResponse {
        lead_id: req.lead.lead_id,
        relevance_score: score,
        lead_name: req.lead.name.clone(),
    })
}

/// Evaluate the relevancy of a product for multiple leads
///
/// POST /evaluate-multiple
///
/// Request body:
/// ```json
/// {
///   "product_details": "string",
///   "leads": [{"name": "string", "lead_id": 1, ...}]
/// }
/// ```
async fn evaluate_multiple(
    state: web::Data<AppState>,
    req: web::Json<MultipleLeadsRequest>,
) -> impl Responder {
    tracing::info!("Evaluating product relevancy for {} leads", req.leads.len());

    let results = state
        .evaluator
        .evaluate_leads(&req.product_details, &req.leads)
        .await;

    HttpResponse::Ok().json(MultipleLeadsResponse { results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RetryPolicy;
    use crate::models::LeadProfile;
    use crate::routes;
    use crate::services::{CompletionBackend, CompletionError};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Backend that always answers with the same text
    struct StaticBackend(&'static str);

    #[async_trait]
    impl CompletionBackend for StaticBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            Ok(self.0.to_string())
        }
    }

    /// Backend that always fails permanently
    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            Err(CompletionError::Unauthorized)
        }
    }

    fn app_state(backend: Arc<dyn CompletionBackend>) -> AppState {
        AppState {
            evaluator: Arc::new(RelevancyEvaluator::new(
                backend,
                RetryPolicy::new(
                    3,
                    Duration::from_millis(1),
                    Duration::from_millis(5),
                    Duration::from_millis(1),
                ),
                Duration::from_millis(1),
            )),
        }
    }

    fn single_request_body() -> serde_json::Value {
        serde_json::json!({
            "product": {"details": "AI-powered sales automation platform"},
            "lead": {
                "name": "John Doe",
                "lead_id": 7,
                "experience": "VP of Sales",
                "education": "MBA",
                "company": "Acme Corp",
                "company_overview": "B2B SaaS vendor",
                "company_industry": "Software"
            }
        })
    }

    #[actix_web::test]
    async fn test_health_is_independent_of_backend() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new(FailingBackend))))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
    }

    #[actix_web::test]
    async fn test_evaluate_single_returns_score_and_name() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new(StaticBackend("7.5")))))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/evaluate-single")
            .set_json(single_request_body())
            .to_request();
        let body: SingleLeadResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.lead_id, 7);
        assert_eq!(body.relevance_score, 7.5);
        assert_eq!(body.lead_name, "John Doe");
    }

    #[actix_web::test]
    async fn test_evaluate_single_absorbs_backend_failure() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new(FailingBackend))))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/evaluate-single")
            .set_json(single_request_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: SingleLeadResponse = test::read_body_json(resp).await;
        assert_eq!(body.relevance_score, 0.0);
    }

    #[actix_web::test]
    async fn test_evaluate_multiple_preserves_order() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new(StaticBackend("5.0")))))
                .configure(configure),
        )
        .await;

        let leads: Vec<LeadProfile> = [3, 1, 2]
            .iter()
            .map(|&lead_id| LeadProfile {
                name: format!("Lead {}", lead_id),
                lead_id,
                experience: "Analyst".to_string(),
                education: "BSc".to_string(),
                company: "Initech".to_string(),
                company_overview: "Enterprise software".to_string(),
                company_industry: "Software".to_string(),
            })
            .collect();

        let req = test::TestRequest::post()
            .uri("/evaluate-multiple")
            .set_json(serde_json::json!({
                "product_details": "sales platform",
                "leads": leads,
            }))
            .to_request();
        let body: MultipleLeadsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.results.len(), 3);
        assert_eq!(body.results[0].lead_id, 3);
        assert_eq!(body.results[1].lead_id, 1);
        assert_eq!(body.results[2].lead_id, 2);
        assert!(body.results.iter().all(|r| r.relevance_score == 5.0));
    }

    #[actix_web::test]
    async fn test_evaluate_multiple_accepts_empty_batch() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new(StaticBackend("5.0")))))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/evaluate-multiple")
            .set_json(serde_json::json!({
                "product_details": "sales platform",
                "leads": [],
            }))
            .to_request();
        let body: MultipleLeadsResponse = test::call_and_read_body_json(&app, req).await;

        assert!(body.results.is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_json_is_rejected_with_detail() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new(StaticBackend("5.0")))))
                .app_data(
                    web::JsonConfig::default()
                        .error_handler(routes::handle_json_payload_error),
                )
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/evaluate-single")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
        let body: crate::models::ErrorResponse = test::read_body_json(resp).await;
        assert!(body.detail.contains("Invalid JSON"));
    }

    #[actix_web::test]
    async fn test_missing_lead_field_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new(StaticBackend("5.0")))))
                .app_data(
                    web::JsonConfig::default()
                        .error_handler(routes::handle_json_payload_error),
                )
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/evaluate-single")
            .set_json(serde_json::json!({
                "product": {"details": "platform"},
                "lead": {"name": "John Doe", "lead_id": 7}
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
    }
}
