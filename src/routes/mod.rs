// Route exports
pub mod evaluate;

use crate::models::ErrorResponse;
use actix_web::{error, http::StatusCode, web, HttpResponse};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(evaluate::configure);
}

/// Error carrying the `{detail}` wire shape
#[derive(Debug)]
pub struct DetailError {
    pub detail: String,
    pub status_code: u16,
}

impl std::fmt::Display for DetailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for DetailError {}

impl error::ResponseError for DetailError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .json(ErrorResponse {
            detail: self.detail.clone(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    DetailError {
        detail: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}
