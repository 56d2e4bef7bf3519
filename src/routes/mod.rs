// Route exports
pub mod feed;
pub mod search;

use crate::config::FeedSettings;
use crate::models::ErrorResponse;
use crate::services::{StorefrontClient, StorefrontError};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<StorefrontClient>,
    pub feed: FeedSettings,
    pub primary_domain: Option<String>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(feed::configure).service(
        web::scope("/api/v1")
            .configure(search::configure),
    );
}

pub(crate) fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Upstream Storefront failures map to 502
pub(crate) fn upstream_error(error: &str, err: &StorefrontError) -> HttpResponse {
    HttpResponse::BadGateway().json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: 502,
    })
}
