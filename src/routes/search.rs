use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{HealthResponse, PredictiveSearchRequest, SearchFiltersRequest, SearchRequest};
use crate::routes::{bad_request, upstream_error, AppState};
use crate::services::{predictive_search, search_filters, search_products};

/// Configure search and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search))
        .route("/search/filters", web::post().to(filters))
        .route("/search/predictive", web::post().to(predictive));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache_entries: state.storefront.cache().stats().await.total(),
        timestamp: chrono::Utc::now(),
    })
}

/// Product search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "searchTerm": "string",
///   "first": 24,
///   "endCursor": "string",
///   "filters": [{ "available": true }],
///   "sortKey": "RELEVANCE|PRICE",
///   "reverse": false
/// }
/// ```
async fn search(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }
    if req.search_term.trim().is_empty() {
        return bad_request("Validation failed", "searchTerm must not be blank".to_string());
    }

    tracing::info!("Searching products for {:?}", req.search_term);

    match search_products(&state.storefront, &req).await {
        Ok(response) => {
            tracing::debug!(
                "Search {:?} returned {} of {} products",
                req.search_term,
                response.products.len(),
                response.total_count
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            tracing::error!("Search failed for {:?}: {}", req.search_term, e);
            upstream_error("Search failed", &e)
        }
    }
}

/// Filter discovery endpoint
///
/// POST /api/v1/search/filters
async fn filters(
    state: web::Data<AppState>,
    req: web::Json<SearchFiltersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    if req.search_term.trim().is_empty() {
        return bad_request("Validation failed", "searchTerm must not be blank".to_string());
    }

    match search_filters(&state.storefront, &req).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Filter lookup failed for {:?}: {}", req.search_term, e);
            upstream_error("Filter lookup failed", &e)
        }
    }
}

/// Predictive search endpoint
///
/// POST /api/v1/search/predictive
///
/// Request body:
/// ```json
/// {
///   "searchTerm": "string",
///   "limit": 10,
///   "limitScope": "ALL|EACH",
///   "types": ["COLLECTION", "QUERY"]
/// }
/// ```
async fn predictive(
    state: web::Data<AppState>,
    req: web::Json<PredictiveSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    if req.search_term.trim().is_empty() {
        return bad_request("Validation failed", "searchTerm must not be blank".to_string());
    }

    match predictive_search(&state.storefront, &req).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Predictive search failed for {:?}: {}", req.search_term, e);
            upstream_error("Predictive search failed", &e)
        }
    }
}
