use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use storefront_feed::config::{LoggingSettings, Settings};
use storefront_feed::routes::{self, AppState};
use storefront_feed::services::{QueryCache, StorefrontClient};
use storefront_feed::telemetry;
use tracing::{info, error};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => {
            telemetry::init(&settings.logging);
            settings
        }
        Err(e) => {
            telemetry::init(&LoggingSettings::default());
            return Err(startup_error("Failed to load configuration", e));
        }
    };

    info!("Starting storefront feed service...");

    let cache = QueryCache::new(
        settings.cache.max_entries,
        settings.cache.short_ttl_secs,
        settings.cache.long_ttl_secs,
    );

    info!(
        "Query cache initialized ({} entries, short TTL: {}s, long TTL: {}s)",
        settings.cache.max_entries, settings.cache.short_ttl_secs, settings.cache.long_ttl_secs
    );

    let storefront = StorefrontClient::new(&settings.storefront, &settings.i18n, cache)
        .map_err(|e| startup_error("Failed to create Storefront client", e))?;

    info!(
        "Storefront client initialized for {} ({}/{})",
        storefront.endpoint(),
        storefront.i18n().country,
        storefront.i18n().language
    );

    let app_state = AppState {
        storefront: Arc::new(storefront),
        feed: settings.feed.clone(),
        primary_domain: settings.storefront.primary_domain.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
