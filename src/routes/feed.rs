use actix_web::{web, HttpRequest, HttpResponse, Responder};
use crate::core::{render_feed, resolve_site_url, FeedOptions};
use crate::routes::{upstream_error, AppState};
use crate::services::fetch_all_products;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/product-feed.xml", web::get().to(product_feed));
}

/// Shopping-ads product feed
///
/// GET /product-feed.xml
///
/// Walks every catalog page before rendering, so the response reflects the
/// whole catalog or fails as a whole.
async fn product_feed(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let site_url = {
        let conn = req.connection_info();
        resolve_site_url(state.primary_domain.as_deref(), conn.scheme(), conn.host())
    };

    let products = match fetch_all_products(&state.storefront, &state.feed).await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!("Failed to fetch catalog for product feed: {}", e);
            return upstream_error("Failed to fetch catalog", &e);
        }
    };

    let options = FeedOptions {
        description_max_chars: state.feed.description_max_chars,
    };
    let feed = render_feed(&products, &site_url, &options);

    tracing::info!(
        "Rendered product feed for {}: {} products, {} items ({} excluded, {} failed)",
        site_url,
        products.len(),
        feed.items,
        feed.excluded_products,
        feed.failed_products
    );

    HttpResponse::Ok()
        .content_type("application/xml")
        .insert_header(("xml-version", "1.0"))
        .insert_header(("encoding", "UTF-8"))
        .body(feed.xml)
}
