use crate::config::FeedSettings;
use crate::models::requests::MAX_PAGE_SIZE;
use crate::models::{Connection, Product};
use crate::queries::PRODUCT_FEED_QUERY;
use crate::services::cache::CachePolicy;
use crate::services::storefront::{StorefrontClient, StorefrontError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ProductFeedVariables<'a> {
    first: u32,
    cursor: Option<&'a str>,
    country: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProductFeedData {
    products: Connection<Product>,
}

/// Walk the whole catalog one page at a time
///
/// Pages are requested sequentially, each continuing from the previous
/// page's `endCursor`, until the platform reports no next page. Products are
/// returned in catalog order. A failed page fails the whole walk.
pub async fn fetch_all_products(
    client: &StorefrontClient,
    settings: &FeedSettings,
) -> Result<Vec<Product>, StorefrontError> {
    let first = settings.page_size.clamp(1, MAX_PAGE_SIZE);
    let i18n = client.i18n();

    let mut products = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let variables = ProductFeedVariables {
            first,
            cursor: cursor.as_deref(),
            country: &i18n.country,
            language: &i18n.language,
        };

        let data: ProductFeedData = client
            .query(&PRODUCT_FEED_QUERY, &variables, CachePolicy::Short)
            .await?;
        pages += 1;

        let page_info = data.products.page_info.unwrap_or_default();
        tracing::debug!("Fetched feed page {} ({} products)", pages, data.products.nodes.len());
        products.extend(data.products.nodes);

        if !page_info.has_next_page {
            break;
        }

        match page_info.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                tracing::warn!("Page {} reports a next page but no end cursor; stopping", pages);
                break;
            }
        }

        if settings.max_pages.is_some_and(|max| pages >= max) {
            tracing::warn!("Stopping catalog walk at the configured limit of {} pages", pages);
            break;
        }
    }

    Ok(products)
}
