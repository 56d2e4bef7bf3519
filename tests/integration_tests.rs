// Integration tests against a mocked Storefront API

use actix_web::{test, web, App};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use std::sync::Arc;
use storefront_feed::config::{FeedSettings, I18nSettings, StorefrontSettings};
use storefront_feed::routes::{self, AppState};
use storefront_feed::services::{
    fetch_all_products, QueryCache, StorefrontClient, StorefrontError,
};

const GRAPHQL_PATH: &str = "/api/2024-10/graphql.json";
const TOKEN: &str = "test_token";

fn create_client(server: &ServerGuard) -> StorefrontClient {
    let settings = StorefrontSettings {
        store_domain: server.url(),
        api_version: "2024-10".to_string(),
        public_access_token: TOKEN.to_string(),
        primary_domain: None,
        timeout_secs: Some(5),
    };

    StorefrontClient::new(&settings, &I18nSettings::default(), QueryCache::new(100, 60, 3600))
        .expect("client")
}

fn create_state(server: &ServerGuard, feed: FeedSettings) -> AppState {
    AppState {
        storefront: Arc::new(create_client(server)),
        feed,
        primary_domain: Some("shop.test".to_string()),
    }
}

fn product_json(id: u64, handle: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{}", id),
        "title": format!("Product {}", id),
        "handle": handle,
        "vendor": "Acme",
        "productType": "Outerwear",
        "description": "Warm and dry",
        "isGiftCard": false,
        "featuredImage": { "url": format!("https://cdn.test/{}.png", id) },
        "variants": { "nodes": [{
            "id": format!("gid://shopify/ProductVariant/{}01", id),
            "sku": format!("SKU-{}", id),
            "availableForSale": true,
            "weight": 1.5,
            "weightUnit": "POUNDS",
            "price": { "amount": "25.0", "currencyCode": "USD" },
            "selectedOptions": [{ "name": "Size", "value": "M" }]
        }] }
    })
}

fn feed_page(nodes: Vec<Value>, has_next_page: bool, end_cursor: Option<&str>) -> String {
    json!({
        "data": {
            "products": {
                "nodes": nodes,
                "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor }
            }
        }
    })
    .to_string()
}

async fn mock_feed_page(server: &mut ServerGuard, cursor: Value, body: String) -> mockito::Mock {
    server
        .mock("POST", GRAPHQL_PATH)
        .match_header("x-shopify-storefront-access-token", TOKEN)
        .match_body(Matcher::PartialJson(json!({
            "operationName": "ProductFeed",
            "variables": { "cursor": cursor, "first": 250, "country": "US", "language": "EN" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

#[actix_web::test]
async fn test_fetch_all_products_follows_cursors() {
    let mut server = Server::new_async().await;
    let first = mock_feed_page(
        &mut server,
        Value::Null,
        feed_page(vec![product_json(1, "a"), product_json(2, "b")], true, Some("cursor-1")),
    )
    .await;
    let second = mock_feed_page(
        &mut server,
        json!("cursor-1"),
        feed_page(vec![product_json(3, "c")], false, Some("cursor-2")),
    )
    .await;

    let client = create_client(&server);
    let products = fetch_all_products(&client, &FeedSettings::default()).await.unwrap();

    let handles: Vec<&str> = products.iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, vec!["a", "b", "c"]);
    first.assert_async().await;
    second.assert_async().await;
}

#[actix_web::test]
async fn test_fetch_stops_without_end_cursor() {
    let mut server = Server::new_async().await;
    let page = mock_feed_page(
        &mut server,
        Value::Null,
        feed_page(vec![product_json(1, "a")], true, None),
    )
    .await;

    let client = create_client(&server);
    let products = fetch_all_products(&client, &FeedSettings::default()).await.unwrap();

    assert_eq!(products.len(), 1);
    page.assert_async().await;
}

#[actix_web::test]
async fn test_fetch_respects_max_pages() {
    let mut server = Server::new_async().await;
    let page = mock_feed_page(
        &mut server,
        Value::Null,
        feed_page(vec![product_json(1, "a")], true, Some("cursor-1")),
    )
    .await;

    let client = create_client(&server);
    let settings = FeedSettings {
        max_pages: Some(1),
        ..FeedSettings::default()
    };
    let products = fetch_all_products(&client, &settings).await.unwrap();

    assert_eq!(products.len(), 1);
    page.assert_async().await;
}

#[actix_web::test]
async fn test_repeated_queries_served_from_cache() {
    let mut server = Server::new_async().await;
    let page = mock_feed_page(
        &mut server,
        Value::Null,
        feed_page(vec![product_json(1, "a")], false, None),
    )
    .await;

    let client = create_client(&server);
    fetch_all_products(&client, &FeedSettings::default()).await.unwrap();
    let products = fetch_all_products(&client, &FeedSettings::default()).await.unwrap();

    assert_eq!(products.len(), 1);
    page.assert_async().await;
}

#[actix_web::test]
async fn test_http_error_is_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", GRAPHQL_PATH)
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let client = create_client(&server);
    let err = fetch_all_products(&client, &FeedSettings::default()).await.unwrap_err();

    match err {
        StorefrontError::ApiError(status, body) => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[actix_web::test]
async fn test_graphql_errors_without_data() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", GRAPHQL_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "errors": [{ "message": "Throttled" }] }).to_string())
        .create_async()
        .await;

    let client = create_client(&server);
    let err = fetch_all_products(&client, &FeedSettings::default()).await.unwrap_err();

    assert!(matches!(err, StorefrontError::GraphQlError(ref messages) if messages == &["Throttled".to_string()]));
}

#[actix_web::test]
async fn test_partial_data_returned_but_not_cached() {
    let mut server = Server::new_async().await;
    let body = json!({
        "data": {
            "products": {
                "nodes": [product_json(1, "a")],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            }
        },
        "errors": [{ "message": "Field 'weight' is deprecated" }]
    });
    let page = server
        .mock("POST", GRAPHQL_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(2)
        .create_async()
        .await;

    let client = create_client(&server);
    let first = fetch_all_products(&client, &FeedSettings::default()).await.unwrap();
    let second = fetch_all_products(&client, &FeedSettings::default()).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(client.cache().stats().await.total(), 0);
    page.assert_async().await;
}

#[actix_web::test]
async fn test_product_feed_route() {
    let mut server = Server::new_async().await;
    let mut gift_card = product_json(9, "gift-card");
    gift_card["isGiftCard"] = json!(true);

    mock_feed_page(
        &mut server,
        Value::Null,
        feed_page(vec![product_json(1, "rain-jacket"), gift_card], true, Some("cursor-1")),
    )
    .await;
    mock_feed_page(
        &mut server,
        json!("cursor-1"),
        feed_page(vec![product_json(2, "boots")], false, None),
    )
    .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(&server, FeedSettings::default())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/product-feed.xml").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get("content-type").unwrap(), "application/xml");
    assert_eq!(resp.headers().get("xml-version").unwrap(), "1.0");

    let body = test::read_body(resp).await;
    let xml = std::str::from_utf8(&body).unwrap();

    assert!(xml.contains("<link>https://shop.test</link>"));
    assert_eq!(xml.matches("<item>").count(), 2);
    assert!(xml.contains("<g:id>101</g:id>"));
    assert!(xml.contains("<g:id>201</g:id>"));
    assert!(!xml.contains("<g:id>901</g:id>"));
    assert!(xml.contains("<g:link>https://shop.test/products/boots?Size=M</g:link>"));
}

#[actix_web::test]
async fn test_product_feed_upstream_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", GRAPHQL_PATH)
        .with_status(503)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(&server, FeedSettings::default())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/product-feed.xml").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 502);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 502);
}

#[actix_web::test]
async fn test_search_route() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(Matcher::PartialJson(json!({
            "operationName": "ProductsSearch",
            "variables": { "searchTerm": "jacket", "first": 24, "sortKey": "PRICE" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": { "search": {
                    "nodes": [product_json(1, "rain-jacket")],
                    "filters": [{
                        "id": "filter.v.availability",
                        "label": "Availability",
                        "type": "LIST",
                        "values": [{
                            "id": "filter.v.availability.1",
                            "label": "In stock",
                            "count": 1,
                            "input": "{\"available\":true}"
                        }]
                    }],
                    "pageInfo": { "hasNextPage": false, "hasPreviousPage": false, "startCursor": "s", "endCursor": "e" },
                    "totalCount": 1
                } }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(&server, FeedSettings::default())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/search")
        .set_json(json!({ "searchTerm": "jacket", "sortKey": "PRICE" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["products"][0]["handle"], "rain-jacket");
    assert_eq!(body["filters"][0]["values"][0]["input"], "{\"available\":true}");
    assert_eq!(body["pageInfo"]["endCursor"], "e");
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_search_route_rejects_invalid_request() {
    let server = Server::new_async().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(&server, FeedSettings::default())))
            .configure(routes::configure_routes),
    )
    .await;

    for payload in [
        json!({ "searchTerm": "" }),
        json!({ "searchTerm": "   " }),
        json!({ "searchTerm": "jacket", "first": 10, "last": 10 }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/search")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }
}

#[actix_web::test]
async fn test_predictive_search_route() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(Matcher::PartialJson(json!({
            "operationName": "PredictiveSearch",
            "variables": { "searchTerm": "ja", "limit": 5, "limitScope": "EACH", "types": ["COLLECTION", "QUERY"] }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": { "predictiveSearch": {
                    "collections": [{
                        "__typename": "Collection",
                        "id": "gid://shopify/Collection/1",
                        "title": "Jackets",
                        "handle": "jackets",
                        "image": null
                    }],
                    "queries": [{
                        "__typename": "SearchQuerySuggestion",
                        "text": "jacket",
                        "styledText": "<mark>ja</mark>cket"
                    }]
                } }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(&server, FeedSettings::default())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/search/predictive")
        .set_json(json!({ "searchTerm": "ja", "limit": 5 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["collections"][0]["handle"], "jackets");
    assert_eq!(body["queries"][0]["styledText"], "<mark>ja</mark>cket");
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_health_route() {
    let server = Server::new_async().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(&server, FeedSettings::default())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cache_entries"], 0);
}

#[actix_web::test]
async fn test_search_filters_route() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(Matcher::PartialJson(json!({
            "operationName": "ProductsSearchFilters",
            "variables": { "searchTerm": "jacket", "country": "CA", "language": "EN" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": { "search": { "filters": [{
                    "id": "filter.p.vendor",
                    "label": "Brand",
                    "type": "LIST",
                    "values": [{ "id": "filter.p.vendor.acme", "label": "Acme", "count": 3, "input": "{\"productVendor\":\"Acme\"}" }]
                }] } }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let state = create_state(&server, FeedSettings::default());
    let storefront = state.storefront.clone();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/search/filters")
            .set_json(json!({ "searchTerm": "jacket", "country": "ca" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["filters"][0]["label"], "Brand");
        assert_eq!(body["filters"][0]["values"][0]["count"], 3);
    }

    // Filter definitions live in the long tier; the second request never reaches the API
    let stats = storefront.cache().stats().await;
    assert_eq!(stats.long_entries, 1);
    assert_eq!(stats.short_entries, 0);
    mock.assert_async().await;
}
