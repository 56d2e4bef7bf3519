//! Storefront Feed - search proxy and shopping-ads feed for a hosted storefront
//!
//! This library wraps the commerce platform's Storefront GraphQL API. It
//! exposes product search, filter discovery and predictive search, and it
//! renders the whole catalog as an XML product feed.

pub mod config;
pub mod core;
pub mod models;
pub mod queries;
pub mod routes;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{escape_xml, parse_gid, render_feed, FeedOptions, RenderedFeed};
pub use crate::models::{Product, ProductVariant, SearchRequest, SearchResponse};
pub use crate::services::{fetch_all_products, QueryCache, StorefrontClient, StorefrontError};
