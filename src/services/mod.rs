// Service exports
pub mod cache;
pub mod catalog;
pub mod search;
pub mod storefront;

pub use cache::{CacheError, CacheKey, CachePolicy, CacheStats, QueryCache};
pub use catalog::fetch_all_products;
pub use search::{predictive_search, search_filters, search_products};
pub use storefront::{I18n, StorefrontClient, StorefrontError};
