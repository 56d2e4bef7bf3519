use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Largest page the Storefront API accepts for connections
pub const MAX_PAGE_SIZE: u32 = 250;

/// Page size used when a search request names neither `first` nor `last`
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchSortKey {
    Relevance,
    Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictiveSearchLimitScope {
    All,
    #[default]
    Each,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictiveSearchType {
    Article,
    Collection,
    Page,
    Product,
    Query,
}

/// Request to search products
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_page_window"))]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 512))]
    pub search_term: String,
    #[validate(range(min = 1, max = 250))]
    pub first: Option<u32>,
    #[validate(range(min = 1, max = 250))]
    pub last: Option<u32>,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    /// `ProductFilter` inputs, usually the `input` of a previously returned filter value
    #[serde(default)]
    pub filters: Vec<serde_json::Value>,
    pub sort_key: Option<SearchSortKey>,
    #[serde(default)]
    pub reverse: bool,
    #[validate(length(equal = 2))]
    pub country: Option<String>,
    #[validate(length(min = 2, max = 5))]
    pub language: Option<String>,
}

/// `first` pages forward from `endCursor`, `last` pages backward from `startCursor`
fn validate_page_window(req: &SearchRequest) -> Result<(), ValidationError> {
    if req.first.is_some() && req.last.is_some() {
        return Err(ValidationError::new("first_and_last"));
    }
    if req.last.is_some() && req.end_cursor.is_some() {
        return Err(ValidationError::new("last_with_end_cursor"));
    }
    Ok(())
}

/// Request to list the filters available for a search term
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchFiltersRequest {
    #[validate(length(min = 1, max = 512))]
    pub search_term: String,
    #[validate(length(equal = 2))]
    pub country: Option<String>,
    #[validate(length(min = 2, max = 5))]
    pub language: Option<String>,
}

/// Request for predictive (search-as-you-type) results
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveSearchRequest {
    #[validate(length(min = 1, max = 512))]
    pub search_term: String,
    #[serde(default = "default_predictive_limit")]
    #[validate(range(min = 1, max = 250))]
    pub limit: u32,
    #[serde(default)]
    pub limit_scope: PredictiveSearchLimitScope,
    #[serde(default = "default_predictive_types")]
    pub types: Vec<PredictiveSearchType>,
    #[validate(length(equal = 2))]
    pub country: Option<String>,
    #[validate(length(min = 2, max = 5))]
    pub language: Option<String>,
}

fn default_predictive_limit() -> u32 {
    10
}

fn default_predictive_types() -> Vec<PredictiveSearchType> {
    vec![PredictiveSearchType::Collection, PredictiveSearchType::Query]
}
