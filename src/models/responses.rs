use serde::{Deserialize, Serialize};
use crate::models::domain::{PageInfo, PredictiveCollection, PredictiveQuery, Product, SearchFilter};

/// Response for the product search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub filters: Vec<SearchFilter>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFiltersResponse {
    pub filters: Vec<SearchFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictiveSearchResponse {
    pub collections: Vec<PredictiveCollection>,
    pub queries: Vec<PredictiveQuery>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache_entries: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
