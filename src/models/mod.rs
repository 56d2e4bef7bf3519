// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Connection, FilterValue, Image, Money, PageInfo, PredictiveCollection, PredictiveQuery,
    PriceRange, Product, ProductVariant, SearchFilter, SelectedOption, Swatch,
};
pub use requests::{
    PredictiveSearchLimitScope, PredictiveSearchRequest, PredictiveSearchType, SearchFiltersRequest,
    SearchRequest, SearchSortKey,
};
pub use responses::{
    ErrorResponse, HealthResponse, PredictiveSearchResponse, SearchFiltersResponse, SearchResponse,
};
