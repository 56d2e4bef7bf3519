use crate::models::requests::DEFAULT_SEARCH_PAGE_SIZE;
use crate::models::{
    PageInfo, PredictiveCollection, PredictiveQuery, PredictiveSearchLimitScope,
    PredictiveSearchRequest, PredictiveSearchResponse, PredictiveSearchType, Product, SearchFilter,
    SearchFiltersRequest, SearchFiltersResponse, SearchRequest, SearchResponse, SearchSortKey,
};
use crate::queries::{PREDICTIVE_SEARCH_QUERY, PRODUCTS_SEARCH_FILTERS_QUERY, PRODUCTS_SEARCH_QUERY};
use crate::services::cache::CachePolicy;
use crate::services::storefront::{I18n, StorefrontClient, StorefrontError};
use serde::{Deserialize, Serialize};

/// Variables for `ProductsSearch`
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchVariables<'a> {
    pub search_term: &'a str,
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub start_cursor: Option<&'a str>,
    pub end_cursor: Option<&'a str>,
    pub filters: &'a [serde_json::Value],
    pub sort_key: Option<SearchSortKey>,
    pub reverse: bool,
    pub country: String,
    pub language: String,
}

impl<'a> SearchVariables<'a> {
    pub fn from_request(req: &'a SearchRequest, i18n: &I18n) -> Self {
        let (country, language) = buyer_context(req.country.as_deref(), req.language.as_deref(), i18n);
        let first = match (req.first, req.last) {
            (None, None) => Some(DEFAULT_SEARCH_PAGE_SIZE),
            (first, _) => first,
        };

        Self {
            search_term: req.search_term.trim(),
            first,
            last: req.last,
            start_cursor: req.start_cursor.as_deref(),
            end_cursor: req.end_cursor.as_deref(),
            filters: &req.filters,
            sort_key: req.sort_key,
            reverse: req.reverse,
            country,
            language,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchFiltersVariables<'a> {
    search_term: &'a str,
    country: String,
    language: String,
}

/// Variables for `PredictiveSearch`
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveSearchVariables<'a> {
    pub search_term: &'a str,
    pub limit: u32,
    pub limit_scope: PredictiveSearchLimitScope,
    pub types: &'a [PredictiveSearchType],
    pub country: String,
    pub language: String,
}

impl<'a> PredictiveSearchVariables<'a> {
    pub fn from_request(req: &'a PredictiveSearchRequest, i18n: &I18n) -> Self {
        let (country, language) = buyer_context(req.country.as_deref(), req.language.as_deref(), i18n);

        Self {
            search_term: req.search_term.trim(),
            limit: req.limit,
            limit_scope: req.limit_scope,
            types: &req.types,
            country,
            language,
        }
    }
}

/// Request overrides win over the configured defaults; codes are upper-cased
fn buyer_context(country: Option<&str>, language: Option<&str>, i18n: &I18n) -> (String, String) {
    (
        country.map(str::to_uppercase).unwrap_or_else(|| i18n.country.clone()),
        language.map(str::to_uppercase).unwrap_or_else(|| i18n.language.clone()),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchConnection {
    #[serde(default)]
    nodes: Vec<Product>,
    #[serde(default)]
    filters: Vec<SearchFilter>,
    #[serde(default)]
    page_info: PageInfo,
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    search: SearchConnection,
}

#[derive(Debug, Deserialize)]
struct SearchFiltersData {
    search: SearchFiltersConnection,
}

#[derive(Debug, Deserialize)]
struct SearchFiltersConnection {
    #[serde(default)]
    filters: Vec<SearchFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictiveSearchData {
    predictive_search: Option<PredictiveResults>,
}

#[derive(Debug, Default, Deserialize)]
struct PredictiveResults {
    #[serde(default)]
    collections: Vec<PredictiveCollection>,
    #[serde(default)]
    queries: Vec<PredictiveQuery>,
}

/// Search products by term, with optional filters, sorting and cursor paging
pub async fn search_products(
    client: &StorefrontClient,
    req: &SearchRequest,
) -> Result<SearchResponse, StorefrontError> {
    let variables = SearchVariables::from_request(req, client.i18n());
    let data: SearchData = client
        .query(&PRODUCTS_SEARCH_QUERY, &variables, CachePolicy::Short)
        .await?;

    Ok(SearchResponse {
        products: data.search.nodes,
        filters: data.search.filters,
        page_info: data.search.page_info,
        total_count: data.search.total_count,
    })
}

/// Filters the platform offers for a term, without the matching products
pub async fn search_filters(
    client: &StorefrontClient,
    req: &SearchFiltersRequest,
) -> Result<SearchFiltersResponse, StorefrontError> {
    let (country, language) = buyer_context(req.country.as_deref(), req.language.as_deref(), client.i18n());
    let variables = SearchFiltersVariables {
        search_term: req.search_term.trim(),
        country,
        language,
    };

    let data: SearchFiltersData = client
        .query(&PRODUCTS_SEARCH_FILTERS_QUERY, &variables, CachePolicy::Long)
        .await?;

    Ok(SearchFiltersResponse {
        filters: data.search.filters,
    })
}

pub async fn predictive_search(
    client: &StorefrontClient,
    req: &PredictiveSearchRequest,
) -> Result<PredictiveSearchResponse, StorefrontError> {
    let variables = PredictiveSearchVariables::from_request(req, client.i18n());
    let data: PredictiveSearchData = client
        .query(&PREDICTIVE_SEARCH_QUERY, &variables, CachePolicy::Short)
        .await?;

    let results = data.predictive_search.unwrap_or_default();

    Ok(PredictiveSearchResponse {
        collections: results.collections,
        queries: results.queries,
    })
}
