use crate::config::{I18nSettings, StorefrontSettings};
use crate::queries::GraphqlDocument;
use crate::services::cache::{CacheKey, CachePolicy, QueryCache};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the Storefront API
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {0}: {1}")]
    ApiError(StatusCode, String),

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQlError(Vec<String>),

    #[error("Response contained no data")]
    MissingData,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Default buyer context applied through `@inContext`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I18n {
    pub country: String,
    pub language: String,
}

impl From<&I18nSettings> for I18n {
    fn from(settings: &I18nSettings) -> Self {
        Self {
            country: settings.country.to_uppercase(),
            language: settings.language.to_uppercase(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a> {
    query: String,
    variables: &'a Value,
    operation_name: &'a str,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// Storefront API client
///
/// Sends GraphQL documents to the shop's public Storefront endpoint and
/// caches responses according to the caller's [`CachePolicy`].
pub struct StorefrontClient {
    endpoint: String,
    access_token: String,
    client: Client,
    cache: QueryCache,
    i18n: I18n,
}

impl StorefrontClient {
    /// Create a new Storefront client
    pub fn new(
        settings: &StorefrontSettings,
        i18n: &I18nSettings,
        cache: QueryCache,
    ) -> Result<Self, StorefrontError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.unwrap_or(30)))
            .build()?;

        Ok(Self {
            endpoint: endpoint_url(&settings.store_domain, &settings.api_version),
            access_token: settings.public_access_token.clone(),
            client,
            cache,
            i18n: I18n::from(i18n),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Run a GraphQL document and deserialize its `data` object
    pub async fn query<T, V>(
        &self,
        document: &GraphqlDocument,
        variables: &V,
        policy: CachePolicy,
    ) -> Result<T, StorefrontError>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let variables = serde_json::to_value(variables)
            .map_err(|e| StorefrontError::InvalidResponse(format!("Unserializable variables: {}", e)))?;
        let cache_key = CacheKey::query(document.name, &variables);

        if let Ok(data) = self.cache.get::<Value>(policy, &cache_key).await {
            tracing::debug!("Serving {} from cache", document.name);
            return decode_data(document.name, data);
        }

        tracing::debug!("Querying Storefront API: {}", document.name);

        let body = GraphqlRequest {
            query: document.render(),
            variables: &variables,
            operation_name: document.name,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Shopify-Storefront-Access-Token", &self.access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Storefront API {} failed: {} - {}", document.name, status, body);
            return Err(StorefrontError::ApiError(status, body));
        }

        let payload: GraphqlResponse = response.json().await?;
        let messages: Vec<String> = payload.errors.into_iter().map(|e| e.message).collect();

        let data = match payload.data {
            Some(Value::Null) | None if !messages.is_empty() => {
                return Err(StorefrontError::GraphQlError(messages));
            }
            Some(Value::Null) | None => return Err(StorefrontError::MissingData),
            Some(data) => data,
        };

        if !messages.is_empty() {
            tracing::warn!(
                "Storefront API {} returned partial data with errors: {}",
                document.name,
                messages.join("; ")
            );
        } else if let Err(e) = self.cache.set(policy, &cache_key, &data).await {
            tracing::warn!("Failed to cache {}: {}", document.name, e);
        }

        decode_data(document.name, data)
    }
}

fn decode_data<T: DeserializeOwned>(operation: &str, data: Value) -> Result<T, StorefrontError> {
    serde_json::from_value(data).map_err(|e| {
        StorefrontError::InvalidResponse(format!("Failed to parse {} response: {}", operation, e))
    })
}

/// GraphQL endpoint for a shop domain; `https` unless the domain carries a scheme
pub fn endpoint_url(store_domain: &str, api_version: &str) -> String {
    let domain = store_domain.trim().trim_end_matches('/');
    let base = if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    };

    format!("{}/api/{}/graphql.json", base, api_version)
}
