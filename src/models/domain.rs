//! Storefront API response shapes.
//!
//! Field names follow the platform's camelCase JSON. Everything that the
//! platform may omit or null out is optional or defaulted, so a sparse node
//! still deserializes.

use serde::{Deserialize, Serialize};

/// Relay-style connection; only `nodes` is requested, never `edges`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            page_info: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Decimal amount as the platform sends it, e.g. `"19.99"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub available_for_sale: bool,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_gift_card: bool,
    #[serde(default)]
    pub available_for_sale: Option<bool>,
    #[serde(default)]
    pub featured_image: Option<Image>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub variants: Connection<ProductVariant>,
}

/// Search facet, e.g. "Availability" or "Color"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(default)]
    pub values: Vec<FilterValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterValue {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub count: u64,
    /// JSON-encoded `ProductFilter` to send back when this value is selected
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swatch: Option<Swatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatch {
    #[serde(default)]
    pub color: Option<String>,
    /// Media image, passed through untouched
    #[serde(default)]
    pub image: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveCollection {
    #[serde(rename = "__typename", default)]
    pub typename: String,
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveQuery {
    #[serde(rename = "__typename", default)]
    pub typename: String,
    pub text: String,
    pub styled_text: String,
}

impl Product {
    /// Image used for a variant's item: the variant's own image, else the product's
    pub fn image_for<'a>(&'a self, variant: &'a ProductVariant) -> Option<&'a Image> {
        let usable = |image: &&Image| !image.url.is_empty();
        variant
            .image
            .as_ref()
            .filter(usable)
            .or_else(|| self.featured_image.as_ref().filter(usable))
    }
}
