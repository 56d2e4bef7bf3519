//! Shopping-ads product feed.
//!
//! Renders the catalog as an RSS 2.0 document whose items use the Google
//! Merchant `g:` namespace. Each purchasable variant becomes one `<item>`;
//! variants of the same product share a `g:item_group_id`.

use crate::core::gid::{parse_gid, GidError};
use crate::core::xml::{escape_xml, find_illegal_char, is_valid_tag_name};
use std::borrow::Cow;
use crate::models::{Product, ProductVariant, SelectedOption};
use thiserror::Error;

pub const GOOGLE_MERCHANT_NS: &str = "http://base.google.com/ns/1.0";

/// Handle of the platform's built-in gift card product
pub const GIFT_CARD_HANDLE: &str = "gift-card";

/// Why a product was left out of the feed
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid variant id: {0}")]
    InvalidGid(#[from] GidError),

    #[error("option name {0:?} is not a valid XML tag name")]
    InvalidTagName(String),

    #[error("{field} contains character {ch:?}, which XML does not allow")]
    IllegalCharacter { field: &'static str, ch: char },
}

#[derive(Debug, Clone, Copy)]
pub struct FeedOptions {
    pub description_max_chars: usize,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            description_max_chars: 256,
        }
    }
}

/// Rendered feed document plus counters for logging
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub xml: String,
    pub items: usize,
    pub excluded_products: usize,
    pub failed_products: usize,
}

/// Render the full feed document
///
/// A product that fails to render contributes nothing; the failure is logged
/// and the rest of the feed is unaffected.
pub fn render_feed(products: &[Product], site_url: &str, options: &FeedOptions) -> RenderedFeed {
    let mut xml = String::with_capacity(256 + products.len() * 1024);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<rss xmlns:g=\"{}\" version=\"2.0\">\n  <channel>\n",
        GOOGLE_MERCHANT_NS
    ));
    xml.push_str(&format!("    <link>{}</link>\n", escape_xml(site_url)));

    let mut items = 0;
    let mut excluded_products = 0;
    let mut failed_products = 0;

    for product in products {
        if is_excluded(product) {
            excluded_products += 1;
            continue;
        }

        match render_product(product, site_url, options) {
            Ok(rendered) => {
                items += product.variants.nodes.len();
                xml.push_str(&rendered);
            }
            Err(e) => {
                failed_products += 1;
                tracing::warn!("Skipping product {} in feed: {}", product.id, e);
            }
        }
    }

    xml.push_str("  </channel>\n</rss>\n");

    RenderedFeed {
        xml,
        items,
        excluded_products,
        failed_products,
    }
}

/// Products without variants and gift cards never appear in the feed
pub fn is_excluded(product: &Product) -> bool {
    product.variants.nodes.is_empty() || product.handle == GIFT_CARD_HANDLE || product.is_gift_card
}

/// All `<item>` elements for one product, or an error if any variant is unrenderable
pub fn render_product(
    product: &Product,
    site_url: &str,
    options: &FeedOptions,
) -> Result<String, FeedError> {
    let mut out = String::new();
    for variant in &product.variants.nodes {
        render_item(&mut out, product, variant, site_url, options)?;
    }
    Ok(out)
}

fn render_item(
    out: &mut String,
    product: &Product,
    variant: &ProductVariant,
    site_url: &str,
    options: &FeedOptions,
) -> Result<(), FeedError> {
    let variant_id = parse_gid(&variant.id)?.id;
    let item_group_id = product.id.rsplit('/').next().unwrap_or_default();

    let description: String = product
        .description
        .as_deref()
        .unwrap_or_default()
        .chars()
        .take(options.description_max_chars)
        .collect();

    // Everything is escaped and checked before the item is written
    let option_tags = variant
        .selected_options
        .iter()
        .map(option_element)
        .collect::<Result<Vec<_>, _>>()?;

    let id = xml_text("variant id", variant_id)?;
    let product_type = xml_text("product type", &product.product_type)?;
    let gtin = xml_text("sku", variant.sku.as_deref().unwrap_or_default())?;
    let brand = xml_text("vendor", &product.vendor)?;
    let shipping_weight = match variant.weight {
        Some(weight) => {
            let unit = variant.weight_unit.as_deref().unwrap_or_default();
            Some(xml_text("weight unit", &format!("{} {}", weight, unit))?.into_owned())
        }
        None => None,
    };
    let title = xml_text("title", &product.title)?;
    let description = xml_text("description", &description)?;
    let price = xml_text("price", &variant.price.amount)?;
    let item_group_id = xml_text("product id", item_group_id)?;
    let image_link = match product.image_for(variant) {
        Some(image) => Some(xml_text("image url", &image.url)?),
        None => None,
    };

    let link = variant_link(site_url, &product.handle, variant);
    let availability = if variant.available_for_sale { "in stock" } else { "out of stock" };

    out.push_str("    <item>\n");
    push_element(out, "id", &id);
    push_element(out, "product_type", &product_type);
    push_element(out, "gtin", &gtin);
    push_element(out, "link", &link);
    push_element(out, "brand", &brand);
    push_element(out, "condition", "new");
    push_element(out, "availability", availability);
    if let Some(shipping_weight) = &shipping_weight {
        push_element(out, "shipping_weight", shipping_weight);
    }
    push_element(out, "title", &title);
    push_element(out, "description", &description);
    push_element(out, "price", &price);
    push_element(out, "item_group_id", &item_group_id);
    if let Some(image_link) = &image_link {
        push_element(out, "image_link", image_link);
    }
    for (tag, value) in &option_tags {
        push_element(out, tag, value);
    }
    out.push_str("    </item>\n");

    Ok(())
}

fn option_element(option: &SelectedOption) -> Result<(String, Cow<'_, str>), FeedError> {
    Ok((option_tag_name(&option.name)?, xml_text("option value", &option.value)?))
}

/// Escaped text content, or an error if `value` holds a character XML forbids
fn xml_text<'a>(field: &'static str, value: &'a str) -> Result<Cow<'a, str>, FeedError> {
    match find_illegal_char(value) {
        Some(ch) => Err(FeedError::IllegalCharacter { field, ch }),
        None => Ok(escape_xml(value)),
    }
}

/// `content` must already be escaped
fn push_element(out: &mut String, tag: &str, content: &str) {
    out.push_str(&format!("      <g:{tag}>{content}</g:{tag}>\n"));
}

/// Element name for a selected option
///
/// Whitespace and any other character not allowed in a name become `_`. A
/// name that cannot start an element (e.g. `3 Pack`) gets a leading `_`.
pub fn option_tag_name(name: &str) -> Result<String, FeedError> {
    let mut tag: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if tag.starts_with(|c: char| !(c.is_alphabetic() || c == '_')) {
        tag.insert(0, '_');
    }

    if is_valid_tag_name(&tag) {
        Ok(tag)
    } else {
        Err(FeedError::InvalidTagName(name.to_string()))
    }
}

/// Product page URL preselecting the variant's options, escaped for use in XML
pub fn variant_link(site_url: &str, handle: &str, variant: &ProductVariant) -> String {
    let params = variant
        .selected_options
        .iter()
        .map(|option| {
            format!(
                "{}={}",
                urlencoding::encode(&option.name),
                urlencoding::encode(&option.value)
            )
        })
        .collect::<Vec<_>>()
        .join("&amp;");

    format!(
        "{}/products/{}?{}",
        escape_xml(site_url),
        urlencoding::encode(handle),
        params
    )
}

/// Public site URL used for feed links
///
/// A configured primary domain wins; otherwise the URL the request arrived on.
pub fn resolve_site_url(primary_domain: Option<&str>, scheme: &str, host: &str) -> String {
    match primary_domain.map(str::trim).filter(|d| !d.is_empty()) {
        Some(domain) if domain.starts_with("http://") || domain.starts_with("https://") => {
            domain.trim_end_matches('/').to_string()
        }
        Some(domain) => format!("https://{}", domain.trim_end_matches('/')),
        None => format!("{}://{}", scheme, host.trim_end_matches('/')),
    }
}
