//! GraphQL documents sent to the Storefront API.
//!
//! Operations and fragments are declared as static [`GraphqlDocument`]s. An
//! operation lists the fragments it spreads, and [`GraphqlDocument::render`]
//! appends each of them exactly once.

pub mod product;
pub mod search;

pub use product::{PRODUCT_FEED_QUERY, PRODUCT_ITEM_FRAGMENT};
pub use search::{
    PREDICTIVE_COLLECTION_FRAGMENT, PREDICTIVE_QUERY_FRAGMENT, PREDICTIVE_SEARCH_QUERY,
    PRODUCTS_SEARCH_FILTERS_QUERY, PRODUCTS_SEARCH_QUERY,
};

/// A GraphQL operation or fragment plus the fragments it depends on
#[derive(Debug)]
pub struct GraphqlDocument {
    /// Operation or fragment name as written in `source`
    pub name: &'static str,
    pub source: &'static str,
    pub fragments: &'static [&'static GraphqlDocument],
}

impl GraphqlDocument {
    /// Full document text: the source followed by every transitively spread fragment
    pub fn render(&self) -> String {
        let mut seen: Vec<&'static str> = vec![self.name];
        let mut out = String::from(self.source.trim());

        let mut stack: Vec<&'static GraphqlDocument> = self.fragments.iter().rev().copied().collect();
        while let Some(fragment) = stack.pop() {
            if seen.contains(&fragment.name) {
                continue;
            }
            seen.push(fragment.name);
            out.push_str("\n\n");
            out.push_str(fragment.source.trim());
            stack.extend(fragment.fragments.iter().rev().copied());
        }

        out.push('\n');
        out
    }
}
