use thiserror::Error;

const GID_SCHEME: &str = "gid://";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GidError {
    #[error("missing gid:// scheme: {0:?}")]
    MissingScheme(String),

    #[error("malformed global id: {0:?}")]
    Malformed(String),
}

/// Platform global id, e.g. `gid://shopify/ProductVariant/40404`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gid<'a> {
    pub namespace: &'a str,
    pub resource: &'a str,
    pub id: &'a str,
}

/// Split a global id into its parts; any `?query` suffix on the id is dropped
pub fn parse_gid(gid: &str) -> Result<Gid<'_>, GidError> {
    let rest = gid
        .strip_prefix(GID_SCHEME)
        .ok_or_else(|| GidError::MissingScheme(gid.to_string()))?;

    let path = rest.split(['?', '#']).next().unwrap_or_default();
    let mut parts = path.split('/');

    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(namespace), Some(resource), Some(id), None)
            if !namespace.is_empty() && !resource.is_empty() && !id.is_empty() =>
        {
            Ok(Gid { namespace, resource, id })
        }
        _ => Err(GidError::Malformed(gid.to_string())),
    }
}
