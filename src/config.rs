use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storefront: StorefrontSettings,
    #[serde(default)]
    pub i18n: I18nSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontSettings {
    /// Shop domain, e.g. `my-shop.myshopify.com`. A scheme prefix is kept as-is.
    pub store_domain: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    pub public_access_token: String,
    /// Public site URL used in feed links; falls back to the request host.
    pub primary_domain: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn default_api_version() -> String { "2024-10".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct I18nSettings {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            country: default_country(),
            language: default_language(),
        }
    }
}

fn default_country() -> String { "US".to_string() }
fn default_language() -> String { "EN".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_short_ttl")]
    pub short_ttl_secs: u64,
    #[serde(default = "default_long_ttl")]
    pub long_ttl_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            short_ttl_secs: default_short_ttl(),
            long_ttl_secs: default_long_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_short_ttl() -> u64 { 10 }
fn default_long_ttl() -> u64 { 3600 }
fn default_max_entries() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub max_pages: Option<u32>,
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: None,
            description_max_chars: default_description_max_chars(),
        }
    }
}

fn default_page_size() -> u32 { 250 }
fn default_description_max_chars() -> usize { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with STOREFRONT__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STOREFRONT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_secret_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_secret_overrides(settings)?;

        settings.try_deserialize()
    }
}

/// The access token is usually injected by the hosting platform under a flat name.
fn apply_secret_overrides(settings: Config) -> Result<Config, ConfigError> {
    let token = std::env::var("STOREFRONT_PUBLIC_ACCESS_TOKEN").ok();
    let domain = std::env::var("STOREFRONT_PRIMARY_DOMAIN").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(token) = token {
        builder = builder.set_override("storefront.public_access_token", token)?;
    }
    if let Some(domain) = domain {
        builder = builder.set_override("storefront.primary_domain", domain)?;
    }

    builder.build()
}
