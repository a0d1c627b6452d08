//! Client configuration.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from folio.toml)
//! - User overrides (~/.config/folio/folio.toml, then ./folio.toml)
//! - Environment overrides prefixed with `FOLIO_`

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use folio_cache::ResponseCacheConfig;
use folio_core::{Region, Version};
use folio_error::{ConfigError, FolioError, FolioResult};
use folio_rate_limit::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Every option the client recognises.
///
/// Unknown keys are rejected when deserializing.
///
/// # Example
///
/// ```
/// use folio::ClientConfigBuilder;
///
/// let config = ClientConfigBuilder::default()
///     .access_token("my-token")
///     .rate_limit(20)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url(), "https://api.storyblok.com/v2");
/// assert_eq!(config.rate_limit_config().user_rate_limit(), &Some(20));
/// ```
#[derive(
    Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder,
)]
#[serde(deny_unknown_fields)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct ClientConfig {
    /// Delivery API credential, sent as the `token` parameter
    #[serde(default)]
    #[builder(setter(into, strip_option))]
    access_token: Option<String>,

    /// Management API credential, sent as the `Authorization` header
    #[serde(default)]
    #[builder(setter(into, strip_option))]
    oauth_token: Option<String>,

    /// Hosting region of the space
    #[serde(default)]
    region: Region,

    /// Whether the composed endpoint uses https
    #[serde(default = "default_https")]
    https: bool,

    /// Full base URL, replacing the region derived one
    #[serde(default)]
    #[builder(setter(into, strip_option))]
    endpoint: Option<String>,

    /// Content version requested when a read does not name one
    #[serde(default)]
    version: Version,

    /// Response cache settings
    #[serde(default)]
    cache: ResponseCacheConfig,

    /// Retries for rate limited requests
    #[serde(default = "default_max_retries")]
    max_retries: usize,

    /// Delay between retries in milliseconds
    #[serde(default = "default_retries_delay_ms")]
    retries_delay_ms: u64,

    /// Requests-per-second ceiling overriding classification
    #[serde(default)]
    #[builder(setter(strip_option))]
    rate_limit: Option<u32>,

    /// Request deadline in seconds, 0 disables it
    #[serde(default)]
    timeout_secs: f64,

    /// Accepted for compatibility; resolution depth follows `resolve_level`
    #[serde(default = "default_resolve_nested_relations")]
    resolve_nested_relations: bool,

    /// Merge response assets into asset fields
    #[serde(default)]
    inline_assets: bool,

    /// Extra headers sent with every request
    #[serde(default)]
    headers: BTreeMap<String, String>,

    /// Admission window of the throttle queues in milliseconds
    #[serde(default = "default_throttle_interval_ms")]
    throttle_interval_ms: u64,
}

fn default_https() -> bool {
    true
}

fn default_max_retries() -> usize {
    10
}

fn default_retries_delay_ms() -> u64 {
    300
}

fn default_resolve_nested_relations() -> bool {
    true
}

fn default_throttle_interval_ms() -> u64 {
    1000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            oauth_token: None,
            region: Region::default(),
            https: default_https(),
            endpoint: None,
            version: Version::default(),
            cache: ResponseCacheConfig::default(),
            max_retries: default_max_retries(),
            retries_delay_ms: default_retries_delay_ms(),
            rate_limit: None,
            timeout_secs: 0.0,
            resolve_nested_relations: default_resolve_nested_relations(),
            inline_assets: false,
            headers: BTreeMap::new(),
            throttle_interval_ms: default_throttle_interval_ms(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a specific file path.
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or names an
    /// unknown option.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// ```no_run
    /// use folio::ClientConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ClientConfig::load()?;
    /// println!("{}", config.base_url());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> FolioResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("folio").required(false))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Whether requests target the management API.
    pub fn is_management(&self) -> bool {
        self.oauth_token.is_some()
    }

    /// Base URL all paths are composed against.
    ///
    /// ```
    /// use folio::ClientConfigBuilder;
    /// use folio_core::Region;
    ///
    /// let config = ClientConfigBuilder::default()
    ///     .oauth_token("oauth")
    ///     .region(Region::Us)
    ///     .https(false)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.base_url(), "http://api-us.storyblok.com/v1");
    /// ```
    pub fn base_url(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.trim_end_matches('/').to_string();
        }
        let scheme = if self.https { "https" } else { "http" };
        let api_version = if self.is_management() { "v1" } else { "v2" };
        format!("{scheme}://{}/{api_version}", self.region.host())
    }

    /// Request deadline, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs.is_finite() && self.timeout_secs > 0.0)
            .then(|| Duration::from_secs_f64(self.timeout_secs))
    }

    /// Admission window of the throttle queues.
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms.max(1))
    }

    /// Delay between retries.
    pub fn retries_delay(&self) -> Duration {
        Duration::from_millis(self.retries_delay_ms)
    }

    /// Classification inputs from the caller's side.
    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig::default().with_user_rate_limit(self.rate_limit)
    }
}
