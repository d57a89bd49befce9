use std::env;
use std::time::Duration;

use crate::colors::ColorMode;

/// Environment variable holding the Directus static token
pub const TOKEN_ENV: &str = "DIRECT_US_ACCESS_TOKEN";
pub const BASE_URL_ENV: &str = "INSPECTOR_BASE_URL";
pub const COLLECTION_ENV: &str = "INSPECTOR_COLLECTION";
pub const TIMEOUT_ENV: &str = "INSPECTOR_TIMEOUT_SECS";
pub const COLOR_ENV: &str = "INSPECTOR_COLOR";

pub const DEFAULT_COLLECTION: &str = "criminal_db";

/// Bearer credential read from the environment
///
/// An unset variable yields an empty token. No validation happens locally;
/// the request simply goes out as `Authorization: Bearer `.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    /// Read the token from `DIRECT_US_ACCESS_TOKEN`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self(lookup(TOKEN_ENV).unwrap_or_default())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = if self.0.is_empty() { "<empty>" } else { "<redacted>" };
        f.debug_tuple("Credential").field(&shown).finish()
    }
}

/// Configuration for a single inspection run
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Base URL of the Directus instance
    pub base_url: String,
    /// Collection whose first item is inspected
    pub collection: String,
    pub credential: Credential,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Request timeout; `None` leaves the HTTP client's default (no timeout)
    pub timeout: Option<Duration>,
    pub color_mode: ColorMode,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            base_url: directus_client::client::DEFAULT_BASE_PATH.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            credential: Credential::default(),
            user_agent: format!("structure-inspector/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            color_mode: ColorMode::Auto,
        }
    }
}

impl InspectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values for the optional settings are treated as unset. Values
    /// that fail to parse are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default().with_credential(Credential::from_lookup(&lookup));
        let setting = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = setting(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Some(collection) = setting(COLLECTION_ENV) {
            config = config.with_collection(collection.trim());
        }
        if let Some(raw) = setting(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", TIMEOUT_ENV),
            }
        }
        if let Some(raw) = setting(COLOR_ENV) {
            match raw.parse::<ColorMode>() {
                Ok(mode) => config = config.with_color_mode(mode),
                Err(err) => tracing::warn!("{err}"),
            }
        }

        config
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_collection<S: Into<String>>(mut self, collection: S) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Set custom user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    /// Full URL the inspection requests, for logs and help output
    pub fn endpoint(&self) -> String {
        format!("{}/items/{}?limit=1", self.base_url, self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_point_at_local_directus() {
        let config = InspectorConfig::from_lookup(lookup(&[]));
        assert_eq!(config.base_url, "http://localhost:8055");
        assert_eq!(config.collection, "criminal_db");
        assert_eq!(config.credential.token(), "");
        assert!(config.timeout.is_none());
        assert_eq!(config.color_mode, ColorMode::Auto);
        assert_eq!(
            config.endpoint(),
            "http://localhost:8055/items/criminal_db?limit=1"
        );
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = InspectorConfig::from_lookup(lookup(&[
            (TOKEN_ENV, "tok"),
            (BASE_URL_ENV, "http://cms.internal:8055/"),
            (COLLECTION_ENV, "suspects"),
            (TIMEOUT_ENV, "30"),
            (COLOR_ENV, "never"),
        ]));

        assert_eq!(config.credential.token(), "tok");
        assert_eq!(config.base_url, "http://cms.internal:8055");
        assert_eq!(config.collection, "suspects");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.color_mode, ColorMode::Never);
    }

    #[test]
    fn test_invalid_optional_settings_are_ignored() {
        let config = InspectorConfig::from_lookup(lookup(&[
            (TIMEOUT_ENV, "soon"),
            (COLOR_ENV, "sometimes"),
            (COLLECTION_ENV, "   "),
        ]));

        assert!(config.timeout.is_none());
        assert_eq!(config.color_mode, ColorMode::Auto);
        assert_eq!(config.collection, DEFAULT_COLLECTION);

        let zero = InspectorConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")]));
        assert!(zero.timeout.is_none());
    }

    #[test]
    fn test_unset_token_is_empty_not_missing() {
        assert_eq!(Credential::from_lookup(|_| None).token(), "");
        assert_eq!(Credential::from_lookup(|_| Some(String::new())), Credential::default());
        assert_eq!(
            Credential::from_lookup(|key| (key == TOKEN_ENV).then(|| "abc".to_string())).token(),
            "abc"
        );
    }

    #[test]
    fn test_credential_debug_hides_token() {
        let debug = format!("{:?}", Credential::new("secret-token"));
        assert!(!debug.contains("secret-token"));

        let config = InspectorConfig::new().with_credential(Credential::new("secret-token"));
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
