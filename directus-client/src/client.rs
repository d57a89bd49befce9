use crate::models;
use reqwest::header::USER_AGENT;
use std::sync::Arc;

/// Default address of a locally running Directus instance
pub const DEFAULT_BASE_PATH: &str = "http://localhost:8055";

/// Configuration for the Directus client
#[derive(Clone)]
pub struct Configuration {
    /// Base URL of the Directus instance (e.g., "http://localhost:8055")
    pub base_path: String,
    /// User agent string for HTTP requests
    pub user_agent: Option<String>,
    /// HTTP client instance
    pub client: reqwest::Client,
    /// Bearer token sent as `Authorization: Bearer {token}`
    pub bearer_access_token: Option<String>,
}

impl Configuration {
    /// Create a new configuration with default values
    pub fn new() -> Configuration {
        Configuration::default()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            base_path: DEFAULT_BASE_PATH.to_owned(),
            user_agent: Some(format!("directus-client/{}", env!("CARGO_PKG_VERSION"))),
            client: reqwest::Client::new(),
            bearer_access_token: None,
        }
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("user_agent", &self.user_agent)
            .field(
                "bearer_access_token",
                &self.bearer_access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// # Directus Client
///
/// A small async client for the Directus items API. Every collection is
/// served from `/items/{collection}` and results come back wrapped in a
/// `data` envelope.
///
/// ## Usage
///
/// ```rust,no_run
/// use directus_client::{Configuration, DirectusClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Arc::new(Configuration {
///         base_path: "http://localhost:8055".to_string(),
///         user_agent: Some("my-rust-app/1.0".to_string()),
///         client: reqwest::Client::new(),
///         bearer_access_token: Some("static-token".to_string()),
///     });
///
///     let client = DirectusClient::new(config);
///
///     if let Some(item) = client.first_item("articles").await? {
///         println!("Fields: {:?}", item.keys().collect::<Vec<_>>());
///     }
///
///     Ok(())
/// }
/// ```
pub struct DirectusClient {
    configuration: Arc<Configuration>,
}

impl std::fmt::Debug for DirectusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectusClient")
            .field("base_path", &self.configuration.base_path)
            .finish()
    }
}

/// Errors that can occur when talking to the Directus API
///
/// ```rust
/// # use directus_client::DirectusError;
/// # async fn example() {
/// match some_api_call().await {
///     Ok(result) => println!("Success: {:?}", result),
///     Err(DirectusError::RequestError(e)) => {
///         eprintln!("Network or HTTP error: {}", e);
///     },
///     Err(DirectusError::ParseError(e)) => {
///         eprintln!("Failed to parse API response: {}", e);
///     },
///     Err(DirectusError::ApiError { status, message }) => {
///         eprintln!("Directus returned error {}: {}", status, message);
///     }
/// }
/// # async fn some_api_call() -> Result<(), DirectusError> { Ok(()) }
/// # }
/// ```
#[derive(Debug)]
pub enum DirectusError {
    /// Connection failures, DNS resolution issues, invalid header values and
    /// other request-level errors
    RequestError(Box<dyn std::error::Error + Send + Sync>),

    /// The response body was not JSON or did not match the `data` envelope
    ParseError(serde_json::Error),

    /// Non-success HTTP status
    ///
    /// Directus uses 401/403 for missing or invalid tokens and 404 for
    /// unknown collections.
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, or the canonical reason when the body is empty
        message: String,
    },
}

impl std::fmt::Display for DirectusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectusError::RequestError(e) => write!(f, "Request error: {}", e),
            DirectusError::ParseError(e) => write!(f, "Parse error: {}", e),
            DirectusError::ApiError { status, message } => {
                write!(f, "Directus API error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for DirectusError {}

impl DirectusClient {
    /// Create a new client for the Directus instance described by `configuration`
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    /// Read items from a collection
    ///
    /// # Arguments
    ///
    /// * `collection` - Collection name, encoded into the path segment
    /// * `limit` - Maximum number of items to return; omitted from the query when `None`
    ///
    /// The configured bearer token is always attached when present, even if
    /// it is an empty string. Directus decides what to do with it.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use directus_client::{Configuration, DirectusClient};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = DirectusClient::new(Arc::new(Configuration::default()));
    /// let response = client.read_items("criminal_db", Some(5)).await?;
    /// if let Some(items) = response.data.as_ref().and_then(|data| data.as_array()) {
    ///     for item in items {
    ///         println!("{}", serde_json::to_string(item)?);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read_items(
        &self,
        collection: &str,
        limit: Option<u32>,
    ) -> Result<models::ItemsResponse, DirectusError> {
        let base_url = self.configuration.base_path.trim_end_matches('/');
        let url = format!("{}/items/{}", base_url, urlencoding::encode(collection));

        let mut request = self.configuration.client.get(&url);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        if let Some(ref user_agent) = self.configuration.user_agent {
            request = request.header(USER_AGENT, user_agent);
        }
        if let Some(ref token) = self.configuration.bearer_access_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%url, ?limit, "reading collection items");

        let response = request
            .send()
            .await
            .map_err(|e| DirectusError::RequestError(Box::new(e)))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| DirectusError::RequestError(Box::new(e)))?;
            let items: models::ItemsResponse =
                serde_json::from_str(&body).map_err(DirectusError::ParseError)?;
            tracing::debug!(
                count = items.len(),
                "collection items received"
            );
            Ok(items)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            let message = if error_text.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                error_text
            };
            Err(DirectusError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetch only the first item of a collection (`limit=1`)
    ///
    /// Returns `Ok(None)` when the collection is empty or the response has no
    /// `data`. A `null` or non-array `data`, or a first element that is not an
    /// object, is a `ParseError`.
    pub async fn first_item(
        &self,
        collection: &str,
    ) -> Result<Option<models::Item>, DirectusError> {
        let response = self.read_items(collection, Some(1)).await?;
        response.into_first_item().map_err(DirectusError::ParseError)
    }
}
