use thiserror::Error;

/// Errors raised inside an adapter's live-fetch path.
///
/// These never escape the adapter's public methods: every variant is caught,
/// logged, and converted into the platform's fallback dataset.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a structured API-level error, or the response
    /// was semantically unusable (e.g. an empty result set).
    #[error("provider API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
