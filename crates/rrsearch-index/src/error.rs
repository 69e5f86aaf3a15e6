use thiserror::Error;

/// Errors returned by the search index client.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The client was constructed with a blank or invalid endpoint/key.
    /// Raised at construction time so a misconfigured index can never be
    /// mistaken for zero results.
    #[error("index configuration error: {0}")]
    Config(String),

    /// Network or TLS failure, or a non-2xx status from the index.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
