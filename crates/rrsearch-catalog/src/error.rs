use thiserror::Error;

/// Errors returned by the catalog service client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The client was constructed with a blank or invalid endpoint.
    #[error("catalog configuration error: {0}")]
    Config(String),

    /// Network or TLS failure, or a non-2xx status from the catalog.
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
