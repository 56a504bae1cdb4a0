use thiserror::Error;

/// Errors returned by the Notion client.
#[derive(Debug, Error)]
pub enum NotionError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion answered with a status of 400 or above.
    #[error("Notion API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A page claimed `has_more` but carried no cursor to continue from.
    #[error("query reported more results but returned no next_cursor")]
    MissingCursor,

    /// Token, version or base URL cannot be used to build requests.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}
