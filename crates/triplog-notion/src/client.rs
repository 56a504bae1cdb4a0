//! HTTP client for the Notion REST API.
//!
//! Covers the two calls the trip log needs: paged database queries and
//! single-property page updates. Any response with status 400 or above is
//! logged with its body and surfaced as [`NotionError::Api`]; nothing is
//! retried.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};

use crate::error::NotionError;
use crate::types::{rich_text_update, Filter, Page, QueryRequest, QueryResponse};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Client for one Notion database.
///
/// Built once at startup and passed by reference to every call site. Use
/// [`NotionClient::new`] with the configured base URL; tests point it at a
/// wiremock server.
pub struct NotionClient {
    client: Client,
    base_url: String,
    database_id: String,
    page_size: u32,
}

impl NotionClient {
    /// Creates a client with the bearer token and `Notion-Version` header
    /// preset on every request.
    ///
    /// # Errors
    ///
    /// Returns [`NotionError::InvalidConfig`] if the token or version cannot be
    /// used as a header value, or [`NotionError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        token: &str,
        notion_version: &str,
        database_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, NotionError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| NotionError::InvalidConfig(format!("token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static("notion-version"),
            HeaderValue::from_str(notion_version)
                .map_err(|e| NotionError::InvalidConfig(format!("notion version: {e}")))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            database_id: database_id.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Overrides the number of rows requested per query page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetches one page of rows matching `filter`, continuing from
    /// `start_cursor` when given.
    ///
    /// # Errors
    ///
    /// - [`NotionError::Api`] on a status of 400 or above.
    /// - [`NotionError::Http`] on network failure or timeout.
    /// - [`NotionError::Deserialize`] if the body is not a query response.
    pub async fn query_page(
        &self,
        filter: Option<&Filter>,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let body = QueryRequest {
            page_size: self.page_size,
            filter,
            start_cursor,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| log_transport_error("query", e))?;
        let text = Self::check_status(response, "query").await?;

        serde_json::from_str(&text).map_err(|e| NotionError::Deserialize {
            context: format!("query(database={})", self.database_id),
            source: e,
        })
    }

    /// Fetches every row matching `filter`, following cursors until Notion
    /// reports no more results. Rows keep the order Notion returned them in.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::query_page`]; rows from earlier
    /// pages are discarded. Returns [`NotionError::MissingCursor`] if a page
    /// claims more results without a cursor.
    pub async fn query_all(&self, filter: Option<&Filter>) -> Result<Vec<Page>, NotionError> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let response = self.query_page(filter, cursor.as_deref()).await?;
            tracing::debug!(
                rows = response.results.len(),
                has_more = response.has_more,
                "notion: fetched query page"
            );
            pages.extend(response.results);

            if !response.has_more {
                break;
            }
            match response.next_cursor {
                Some(next) => cursor = Some(next),
                None => return Err(NotionError::MissingCursor),
            }
        }

        Ok(pages)
    }

    /// Replaces the content of a rich-text property on one page.
    ///
    /// # Errors
    ///
    /// - [`NotionError::Api`] on a status of 400 or above.
    /// - [`NotionError::Http`] on network failure or timeout.
    pub async fn set_rich_text(
        &self,
        page_id: &str,
        property: &str,
        value: &str,
    ) -> Result<(), NotionError> {
        let url = format!("{}/pages/{page_id}", self.base_url);
        let body = rich_text_update(property, value);

        let response = self
            .client
            .patch(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| log_transport_error("update", e))?;
        Self::check_status(response, "update").await?;
        tracing::debug!(page_id, property, value, "notion: property updated");
        Ok(())
    }

    /// Returns the body text on success; logs and converts anything at or
    /// above 400 into [`NotionError::Api`].
    async fn check_status(response: Response, operation: &str) -> Result<String, NotionError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| log_transport_error(operation, e))?;
        if status.is_client_error() || status.is_server_error() {
            tracing::error!(
                operation,
                status = status.as_u16(),
                body = %body,
                "notion: request failed"
            );
            return Err(NotionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn log_transport_error(operation: &str, error: reqwest::Error) -> NotionError {
    tracing::error!(operation, error = %error, "notion: request failed");
    NotionError::Http(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = NotionClient::new("https://api.notion.com/v1/", "t", "2022-06-28", "db", 30)
            .expect("client construction should not fail");
        assert_eq!(client.base_url, "https://api.notion.com/v1");
        assert_eq!(client.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_can_be_overridden() {
        let client = NotionClient::new("https://api.notion.com/v1", "t", "2022-06-28", "db", 30)
            .unwrap()
            .with_page_size(10);
        assert_eq!(client.page_size, 10);
    }

    #[tokio::test]
    async fn connection_failure_is_http_error() {
        let client =
            NotionClient::new("http://127.0.0.1:1/v1", "t", "2022-06-28", "db", 5).unwrap();

        let query = client.query_page(None, None).await;
        assert!(matches!(query, Err(NotionError::Http(_))), "got {query:?}");

        let update = client.set_rich_text("p1", "Arrival details", "x").await;
        assert!(matches!(update, Err(NotionError::Http(_))), "got {update:?}");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let result = NotionClient::new("https://api.notion.com/v1", "bad\ntoken", "2022-06-28", "db", 30);
        assert!(matches!(result, Err(NotionError::InvalidConfig(_))));
    }
}
