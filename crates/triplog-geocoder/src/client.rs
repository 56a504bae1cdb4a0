//! HTTP client for the Nominatim `/search` endpoint.

use std::time::Duration;

use reqwest::Client;
use triplog_core::Place;

use crate::error::GeocodeError;
use crate::types::Candidate;

/// Minimum spacing between two lookups against the public instance.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1050);

/// Free-text place lookup against Nominatim.
///
/// Every call to [`NominatimClient::lookup`] sleeps for the configured
/// interval after the request completes, so sequential callers stay under the
/// public rate limit without tracking time themselves.
pub struct NominatimClient {
    client: Client,
    base_url: String,
    interval: Duration,
}

impl NominatimClient {
    /// Creates a client that identifies itself with `user_agent` and pauses
    /// [`MIN_INTERVAL`] after each lookup.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            interval: MIN_INTERVAL,
        })
    }

    /// Replaces the post-lookup pause. Only self-hosted instances or mock
    /// servers should go below [`MIN_INTERVAL`].
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Resolves `query` to its best match, or `None` when Nominatim has none.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::UnexpectedStatus`] on any non-2xx response.
    /// - [`GeocodeError::Http`] on network failure or timeout.
    /// - [`GeocodeError::Deserialize`] if the body is not a candidate list.
    /// - [`GeocodeError::Parse`] if the best match has unusable coordinates.
    pub async fn lookup(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
        let result = self.search(query).await;
        tokio::time::sleep(self.interval).await;
        let candidates = result?;

        let Some(first) = candidates.into_iter().next() else {
            tracing::info!(query, "nominatim: no match");
            return Ok(None);
        };

        let place = to_place(query, &first)?;
        tracing::debug!(
            query,
            display_name = first.display_name.as_deref().unwrap_or_default(),
            lat = place.lat,
            lon = place.lon,
            "nominatim: matched"
        );
        Ok(Some(place))
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| log_transport_error(query, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| log_transport_error(query, e))?;
        if !status.is_success() {
            tracing::error!(
                query,
                status = status.as_u16(),
                body = %body,
                "nominatim: request failed"
            );
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("search(q={query})"),
            source: e,
        })
    }
}

fn log_transport_error(query: &str, error: reqwest::Error) -> GeocodeError {
    tracing::error!(query, error = %error, "nominatim: request failed");
    GeocodeError::Http(error)
}

/// Normalizes a candidate: locality falls back to the query text, region and
/// country fall back to empty strings.
fn to_place(query: &str, candidate: &Candidate) -> Result<Place, GeocodeError> {
    let lat = parse_coordinate(query, "lat", &candidate.lat)?;
    let lon = parse_coordinate(query, "lon", &candidate.lon)?;
    let address = &candidate.address;

    Ok(Place {
        city: address.locality().unwrap_or(query).to_owned(),
        region: address.area().unwrap_or_default().to_owned(),
        country: address
            .country
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned(),
        lat,
        lon,
    })
}

fn parse_coordinate(query: &str, field: &str, raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::Parse {
            query: query.to_owned(),
            message: format!("{field} is not a finite number: {raw:?}"),
        })
}
