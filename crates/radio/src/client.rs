//! reqwest client for the schedule API.

use std::time::Duration;

use {serde::Deserialize, tracing::debug};

use crate::{
    Result,
    error::Error,
    station::Station,
    types::StationInfo,
};

const DEFAULT_BASE_URL: &str = "https://rainwave.cc";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("wavebot/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the radio service. Cheap to clone.
#[derive(Clone)]
pub struct RadioClient {
    http: reqwest::Client,
    base_url: String,
}

impl RadioClient {
    /// Client against the production API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom base URL (tests point this at a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the schedule snapshot for one station: current event, upcoming
    /// elections, and recent history.
    pub async fn info(&self, station: Station) -> Result<StationInfo> {
        let url = format!("{}/async/{}/get", self.base_url, station.id());
        debug!(station = station.name(), %url, "fetching schedule");
        let info = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(info)
    }

    /// Submit a rating for the currently playing song. Returns the API's
    /// human-readable result text.
    pub async fn rate(
        &self,
        station: Station,
        user_id: &str,
        key: &str,
        song_id: i64,
        rating: f64,
    ) -> Result<String> {
        let url = format!("{}/async/{}/rate", self.base_url, station.id());
        let response: RateResponse = self
            .http
            .post(&url)
            .form(&[
                ("user_id", user_id),
                ("key", key),
                ("song_id", &song_id.to_string()),
                ("rating", &rating.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response {
            RateResponse {
                rate_result: Some(result),
                ..
            } => Ok(result.text),
            RateResponse {
                error: Some(error), ..
            } => Err(Error::Api { text: error.text }),
            _ => Err(Error::Api {
                text: "rating was not accepted".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    #[serde(default)]
    rate_result: Option<ApiText>,
    #[serde(default)]
    error: Option<ApiText>,
}
