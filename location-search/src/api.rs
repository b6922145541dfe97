//! Open-Meteo implementation of [`WeatherClient`]
//!
//! Geocoding: `https://geocoding-api.open-meteo.com/v1/search`
//! Forecast: `https://api.open-meteo.com/v1/forecast`

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::{ForecastResponse, SearchResponse, WeatherClient};
use crate::error::ClientError;
use crate::state::SearchResult;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_RESULT_COUNT: u8 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min";

/// Endpoints and limits for [`OpenMeteoClient`]
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Maximum number of search results requested
    pub result_count: u8,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.into(),
            forecast_url: DEFAULT_FORECAST_URL.into(),
            result_count: DEFAULT_RESULT_COUNT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the Open-Meteo geocoding and forecast APIs
#[derive(Clone, Debug)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OpenMeteoClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?name={}&count={}&language=en&format=json",
            self.config.geocoding_url,
            urlencoding::encode(query),
            self.config.result_count
        )
    }

    fn forecast_url(&self, location: &SearchResult) -> String {
        format!(
            "{}?latitude={}&longitude={}&daily={}&timezone=auto",
            self.config.forecast_url, location.latitude, location.longitude, DAILY_FIELDS
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Network(format!("HTTP {status} from {url}")));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, ClientError> {
        let url = self.search_url(query);
        tracing::debug!(%url, "Searching locations");
        self.get_json(&url).await
    }

    async fn forecast(&self, location: &SearchResult) -> Result<ForecastResponse, ClientError> {
        let url = self.forecast_url(location);
        tracing::debug!(%url, id = %location.id, "Fetching forecast");

        let forecast: ForecastResponse = self.get_json(&url).await?;
        forecast.validate()?;
        Ok(forecast)
    }
}
