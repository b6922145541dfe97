//! Search and forecast capabilities
//!
//! The controller only sees this contract; [`OpenMeteoClient`](crate::api::OpenMeteoClient)
//! is the HTTP implementation, tests inject fakes.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ClientError;
use crate::state::SearchResult;

/// Response of a location search
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    /// Absent when nothing matched
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Daily series of a forecast, index-aligned
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Daily {
    pub time: Vec<NaiveDate>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
}

/// Unit labels for [`Daily`]
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DailyUnits {
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: String,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: String,
}

/// Response of a forecast lookup
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForecastResponse {
    pub daily: Daily,
    pub daily_units: DailyUnits,
}

impl ForecastResponse {
    /// Check that every daily series has one entry per day.
    pub fn validate(&self) -> Result<(), ClientError> {
        let days = self.daily.time.len();
        let max = self.daily.temperature_max.len();
        let min = self.daily.temperature_min.len();

        if max != days || min != days {
            return Err(ClientError::MalformedResponse(format!(
                "daily series lengths differ: time={days}, max={max}, min={min}"
            )));
        }
        Ok(())
    }
}

/// Async search and forecast lookups.
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Find locations matching `query`.
    async fn search(&self, query: &str) -> Result<SearchResponse, ClientError>;

    /// Fetch the multi-day forecast for `location`.
    async fn forecast(&self, location: &SearchResult) -> Result<ForecastResponse, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ResultId;

    #[test]
    fn test_search_response_decodes() {
        let json = r#"{
            "results": [
                {
                    "id": 703448,
                    "name": "Kyiv",
                    "latitude": 50.45466,
                    "longitude": 30.5238,
                    "country": "Ukraine",
                    "admin1": "Kyiv City",
                    "population": 2797553
                }
            ],
            "generationtime_ms": 0.7
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, ResultId(703448));
        assert_eq!(response.results[0].admin1.as_deref(), Some("Kyiv City"));
    }

    #[test]
    fn test_search_response_without_results() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.2}"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_forecast_response_decodes() {
        let json = r#"{
            "latitude": 50.45,
            "longitude": 30.52,
            "daily_units": {
                "time": "iso8601",
                "temperature_2m_max": "°C",
                "temperature_2m_min": "°C"
            },
            "daily": {
                "time": ["2024-04-18", "2024-04-19"],
                "temperature_2m_max": [14.2, 16.0],
                "temperature_2m_min": [3.1, 5.4]
            }
        }"#;

        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.daily.time[1],
            NaiveDate::from_ymd_opt(2024, 4, 19).unwrap()
        );
        assert_eq!(response.daily.temperature_min, vec![3.1, 5.4]);
        assert_eq!(response.daily_units.temperature_max, "°C");
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_series() {
        let response = ForecastResponse {
            daily: Daily {
                time: vec![NaiveDate::from_ymd_opt(2024, 4, 18).unwrap()],
                temperature_max: vec![],
                temperature_min: vec![1.0],
            },
            daily_units: DailyUnits {
                temperature_max: "°C".into(),
                temperature_min: "°C".into(),
            },
        };

        assert!(matches!(
            response.validate(),
            Err(ClientError::MalformedResponse(_))
        ));
    }
}
