//! Controller state - single source of truth
//!
//! Only the reducer mutates [`SearchState`]; observers receive snapshots.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::ForecastResponse;
use crate::error::ClientError;

/// Stable identifier of a search result (the geocoding id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub i64);

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A location candidate returned by the search capability
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: ResultId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    /// First-level administrative area (state, region)
    #[serde(default)]
    pub admin1: Option<String>,
}

impl SearchResult {
    /// Name with region and country context, e.g. "Springfield, Illinois, United States"
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(self.admin1.as_deref());
        parts.extend(self.country.as_deref());
        parts.join(", ")
    }
}

/// One day of a multi-day forecast
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_max_unit: String,
    pub temperature_min: f64,
    pub temperature_min_unit: String,
}

/// Forecast currently on display, tagged with the result it belongs to
#[derive(Clone, Debug, PartialEq)]
pub struct Weather {
    pub id: ResultId,
    pub days: Vec<ForecastDay>,
}

impl Weather {
    /// Map a forecast response day by day.
    ///
    /// Fails with [`ClientError::MalformedResponse`] if the daily series
    /// differ in length.
    pub fn from_forecast(id: ResultId, forecast: &ForecastResponse) -> Result<Self, ClientError> {
        forecast.validate()?;

        let daily = &forecast.daily;
        let units = &forecast.daily_units;
        let days = daily
            .time
            .iter()
            .zip(&daily.temperature_max)
            .zip(&daily.temperature_min)
            .map(|((date, max), min)| ForecastDay {
                date: *date,
                temperature_max: *max,
                temperature_max_unit: units.temperature_max.clone(),
                temperature_min: *min,
                temperature_min_unit: units.temperature_min.clone(),
            })
            .collect();

        Ok(Self { id, days })
    }
}

/// Root state of the search controller
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    /// Results of the last successful search
    pub results: Vec<SearchResult>,

    /// Result whose forecast is being fetched
    pub result_forecast_request_in_flight: Option<SearchResult>,

    /// Raw query text
    pub search_query: String,

    /// Forecast of the last selected result
    pub weather: Option<Weather>,
}

impl SearchState {
    /// Whether the forecast for `id` is in flight
    pub fn is_loading(&self, id: ResultId) -> bool {
        self.result_forecast_request_in_flight
            .as_ref()
            .is_some_and(|r| r.id == id)
    }

    /// Forecast for `id`, if that is the one on display
    pub fn weather_for(&self, id: ResultId) -> Option<&Weather> {
        self.weather.as_ref().filter(|w| w.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Daily, DailyUnits};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
    }

    fn location(id: i64, name: &str) -> SearchResult {
        SearchResult {
            id: ResultId(id),
            name: name.into(),
            latitude: 0.0,
            longitude: 0.0,
            country: None,
            admin1: None,
        }
    }

    fn forecast(max: Vec<f64>, min: Vec<f64>) -> ForecastResponse {
        ForecastResponse {
            daily: Daily {
                time: vec![date(18), date(19)],
                temperature_max: max,
                temperature_min: min,
            },
            daily_units: DailyUnits {
                temperature_max: "°C".into(),
                temperature_min: "°C".into(),
            },
        }
    }

    #[test]
    fn test_weather_maps_days_in_order() {
        let weather =
            Weather::from_forecast(ResultId(1), &forecast(vec![10.0, 12.0], vec![2.0, 3.0]))
                .unwrap();

        assert_eq!(weather.id, ResultId(1));
        assert_eq!(
            weather.days,
            vec![
                ForecastDay {
                    date: date(18),
                    temperature_max: 10.0,
                    temperature_max_unit: "°C".into(),
                    temperature_min: 2.0,
                    temperature_min_unit: "°C".into(),
                },
                ForecastDay {
                    date: date(19),
                    temperature_max: 12.0,
                    temperature_max_unit: "°C".into(),
                    temperature_min: 3.0,
                    temperature_min_unit: "°C".into(),
                },
            ]
        );
    }

    #[test]
    fn test_weather_rejects_mismatched_series() {
        let result = Weather::from_forecast(ResultId(1), &forecast(vec![10.0], vec![2.0, 3.0]));
        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    }

    #[test]
    fn test_display_name() {
        let mut result = location(1, "Springfield");
        assert_eq!(result.display_name(), "Springfield");

        result.admin1 = Some("Illinois".into());
        result.country = Some("United States".into());
        assert_eq!(result.display_name(), "Springfield, Illinois, United States");
    }

    #[test]
    fn test_row_helpers() {
        let kyiv = location(1, "Kyiv");
        let state = SearchState {
            results: vec![kyiv.clone(), location(2, "Lviv")],
            result_forecast_request_in_flight: Some(kyiv),
            weather: Some(Weather {
                id: ResultId(2),
                days: vec![],
            }),
            ..Default::default()
        };

        assert!(state.is_loading(ResultId(1)));
        assert!(!state.is_loading(ResultId(2)));
        assert!(state.weather_for(ResultId(1)).is_none());
        assert!(state.weather_for(ResultId(2)).is_some());
    }
}
