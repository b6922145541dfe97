//! Reducer - (state, action) -> (changed, effects)
//!
//! All state transitions of the search controller happen here. No I/O: async
//! work is requested by returning [`Effect`]s.

use store_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{SearchState, Weather};

pub fn reducer(state: &mut SearchState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query =====
        Action::SearchQueryChange(query) if query.is_empty() => {
            let changed = !state.search_query.is_empty()
                || !state.results.is_empty()
                || state.weather.is_some();

            state.search_query = query;
            state.results.clear();
            state.weather = None;

            DispatchResult {
                changed,
                effects: vec![Effect::CancelSearch],
            }
        }

        Action::SearchQueryChange(query) => {
            if state.search_query == query {
                return DispatchResult::unchanged();
            }
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchQueryDidDebounce => {
            if state.search_query.is_empty() {
                return DispatchResult::unchanged();
            }
            DispatchResult::effect(Effect::Search {
                query: state.search_query.clone(),
            })
        }

        // ===== Search results =====
        Action::SearchDidComplete(Ok(response)) => {
            if state.results == response.results {
                return DispatchResult::unchanged();
            }
            state.results = response.results;
            DispatchResult::changed()
        }

        Action::SearchDidComplete(Err(error)) => {
            tracing::debug!(%error, query = %state.search_query, "Search failed");
            let changed = !state.results.is_empty();
            state.results.clear();
            DispatchResult {
                changed,
                effects: vec![],
            }
        }

        Action::SearchResultSelect(location) => {
            state.result_forecast_request_in_flight = Some(location.clone());
            DispatchResult::changed_with(Effect::FetchForecast { location })
        }

        // ===== Forecast =====
        Action::ForecastDidComplete(id, Ok(forecast)) => {
            state.result_forecast_request_in_flight = None;
            state.weather = match Weather::from_forecast(id, &forecast) {
                Ok(weather) => Some(weather),
                Err(error) => {
                    tracing::warn!(%error, result_id = %id, "Discarding forecast");
                    None
                }
            };
            DispatchResult::changed()
        }

        Action::ForecastDidComplete(id, Err(error)) => {
            tracing::debug!(%error, result_id = %id, "Forecast failed");
            state.result_forecast_request_in_flight = None;
            state.weather = None;
            DispatchResult::changed()
        }
    }
}
