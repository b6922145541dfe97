//! Events accepted by the search controller
//!
//! Naming follows the category convention: the prefix names the category,
//! `Did` marks the result of async work.

use store_dispatch::ActionSummary;

use crate::client::{ForecastResponse, SearchResponse};
use crate::error::ClientError;
use crate::state::{ResultId, SearchResult};

/// Controller actions
///
/// Categories (inferred):
/// - `search_query`: SearchQueryChange, SearchQueryDidDebounce
/// - `search`: SearchDidComplete
/// - `search_result`: SearchResultSelect
/// - `forecast`: ForecastDidComplete
#[derive(store_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    /// The query text changed
    SearchQueryChange(String),

    /// The query has been quiet for the debounce interval
    SearchQueryDidDebounce,

    SearchDidComplete(Result<SearchResponse, ClientError>),

    /// The user picked a result
    SearchResultSelect(SearchResult),

    ForecastDidComplete(ResultId, Result<ForecastResponse, ClientError>),
}

impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::SearchDidComplete(Ok(response)) => {
                format!("SearchDidComplete(Ok {{ results: {} }})", response.results.len())
            }
            Action::SearchResultSelect(result) => {
                format!("SearchResultSelect({} {:?})", result.id, result.name)
            }
            Action::ForecastDidComplete(id, Ok(forecast)) => {
                format!(
                    "ForecastDidComplete({id}, Ok {{ days: {} }})",
                    forecast.daily.time.len()
                )
            }
            Action::ForecastDidComplete(id, Err(e)) => {
                format!("ForecastDidComplete({id}, Err({e}))")
            }
            _ => format!("{:?}", self),
        }
    }
}
