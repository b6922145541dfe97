//! Effects - side effects declared by the reducer
//!
//! The reducer stays synchronous; the controller turns these into tasks in
//! the `location` and `weather` scopes.

use crate::state::SearchResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Cancel the pending debounce timer or search
    CancelSearch,

    /// Search for locations matching `query`
    Search { query: String },

    /// Fetch the forecast for `location`, replacing any in-flight fetch
    FetchForecast { location: SearchResult },
}
