//! Tests for #[derive(Action)] macro

#![allow(dead_code)]

use store_dispatch::{
    Action, ActionSummary, DispatchResult, EffectStoreWithMiddleware, LoggingMiddleware,
};

#[derive(Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
enum SearchAction {
    SearchQueryChange(String),
    SearchQueryDidDebounce,
    SearchDidComplete(Result<Vec<String>, String>),
    SearchResultSelect { id: u64 },
    ForecastDidComplete(u64, Result<Vec<f64>, String>),
    #[action(category = "forecast")]
    ForecastPanel,
    #[action(skip_category)]
    SearchReset,
    Tick,
}

#[test]
fn test_names() {
    assert_eq!(
        SearchAction::SearchQueryChange("ny".into()).name(),
        "SearchQueryChange"
    );
    assert_eq!(
        SearchAction::SearchQueryDidDebounce.name(),
        "SearchQueryDidDebounce"
    );
    assert_eq!(
        SearchAction::SearchResultSelect { id: 1 }.name(),
        "SearchResultSelect"
    );
    assert_eq!(SearchAction::Tick.name(), "Tick");
}

#[test]
fn test_inferred_categories() {
    assert_eq!(
        SearchAction::SearchQueryChange(String::new()).category(),
        Some("search_query")
    );
    assert_eq!(
        SearchAction::SearchQueryDidDebounce.category(),
        Some("search_query")
    );
    assert_eq!(
        SearchAction::SearchDidComplete(Ok(vec![])).category(),
        Some("search")
    );
    assert_eq!(
        SearchAction::SearchResultSelect { id: 7 }.category(),
        Some("search_result")
    );
    assert_eq!(
        SearchAction::ForecastDidComplete(7, Err("boom".into())).category(),
        Some("forecast")
    );
    assert_eq!(SearchAction::Tick.category(), None);
}

#[test]
fn test_category_overrides() {
    assert_eq!(SearchAction::ForecastPanel.category(), Some("forecast"));
    assert_eq!(SearchAction::SearchReset.category(), None);
}

#[test]
fn test_predicates_and_enum() {
    let selected = SearchAction::SearchResultSelect { id: 3 };
    assert!(selected.is_search_result());
    assert!(!selected.is_search());
    assert!(SearchAction::SearchQueryDidDebounce.is_search_query());
    assert!(SearchAction::ForecastPanel.is_forecast());

    assert_eq!(selected.category_enum(), SearchActionCategory::SearchResult);
    assert_eq!(
        SearchAction::Tick.category_enum(),
        SearchActionCategory::Uncategorized
    );

    let names: Vec<_> = SearchActionCategory::all()
        .iter()
        .map(SearchActionCategory::name)
        .collect();
    assert_eq!(
        names,
        vec![
            "forecast",
            "search",
            "search_query",
            "search_result",
            "uncategorized"
        ]
    );
}

#[test]
fn test_category_trait() {
    fn category_of<A: store_dispatch::ActionCategory>(action: &A) -> Option<&'static str> {
        store_dispatch::ActionCategory::category(action)
    }

    assert_eq!(
        category_of(&SearchAction::SearchDidComplete(Err("x".into()))),
        Some("search")
    );
}

impl ActionSummary for SearchAction {}

#[test]
fn test_logging_middleware_accepts_derived_actions() {
    fn reducer(count: &mut usize, action: SearchAction) -> DispatchResult<()> {
        if action.is_search_query() {
            *count += 1;
            DispatchResult::changed()
        } else {
            DispatchResult::unchanged()
        }
    }

    let mut store = EffectStoreWithMiddleware::new(0, reducer, LoggingMiddleware::verbose());

    assert!(store.dispatch(SearchAction::SearchQueryDidDebounce).changed);
    assert!(!store.dispatch(SearchAction::Tick).changed);
    assert!(!store.dispatch(SearchAction::SearchReset).changed);
    assert_eq!(*store.state(), 1);
}
