//! Reducer flows driven through EffectStoreTestHarness
//!
//! Effects are collected instead of executed; async completions are fed
//! back by hand.

use chrono::NaiveDate;
use location_search::client::{Daily, DailyUnits};
use location_search::reducer::reducer;
use location_search::{
    Action, ClientError, Effect, ForecastResponse, ResultId, SearchResponse, SearchResult,
    SearchState,
};
use store_dispatch::testing::*;
use store_dispatch::{assert_emitted, assert_not_emitted, count_emitted, EffectStore};

fn location(id: i64, name: &str) -> SearchResult {
    SearchResult {
        id: ResultId(id),
        name: name.into(),
        latitude: 48.85,
        longitude: 2.35,
        country: Some("France".into()),
        admin1: Some("Île-de-France".into()),
    }
}

fn two_day_forecast() -> ForecastResponse {
    ForecastResponse {
        daily: Daily {
            time: vec![
                NaiveDate::from_ymd_opt(2024, 4, 18).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 19).unwrap(),
            ],
            temperature_max: vec![10.0, 12.0],
            temperature_min: vec![2.0, 3.0],
        },
        daily_units: DailyUnits {
            temperature_max: "°C".into(),
            temperature_min: "°C".into(),
        },
    }
}

#[test]
fn test_search_flow() {
    let mut harness = EffectStoreTestHarness::new(SearchState::default(), reducer);

    harness.dispatch_collect(Action::SearchQueryChange("Par".into()));
    harness.dispatch_collect(Action::SearchQueryChange("Paris".into()));
    harness.drain_effects().effects_empty();

    assert!(!harness.dispatch_collect(Action::SearchQueryDidDebounce));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    assert_emitted!(effects, Effect::Search { query } if query == "Paris");

    harness.complete_action(Action::SearchDidComplete(Ok(SearchResponse {
        results: vec![location(1, "Paris"), location(2, "Paris-l'Hôpital")],
    })));
    assert_eq!(harness.process_emitted(), (1, 1));
    harness.assert_state(|s| s.results.len() == 2);
}

#[test]
fn test_selection_flow() {
    let mut harness = EffectStoreTestHarness::new(SearchState::default(), reducer);
    let paris = location(1, "Paris");

    harness.dispatch_collect(Action::SearchResultSelect(paris.clone()));
    harness.assert_state(|s| s.is_loading(ResultId(1)));
    harness.drain_effects().effects_first_matches(|e| {
        matches!(e, Effect::FetchForecast { location } if location.id == ResultId(1))
    });

    harness.complete_action(Action::ForecastDidComplete(
        ResultId(1),
        Ok(two_day_forecast()),
    ));
    harness.process_emitted();

    harness.assert_state(|s| !s.is_loading(ResultId(1)));
    harness.assert_state(|s| {
        s.weather_for(ResultId(1))
            .is_some_and(|w| w.days.len() == 2 && w.days[1].temperature_min == 3.0)
    });
}

#[test]
fn test_two_selections_fetch_twice() {
    let mut harness = EffectStoreTestHarness::new(SearchState::default(), reducer);

    harness.dispatch_collect(Action::SearchResultSelect(location(1, "Paris")));
    harness.dispatch_collect(Action::SearchResultSelect(location(2, "Lyon")));

    let effects = harness.drain_effects();
    assert_eq!(count_emitted!(effects, Effect::FetchForecast { .. }), 2);
    harness.assert_state(|s| s.is_loading(ResultId(2)) && !s.is_loading(ResultId(1)));
}

#[test]
fn test_clear_after_any_state() {
    let mut harness = EffectStoreTestHarness::new(SearchState::default(), reducer);

    harness.dispatch_collect(Action::SearchQueryChange("Lyon".into()));
    harness.dispatch_collect(Action::SearchDidComplete(Ok(SearchResponse {
        results: vec![location(2, "Lyon")],
    })));
    harness.dispatch_collect(Action::ForecastDidComplete(
        ResultId(2),
        Ok(two_day_forecast()),
    ));
    harness.drain_effects();

    harness.dispatch_collect(Action::SearchQueryChange(String::new()));

    let effects = harness.drain_effects();
    assert_emitted!(effects, Effect::CancelSearch);
    assert_not_emitted!(effects, Effect::Search { .. });
    harness.assert_state(|s| s.results.is_empty() && s.weather.is_none());
}

#[test]
fn test_failures_clear_fields() {
    let mut store = EffectStore::new(SearchState::default(), reducer);

    store.dispatch(Action::SearchDidComplete(Ok(SearchResponse {
        results: vec![location(1, "Paris")],
    })));
    store.dispatch(Action::ForecastDidComplete(
        ResultId(1),
        Ok(two_day_forecast()),
    ));
    assert!(store.state().weather.is_some());

    let result = store.dispatch(Action::SearchDidComplete(Err(ClientError::Network(
        "connection reset".into(),
    ))));
    assert!(result.changed);
    assert!(store.state().results.is_empty());

    store.dispatch(Action::ForecastDidComplete(
        ResultId(1),
        Err(ClientError::Network("timeout".into())),
    ));
    assert!(store.state().weather.is_none());
}
