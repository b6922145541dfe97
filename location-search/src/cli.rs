//! Line-oriented front end: input commands and plain-text snapshots

use std::fmt::Write;

use crate::action::Action;
use crate::state::SearchState;

/// One line of user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the query text
    Query(String),
    /// Select the Nth result (1-based)
    Select(usize),
    Clear,
    Quit,
    Help,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("select" | "s"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Command::Select(n),
                _ => Command::Invalid(format!("not a result number: {n}")),
            },
            (Some("clear" | "c"), None) => Command::Clear,
            (Some("quit" | "q"), None) => Command::Quit,
            (Some("help" | "h"), None) => Command::Help,
            _ => Command::Invalid(format!("unknown command: {line}")),
        }
    }

    /// Translate into a controller action, resolving result numbers against `state`.
    pub fn to_action(&self, state: &SearchState) -> Result<Option<Action>, String> {
        match self {
            Command::Query(query) => Ok(Some(Action::SearchQueryChange(query.clone()))),
            Command::Clear => Ok(Some(Action::SearchQueryChange(String::new()))),
            Command::Select(n) => n
                .checked_sub(1)
                .and_then(|index| state.results.get(index))
                .map(|result| Some(Action::SearchResultSelect(result.clone())))
                .ok_or_else(|| format!("no result #{n} ({} available)", state.results.len())),
            Command::Quit | Command::Help => Ok(None),
            Command::Invalid(message) => Err(message.clone()),
        }
    }
}

pub const HELP: &str = "\
Type a location to search. Commands:
  :select N   fetch the forecast for result N
  :clear      clear the query
  :help       show this help
  :quit       exit";

/// Render the state as plain text.
pub fn render_snapshot(state: &SearchState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "query: {:?}", state.search_query);

    if state.results.is_empty() {
        let _ = writeln!(out, "  (no results)");
    }

    for (index, result) in state.results.iter().enumerate() {
        let marker = if state.is_loading(result.id) {
            "  [loading]"
        } else {
            ""
        };
        let _ = writeln!(out, "  {}. {}{}", index + 1, result.display_name(), marker);

        if let Some(weather) = state.weather_for(result.id) {
            for day in &weather.days {
                let _ = writeln!(
                    out,
                    "       {}  max {:.1}{}  min {:.1}{}",
                    day.date,
                    day.temperature_max,
                    day.temperature_max_unit,
                    day.temperature_min,
                    day.temperature_min_unit
                );
            }
        }
    }
    out
}
