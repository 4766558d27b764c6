//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! Panel transitions live in the small helpers below so every path into
//! loading, result and error goes through the same code.

use log::debug;
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, ButtonLabel, Panel, WeatherReading};
use crate::validate::validate_city;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchInputChange(text) => {
            state.query = text;
            if clear_error_on_input(state) {
                DispatchResult::changed_with(Effect::CancelErrorDismiss)
            } else {
                DispatchResult::changed()
            }
        }

        Action::SearchSubmit(text) => {
            // Disabled while a request is in flight
            if !state.button.enabled {
                return DispatchResult::unchanged();
            }
            state.query = text;

            match validate_city(&state.query) {
                Ok(query) => {
                    show_loading(state);
                    state.request_id = state.request_id.wrapping_add(1);
                    DispatchResult::changed_with_many(vec![
                        Effect::CancelErrorDismiss,
                        Effect::FetchWeather {
                            query,
                            request_id: state.request_id,
                        },
                    ])
                }
                Err(err) => DispatchResult::changed_with(show_error(state, err.to_string())),
            }
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad {
            request_id,
            reading,
        } => {
            if request_id != state.request_id {
                debug!("dropping stale result for request {request_id}");
                return DispatchResult::unchanged();
            }
            hide_loading(state);
            show_result(state, reading);
            DispatchResult::changed()
        }

        Action::WeatherDidError {
            request_id,
            message,
        } => {
            if request_id != state.request_id {
                debug!("dropping stale result for request {request_id}");
                return DispatchResult::unchanged();
            }
            hide_loading(state);
            DispatchResult::changed_with(show_error(state, message))
        }

        // ===== Error actions =====
        Action::ErrorDidExpire(generation) => {
            if dismiss_error(state, generation) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiFocusNext => {
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Show the loading panel and lock the search button.
pub fn show_loading(state: &mut AppState) {
    state.panel = Panel::Loading;
    state.button.enabled = false;
    state.button.label = ButtonLabel::Loading;
    state.tick_count = 0;
}

/// Unlock the search button. Leaves the panel to the caller unless it is
/// still showing the loading panel.
pub fn hide_loading(state: &mut AppState) {
    if state.is_loading() {
        state.panel = Panel::Idle;
    }
    state.button.enabled = true;
    state.button.label = ButtonLabel::Search;
}

pub fn show_result(state: &mut AppState, reading: WeatherReading) {
    state.panel = Panel::Result(reading);
}

/// Show an error in place of any result and return the effect that
/// schedules its dismissal.
pub fn show_error(state: &mut AppState, message: String) -> Effect {
    state.error_generation = state.error_generation.wrapping_add(1);
    let generation = state.error_generation;
    state.panel = Panel::Error {
        message,
        generation,
    };
    Effect::ScheduleErrorDismiss { generation }
}

/// Hide the error panel if it is still showing error `generation`.
pub fn dismiss_error(state: &mut AppState, generation: u64) -> bool {
    match state.panel {
        Panel::Error {
            generation: shown, ..
        } if shown == generation => {
            state.panel = Panel::Idle;
            true
        }
        _ => false,
    }
}

/// Hide a visible error as soon as the user types again.
pub fn clear_error_on_input(state: &mut AppState) -> bool {
    if matches!(state.panel, Panel::Error { .. }) {
        state.panel = Panel::Idle;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Focus;

    fn reading() -> WeatherReading {
        WeatherReading {
            city: "London".into(),
            country: "GB".into(),
            temperature: 21.6,
            description: "light rain".into(),
            icon: "10d".into(),
            ..Default::default()
        }
    }

    fn loading_state() -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("London".into()));
        state
    }

    #[test]
    fn test_valid_submit_starts_loading() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SearchSubmit("  London ".into()));

        assert!(result.changed);
        assert!(state.is_loading());
        assert!(!state.button.enabled);
        assert_eq!(state.button.label, ButtonLabel::Loading);
        assert_eq!(state.request_id, 1);
        assert_eq!(result.effects.len(), 2);
        assert_eq!(result.effects[0], Effect::CancelErrorDismiss);
        match &result.effects[1] {
            Effect::FetchWeather { query, request_id } => {
                assert_eq!(query.as_str(), "London");
                assert_eq!(*request_id, 1);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn test_invalid_submit_shows_error_without_fetch() {
        for raw in ["", " ", "x", "Lon<don"] {
            let mut state = AppState::default();
            let result = reducer(&mut state, Action::SearchSubmit(raw.into()));

            assert!(state.error_message().is_some(), "{raw:?}");
            assert!(state.button.enabled);
            assert_eq!(state.request_id, 0);
            assert!(
                result
                    .effects
                    .iter()
                    .all(|e| !matches!(e, Effect::FetchWeather { .. })),
                "{raw:?} must not fetch"
            );
        }
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let mut state = loading_state();

        let result = reducer(&mut state, Action::SearchSubmit("Paris".into()));

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.request_id, 1);
        assert_eq!(state.query, "London");
    }

    #[test]
    fn test_load_shows_result_and_unlocks_button() {
        let mut state = loading_state();

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request_id: 1,
                reading: reading(),
            },
        );

        assert!(result.changed);
        assert_eq!(state.reading(), Some(&reading()));
        assert!(state.button.enabled);
        assert_eq!(state.button.label, ButtonLabel::Search);
    }

    #[test]
    fn test_stale_result_dropped() {
        let mut state = loading_state();
        reducer(
            &mut state,
            Action::WeatherDidError {
                request_id: 1,
                message: "City not found. Please check the city name.".into(),
            },
        );
        reducer(&mut state, Action::SearchSubmit("Paris".into()));
        assert_eq!(state.request_id, 2);

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request_id: 1,
                reading: reading(),
            },
        );

        assert!(!result.changed);
        assert!(state.is_loading());
    }

    #[test]
    fn test_fetch_error_schedules_dismiss() {
        let mut state = loading_state();

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                request_id: 1,
                message: "Invalid API key. Please check your configuration.".into(),
            },
        );

        assert_eq!(
            state.error_message(),
            Some("Invalid API key. Please check your configuration.")
        );
        assert!(state.button.enabled);
        assert_eq!(
            result.effects,
            vec![Effect::ScheduleErrorDismiss {
                generation: state.error_generation
            }]
        );
    }

    #[test]
    fn test_error_replaces_result() {
        let mut state = AppState::default();
        show_result(&mut state, reading());

        show_error(&mut state, "boom".into());

        assert!(state.reading().is_none());
        assert_eq!(state.error_message(), Some("boom"));
    }

    #[test]
    fn test_expired_dismiss_hides_matching_error_only() {
        let mut state = AppState::default();
        let Effect::ScheduleErrorDismiss { generation: first } =
            show_error(&mut state, "first".into())
        else {
            panic!("expected dismiss effect");
        };
        let Effect::ScheduleErrorDismiss { generation: second } =
            show_error(&mut state, "second".into())
        else {
            panic!("expected dismiss effect");
        };

        let result = reducer(&mut state, Action::ErrorDidExpire(first));
        assert!(!result.changed);
        assert_eq!(state.error_message(), Some("second"));

        let result = reducer(&mut state, Action::ErrorDidExpire(second));
        assert!(result.changed);
        assert_eq!(state.panel, Panel::Idle);
    }

    #[test]
    fn test_expired_dismiss_never_hides_newer_result() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("x".into()));
        let stale = state.error_generation;
        reducer(&mut state, Action::SearchSubmit("London".into()));
        let request_id = state.request_id;
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request_id,
                reading: reading(),
            },
        );

        let result = reducer(&mut state, Action::ErrorDidExpire(stale));

        assert!(!result.changed);
        assert!(state.reading().is_some());
    }

    #[test]
    fn test_typing_clears_error() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("".into()));
        assert!(state.error_message().is_some());

        let result = reducer(&mut state, Action::SearchInputChange("L".into()));

        assert!(result.changed);
        assert_eq!(state.panel, Panel::Idle);
        assert_eq!(state.query, "L");
        assert_eq!(result.effects, vec![Effect::CancelErrorDismiss]);
    }

    #[test]
    fn test_typing_keeps_result() {
        let mut state = AppState::default();
        show_result(&mut state, reading());

        let result = reducer(&mut state, Action::SearchInputChange("Par".into()));

        assert!(result.effects.is_empty());
        assert!(state.reading().is_some());
    }

    #[test]
    fn test_hide_loading_independent_of_outcome() {
        let mut state = AppState::default();
        show_loading(&mut state);
        hide_loading(&mut state);

        assert_eq!(state.panel, Panel::Idle);
        assert!(state.button.enabled);
        assert_eq!(state.button.label, ButtonLabel::Search);
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        show_loading(&mut state);
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn test_focus_cycles() {
        let mut state = AppState::default();
        reducer(&mut state, Action::UiFocusNext);
        assert_eq!(state.focus, Focus::Button);
        reducer(&mut state, Action::UiFocusNext);
        assert_eq!(state.focus, Focus::Input);
    }
}
