//! Controller flows driven through EffectStoreTestHarness
//!
//! Each test dispatches the actions the UI and the async tasks would emit
//! and checks panel, button and effects along the way.

use tui_dispatch::testing::*;
use weather_widget::{
    action::Action,
    effect::Effect,
    reducer::reducer,
    state::{AppState, ButtonLabel, Panel, WeatherReading},
};

fn mock_reading() -> WeatherReading {
    WeatherReading {
        city: "Quezon City".into(),
        country: "PH".into(),
        temperature: 29.4,
        feels_like: 33.1,
        description: "broken clouds".into(),
        icon: "04d".into(),
        humidity: 74,
        wind_speed: 3.09,
        pressure: 1009,
        visibility: Some(10000),
        sunrise: 1_760_390_400,
        sunset: 1_760_433_000,
    }
}

fn did_load(request_id: u64) -> Action {
    Action::WeatherDidLoad {
        request_id,
        reading: mock_reading(),
    }
}

// ============================================================================
// Search flow
// ============================================================================

#[test]
fn test_search_flow_success() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchInputChange("Quezon City".into()));
    harness.dispatch_collect(Action::SearchSubmit("Quezon City".into()));
    harness.assert_state(|s| s.is_loading());
    harness.assert_state(|s| !s.button.enabled);
    harness.assert_state(|s| s.button.label == ButtonLabel::Loading);

    let effects = harness.drain_effects();
    effects.effects_count(2);
    assert!(effects.iter().any(|e| {
        matches!(e, Effect::FetchWeather { query, request_id: 1 } if query.as_str() == "Quezon City")
    }));

    // Simulate async completion
    harness.complete_action(did_load(1));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.reading() == Some(&mock_reading()));
    harness.assert_state(|s| s.button.enabled);
    harness.assert_state(|s| s.button.label == ButtonLabel::Search);
}

#[test]
fn test_search_flow_provider_error() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Atlantis".into()));
    harness.drain_effects();

    harness.complete_action(Action::WeatherDidError {
        request_id: 1,
        message: "City not found. Please check the city name.".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.error_message() == Some("City not found. Please check the city name."));
    harness.assert_state(|s| s.button.enabled);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::ScheduleErrorDismiss { .. }));
}

#[test]
fn test_invalid_input_never_fetches() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let messages = [
        ("", "Please enter a city name."),
        ("   ", "Please enter a city name."),
        ("Z", "City name must be at least 2 characters long."),
        ("{Tokyo}", "City name contains invalid characters."),
        ("back\\slash", "City name contains invalid characters."),
    ];

    for (raw, expected) in messages {
        harness.dispatch_collect(Action::SearchSubmit(raw.into()));
        harness.assert_state(|s| s.error_message() == Some(expected));
        let effects = harness.drain_effects();
        effects.effects_none_match(|e| matches!(e, Effect::FetchWeather { .. }));
    }

    harness.assert_state(|s| s.request_id == 0);
}

// ============================================================================
// Error auto-dismiss
// ============================================================================

#[test]
fn test_error_dismissed_when_timer_fires() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("a".into()));
    harness.assert_state(|s| s.error_message().is_some());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::ScheduleErrorDismiss { generation: 1 }));

    // The timer task completes five seconds later
    harness.complete_action(Action::ErrorDidExpire(1));
    harness.process_emitted();

    harness.assert_state(|s| s.panel == Panel::Idle);
}

#[test]
fn test_stale_timer_ignored_after_new_search() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("a".into()));
    harness.dispatch_collect(Action::SearchSubmit("Baguio".into()));

    // Entering loading cancels the pending timer
    let effects = harness.drain_effects();
    assert!(effects.iter().any(|e| matches!(e, Effect::CancelErrorDismiss)));

    harness.complete_action(did_load(1));
    harness.complete_action(Action::ErrorDidExpire(1));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 2);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.reading().is_some());
}

#[test]
fn test_typing_hides_error() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("".into()));
    harness.drain_effects();

    harness.dispatch_collect(Action::SearchInputChange("M".into()));
    harness.assert_state(|s| s.panel == Panel::Idle);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::CancelErrorDismiss));
}

// ============================================================================
// Overlapping searches
// ============================================================================

#[test]
fn test_second_submit_while_loading_is_ignored() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([
        Action::SearchSubmit("Iloilo".into()),
        Action::SearchSubmit("Iloilo".into()),
    ]);
    assert_eq!(results, vec![true, false]);

    let effects = harness.drain_effects();
    effects.effects_count(2);
    harness.assert_state(|s| s.request_id == 1);
}

#[test]
fn test_late_response_for_old_request_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Iloilo".into()));
    harness.complete_action(Action::WeatherDidError {
        request_id: 1,
        message: "Failed to fetch weather data. Please try again.".into(),
    });
    harness.process_emitted();
    harness.dispatch_collect(Action::SearchSubmit("Cebu".into()));

    harness.complete_action(did_load(1));
    let (changed, _) = harness.process_emitted();

    assert_eq!(changed, 0);
    harness.assert_state(|s| s.is_loading());
}

// ============================================================================
// Spinner
// ============================================================================

#[test]
fn test_spinner_advances_only_while_loading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    assert_eq!(harness.dispatch_all([Action::Tick]), vec![false]);

    harness.dispatch_collect(Action::SearchSubmit("Bohol".into()));
    assert_eq!(harness.dispatch_all([Action::Tick, Action::Tick]), vec![true, true]);
    harness.assert_state(|s| s.tick_count == 2);
}
