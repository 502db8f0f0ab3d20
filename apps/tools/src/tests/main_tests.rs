use super::*;
use shared::domain::StyleClass;

const DEMO_EVENTS: &str = include_str!("../../demo_events.json");

#[test]
fn bundled_event_log_ends_in_try_on() {
    let state = replay(DEMO_EVENTS).expect("replay");

    assert!(!state.toggle);
    assert_eq!(state.toggle_label, "Try-on");
    assert_eq!(state.submit_label, "Run Try-on");
    assert_eq!(state.garment, Some(ImageRef::from("/examples/warriors23.jpg")));
    assert!(state.garment_interactive);
    assert_eq!(state.garment_style, StyleClass::Enabled);
    assert_eq!(state.output, Some(ImageRef::from("/examples/ronaldo.webp")));
    assert_eq!(
        state.model.map(|model| model.background),
        Some(ImageRef::from("/examples/lebron.png"))
    );
}

#[test]
fn replay_rejects_non_array_log() {
    let err = replay(r#"{ "type": "toggle_changed", "payload": { "value": true } }"#)
        .expect_err("object is not a log");
    assert!(err.to_string().contains("JSON array of events"));
}

#[test]
fn empty_log_leaves_initial_state() {
    let state = replay("[]").expect("replay");
    assert_eq!(state.toggle_label, "Try-on");
    assert!(state.garment.is_none());
}
