use uuid::Uuid;

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_pointer() {
    assert_eq!(Tool::default(), Tool::Pointer);
}

#[test]
fn tool_serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&Tool::Selector).unwrap(), "\"selector\"");
    let back: Tool = serde_json::from_str("\"pointer\"").unwrap();
    assert_eq!(back, Tool::Pointer);
}

#[test]
fn tool_unknown_name_is_rejected() {
    assert!(serde_json::from_str::<Tool>("\"lasso\"").is_err());
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn gesture_default_is_idle() {
    assert!(Gesture::default().is_idle());
}

#[test]
fn gesture_names_are_distinct() {
    let id = Uuid::new_v4();
    let p = Point::ZERO;
    let states = [
        Gesture::Idle,
        Gesture::PanningCanvas { down_screen: p, pan_at_down: p },
        Gesture::DraggingObject { id, down_screen: p, origin: p },
        Gesture::Rotating { id, down_screen: p, start_angle: 0.0, pivot: p },
    ];
    for (i, a) in states.iter().enumerate() {
        assert_eq!(a.is_idle(), i == 0);
        for (j, b) in states.iter().enumerate() {
            assert_eq!(a.name() == b.name(), i == j);
        }
    }
}

// =============================================================
// Action
// =============================================================

#[test]
fn action_equality_compares_payload() {
    let id = Uuid::new_v4();
    assert_eq!(Action::SelectionChanged(Some(id)), Action::SelectionChanged(Some(id)));
    assert_ne!(Action::SelectionChanged(Some(id)), Action::SelectionChanged(None));
    assert_ne!(
        Action::EditorClosed { id, text: "a".into() },
        Action::EditorClosed { id, text: "b".into() }
    );
}
