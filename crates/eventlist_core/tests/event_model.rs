use eventlist_core::{Event, EventStats, EventValidationError, FilterType};

#[test]
fn new_event_is_active_with_generated_id() {
    let event = Event::new("Buy milk", None);

    assert!(uuid::Uuid::parse_str(event.id()).is_ok());
    assert_eq!(event.title, "Buy milk");
    assert!(event.is_active());
    assert!(!event.is_completed());
    assert_ne!(Event::new("Buy milk", None).id(), event.id());
}

#[test]
fn with_id_rejects_blank_id() {
    let err = Event::with_id(" ", "title", None).unwrap_err();
    assert_eq!(err, EventValidationError::EmptyId);
}

#[test]
fn completion_helpers_keep_identity() {
    let event = Event::with_id("1", "Buy milk", Some("2 litres".to_string())).unwrap();

    let completed = event.to_completed();
    assert_eq!(completed.id(), event.id());
    assert!(completed.is_completed());
    assert_ne!(completed, event);
    assert_eq!(completed.to_active(), event);
}

#[test]
fn title_for_list_falls_back_to_description() {
    let titled = Event::with_id("1", "Buy milk", Some("details".to_string())).unwrap();
    assert_eq!(titled.title_for_list(), "Buy milk");

    let untitled = Event::with_id("2", " ", Some("details".to_string())).unwrap();
    assert_eq!(untitled.title_for_list(), "details");
    assert!(!untitled.is_empty());

    let blank = Event::with_id("3", "", None).unwrap();
    assert_eq!(blank.title_for_list(), "");
    assert!(blank.is_empty());
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let event = Event::completed_with_id("1", "Buy milk", None, true).unwrap();

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["description"], serde_json::Value::Null);
    assert_eq!(json["completed"], true);

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn deserialize_defaults_optional_fields_and_rejects_blank_id() {
    let event: Event = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
    assert_eq!(event, Event::with_id("7", "", None).unwrap());

    let err = serde_json::from_str::<Event>(r#"{"id": ""}"#).unwrap_err();
    assert!(err.to_string().contains("must not be empty"), "{err}");
}

#[test]
fn stats_count_active_and_completed() {
    let events = vec![
        Event::completed_with_id("1", "a", None, false).unwrap(),
        Event::completed_with_id("2", "b", None, true).unwrap(),
        Event::completed_with_id("3", "c", None, true).unwrap(),
    ];

    let stats = EventStats::from_events(&events);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.total(), 3);
    assert_eq!(
        FilterType::Completed.apply(&events).len(),
        stats.completed
    );
}
