//! End-to-end session flows against real gateways
//!
//! These drive `SessionController` the way a presentation layer would:
//! field text in, `FormView` out, operations only through the controller.

use student_registry::{
    Class, FieldKind, GatewayError, InMemoryGateway, JsonFileGateway, NewRecord, Operation,
    Record, RecordGateway, RecordId, SessionController, SessionError, SessionState, Sex,
};

fn fill(session: &mut SessionController<impl RecordGateway>, name: &str, phone: &str, age: &str) {
    session.set_text(FieldKind::Name, name);
    session.set_text(FieldKind::Phone, phone);
    session.set_text(FieldKind::Age, age);
}

/// Test 1: create then search reproduces every attribute
#[test]
fn create_then_search_round_trips() {
    let mut session = SessionController::new(InMemoryGateway::new());
    fill(&mut session, "José Ñúñez", "0551234567", "20");
    session.select_sex(Sex::Masculine);
    session.select_class(Class::Industrial);

    let id = session.create().expect("create should be allowed");

    session.set_text(FieldKind::Id, id.to_string());
    let record = session.search().expect("record should be found");

    assert_eq!(record.id, id);
    let view = session.view();
    assert_eq!(view.state, SessionState::Idle);
    assert_eq!(view.field(FieldKind::Name).unwrap().text, "José Ñúñez");
    assert_eq!(view.field(FieldKind::Phone).unwrap().text, "0551234567");
    assert_eq!(view.field(FieldKind::Age).unwrap().text, "20");
    assert_eq!(view.sex, Sex::Masculine);
    assert_eq!(view.class, Class::Industrial);
    assert!(view.gate.can_update);
}

/// Test 2: failed search empties dependent fields but keeps the id text
#[test]
fn failed_search_clears_dependents_and_keeps_identifier() {
    let mut session = SessionController::new(InMemoryGateway::new());
    fill(&mut session, "Ana", "5551234567", "20");
    session.select_sex(Sex::Feminine);
    session.select_class(Class::Sciences);
    session.set_text(FieldKind::Id, "65F0C0FFEE0000000000BEEF");

    let err = session.search().unwrap_err();
    assert!(err.is_not_found());

    let view = session.view();
    assert_eq!(view.state, SessionState::Editing);
    assert_eq!(view.field(FieldKind::Id).unwrap().text, "65F0C0FFEE0000000000BEEF");
    assert_eq!(view.field(FieldKind::Name).unwrap().text, "");
    assert_eq!(view.field(FieldKind::Phone).unwrap().text, "");
    assert_eq!(view.field(FieldKind::Age).unwrap().text, "");
    assert_eq!(view.sex, Sex::Masculine);
    assert_eq!(view.class, Class::Systems);
    assert_ne!(view.error(FieldKind::Id), "");
    assert!(!view.gate.can_create);
    assert!(view.gate.can_search);
}

/// Test 3: gate follows the decision table while typing
#[test]
fn gate_tracks_typing() {
    let mut session = SessionController::new(InMemoryGateway::new());
    fill(&mut session, "Ana", "5551234567", "20");

    let gate = session.gate();
    assert!(gate.can_create);
    assert!(!gate.can_update);

    session.set_text(FieldKind::Id, "65f0c0ffee0000000000beef");
    let gate = session.gate();
    assert!(gate.can_update && gate.can_delete && gate.can_search);

    session.set_text(FieldKind::Phone, "555123456");
    let view = session.view();
    assert!(!view.gate.can_create);
    assert!(!view.gate.can_update);
    assert!(view.gate.can_delete);
    assert_eq!(
        view.error(FieldKind::Phone),
        "The phone number must have exactly 10 digits"
    );
}

/// Test 4: update overwrites all attributes and resets the form
#[test]
fn update_overwrites_record() {
    let mut session = SessionController::new(InMemoryGateway::new());
    fill(&mut session, "Ana", "5551234567", "20");
    let id = session.create().unwrap();

    session.set_text(FieldKind::Id, id.to_string());
    session.search().unwrap();
    session.set_text(FieldKind::Age, "21");
    session.select_class(Class::Sciences);
    session.update().unwrap();

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.form().field(FieldKind::Id).text(), "");

    let stored = session.gateway().find_by_id(&id).unwrap();
    assert_eq!(stored.fields.age, 21);
    assert_eq!(stored.fields.class, Class::Sciences);
    assert_eq!(
        session.listing_lines(),
        vec![format!("{}: Ana - 5551234567 - Masculine - Sciences - 21", id)]
    );
}

/// Test 5: delete removes the record and a second delete is not found
#[test]
fn delete_then_delete_again() {
    let mut session = SessionController::new(InMemoryGateway::new());
    fill(&mut session, "Ana", "5551234567", "20");
    let id = session.create().unwrap();

    session.set_text(FieldKind::Id, id.to_string());
    session.delete().unwrap();
    assert!(session.listing_lines().is_empty());
    assert_eq!(session.form().field(FieldKind::Id).text(), "");

    session.set_text(FieldKind::Id, id.to_string());
    let err = session.delete().unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.form().field(FieldKind::Id).text(), id.as_str());
}

/// Test 6: malformed identifier never reaches the store
#[test]
fn malformed_identifier_disables_lookup() {
    let mut session = SessionController::new(InMemoryGateway::new());
    session.set_text(FieldKind::Id, "1234");
    assert!(matches!(
        session.search().unwrap_err(),
        SessionError::OperationDisabled {
            operation: Operation::Search
        }
    ));
    assert_eq!(
        session.view().error(FieldKind::Id),
        "The ID must be 24 hexadecimal characters"
    );
}

/// Test 7: records written through one session are visible to the next
#[test]
fn json_store_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");

    let id = {
        let mut session = SessionController::new(JsonFileGateway::open(&path).unwrap());
        fill(&mut session, "María", "5559876543", "22");
        session.select_sex(Sex::Feminine);
        session.create().unwrap()
    };

    let mut session = SessionController::new(JsonFileGateway::open(&path).unwrap());
    assert_eq!(session.listing_lines().len(), 1);

    session.set_text(FieldKind::Id, id.to_string());
    let record = session.search().unwrap();
    assert_eq!(record.fields.name, "María");
    assert_eq!(record.fields.sex, Sex::Feminine);
}

/// Test 8: a store file holding a record the form would reject never opens
#[test]
fn json_store_with_invalid_record_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    std::fs::write(
        &path,
        r#"[{"_id":"65f0c0ffee0000000000beef","Nombre":"R2-D2","Telefono":123456789012,"Edad":0}]"#,
    )
    .unwrap();

    let err = JsonFileGateway::open(&path).unwrap_err();
    assert!(matches!(err, GatewayError::InvalidDocument { .. }));
    assert!(!err.is_connectivity());
}

// ============================================================================
// Unreachable store
// ============================================================================

/// Store double whose every call fails as if the connection dropped
struct DisconnectedGateway;

impl DisconnectedGateway {
    fn down<T>() -> Result<T, GatewayError> {
        Err(GatewayError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }
}

impl RecordGateway for DisconnectedGateway {
    fn create(&mut self, _record: NewRecord) -> Result<RecordId, GatewayError> {
        Self::down()
    }

    fn find_by_id(&self, _id: &RecordId) -> Result<Record, GatewayError> {
        Self::down()
    }

    fn update(&mut self, _id: &RecordId, _record: NewRecord) -> Result<(), GatewayError> {
        Self::down()
    }

    fn delete(&mut self, _id: &RecordId) -> Result<(), GatewayError> {
        Self::down()
    }

    fn list_all(&self) -> Result<Vec<Record>, GatewayError> {
        Self::down()
    }
}

/// Test 9: connectivity loss is shown, and the form is left untouched
#[test]
fn unreachable_store_keeps_form_and_reports() {
    let mut session = SessionController::new(DisconnectedGateway);
    let startup = session.view();
    assert!(startup.status.as_ref().is_some_and(|s| s.is_error()));

    fill(&mut session, "Ana", "5551234567", "20");
    let err = session.create().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Gateway(GatewayError::Unavailable { .. })
    ));

    let view = session.view();
    assert_eq!(view.state, SessionState::Editing);
    assert_eq!(view.field(FieldKind::Name).unwrap().text, "Ana");
    assert!(view.gate.can_create);
    assert_eq!(
        view.status.unwrap().message(),
        "Record store unavailable: connection refused"
    );

    session.set_text(FieldKind::Id, "65f0c0ffee0000000000beef");
    assert!(session.search().is_err());
    assert_eq!(session.form().field(FieldKind::Name).text(), "Ana");
}
