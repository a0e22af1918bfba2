//! Session controller
//!
//! Orchestrates one editing session over a [`RecordGateway`]:
//!
//! ```text
//! Idle/Editing ── submit ──► Submitting ── success ──► Idle     (form reset)
//!                                 │
//!                                 └──── failure ──► Editing  (form kept, error set)
//! ```
//!
//! Every path that touches the form ends with the gate being derived again
//! through [`recompute`]; the gate itself is never stored. Gateway calls are
//! made only when the gate allows the operation.
//!
//! Every operation takes `&mut self` and runs the gateway call to completion
//! before returning, so calls are serialized by the borrow checker and a
//! second submission can never start while one is in flight. `Submitting`
//! is therefore only held inside an operation; callers observe `Idle` or
//! `Editing` between calls.

mod view;

pub use view::{FieldView, FormView, Status};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{GatewayError, SessionError, SessionResult};
use crate::form::{recompute, FormState, Operation, OperationGate};
use crate::gateway::RecordGateway;
use crate::types::{Class, FieldKind, Record, RecordId, Sex};

// ============================================================================
// Session state
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "operation", rename_all = "snake_case")]
pub enum SessionState {
    /// Form is empty or matches the last loaded record
    #[default]
    Idle,
    /// At least one field changed since the last load/reset
    Editing,
    /// A gateway call is in flight; never visible between operations
    Submitting(Operation),
}

impl SessionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SessionState::Submitting(_))
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct SessionController<G> {
    gateway: G,
    form: FormState,
    state: SessionState,
    status: Option<Status>,
    listing: Vec<Record>,
    listing_limit: Option<usize>,
}

impl<G: RecordGateway> SessionController<G> {
    /// Start a session with an empty form and load the initial listing.
    ///
    /// A store that cannot be listed does not prevent the session from
    /// starting; the failure is reported through the status line.
    pub fn new(gateway: G) -> Self {
        let mut session = Self {
            gateway,
            form: FormState::new(),
            state: SessionState::Idle,
            status: None,
            listing: Vec::new(),
            listing_limit: None,
        };
        session.reload_listing();
        session
    }

    /// Cap the number of listing lines exposed to the view
    pub fn with_listing_limit(mut self, limit: Option<usize>) -> Self {
        self.listing_limit = limit;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn gate(&self) -> OperationGate {
        recompute(&self.form)
    }

    // ------------------------------------------------------------------------
    // Field input
    // ------------------------------------------------------------------------

    /// Store raw text for a field; the field is revalidated immediately
    pub fn set_text(&mut self, kind: FieldKind, text: impl Into<String>) {
        self.form.set_text(kind, text);
        self.mark_edited();
    }

    pub fn select_sex(&mut self, sex: Sex) {
        self.form.select_sex(sex);
        self.mark_edited();
    }

    pub fn select_class(&mut self, class: Class) {
        self.form.select_class(class);
        self.mark_edited();
    }

    /// Reset the form to its initial empty state
    pub fn clear(&mut self) {
        self.form.reset();
        self.state = SessionState::Idle;
        self.status = None;
        self.log_gate();
    }

    fn mark_edited(&mut self) {
        self.state = SessionState::Editing;
        self.log_gate();
    }

    fn log_gate(&self) {
        let gate = recompute(&self.form);
        debug!(
            create = gate.can_create,
            update = gate.can_update,
            delete = gate.can_delete,
            search = gate.can_search,
            "gate recomputed"
        );
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Insert the form's attributes as a new record
    pub fn create(&mut self) -> SessionResult<RecordId> {
        if self.form.any_blank(Operation::Create.required_fields()) {
            return Err(self.reject(SessionError::AllFieldsRequired));
        }
        self.begin(Operation::Create)?;

        let record = match self.form.snapshot().into_new_record() {
            Some(record) => record,
            None => return Err(self.abort(Operation::Create)),
        };

        match self.gateway.create(record) {
            Ok(id) => {
                info!(%id, "student created");
                self.complete_mutation(format!("Student created with ID {}", id));
                Ok(id)
            }
            Err(e) => Err(self.fail(Operation::Create, e)),
        }
    }

    /// Overwrite every attribute of the record named by the id field
    pub fn update(&mut self) -> SessionResult<()> {
        self.begin(Operation::Update)?;

        let snapshot = self.form.snapshot();
        let (id, record) = match (snapshot.id.clone(), snapshot.into_new_record()) {
            (Some(id), Some(record)) => (id, record),
            _ => return Err(self.abort(Operation::Update)),
        };

        match self.gateway.update(&id, record) {
            Ok(()) => {
                info!(%id, "student updated");
                self.complete_mutation(format!("Student {} updated", id));
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::Update, e)),
        }
    }

    /// Delete the record named by the id field
    pub fn delete(&mut self) -> SessionResult<()> {
        self.begin(Operation::Delete)?;

        let Some(id) = self.form.record_id() else {
            return Err(self.abort(Operation::Delete));
        };

        match self.gateway.delete(&id) {
            Ok(()) => {
                info!(%id, "student deleted");
                self.complete_mutation(format!("Student {} deleted", id));
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::Delete, e)),
        }
    }

    /// Look up the record named by the id field and load it into the form.
    ///
    /// Every attempt first clears the attribute fields' error messages. When
    /// the identifier is unknown the attribute fields are emptied (selections
    /// back to defaults), the identifier text is kept and its field shows the
    /// not-found message. A found record is loaded as-is without
    /// revalidation, and the id field then shows the stored lowercase form
    /// of the identifier rather than the text that was typed.
    pub fn search(&mut self) -> SessionResult<Record> {
        self.form.clear_dependent_errors();
        self.begin(Operation::Search)?;

        let Some(id) = self.form.record_id() else {
            return Err(self.abort(Operation::Search));
        };

        match self.gateway.find_by_id(&id) {
            Ok(record) => {
                debug!(%id, "student loaded");
                self.form.load_record(&record);
                self.state = SessionState::Idle;
                self.status = Some(Status::Info(format!("Student {} loaded", id)));
                self.log_gate();
                Ok(record)
            }
            Err(e @ GatewayError::NotFound { .. }) => {
                warn!(%id, "student not found");
                self.form.clear_dependent();
                self.form.set_error(FieldKind::Id, e.to_string());
                self.state = SessionState::Editing;
                self.status = Some(Status::Error(e.to_string()));
                self.log_gate();
                Err(e.into())
            }
            Err(e) => Err(self.fail(Operation::Search, e)),
        }
    }

    // ------------------------------------------------------------------------
    // Listing
    // ------------------------------------------------------------------------

    /// Reload the listing from the store
    pub fn refresh_listing(&mut self) -> SessionResult<()> {
        self.listing = self.gateway.list_all()?;
        Ok(())
    }

    fn reload_listing(&mut self) {
        if let Err(e) = self.refresh_listing() {
            warn!(error = %e, "listing refresh failed");
            self.status = Some(Status::Error(e.to_string()));
        }
    }

    /// Records from the last refresh, in store order
    pub fn records(&self) -> &[Record] {
        let limit = self.listing_limit.unwrap_or(self.listing.len());
        &self.listing[..limit.min(self.listing.len())]
    }

    pub fn listing_lines(&self) -> Vec<String> {
        self.records().iter().map(ToString::to_string).collect()
    }

    /// Everything the presentation layer needs to render the form
    pub fn view(&self) -> FormView {
        FormView::build(
            self.state,
            &self.form,
            self.gate(),
            self.status.clone(),
            self.listing_lines(),
        )
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Enter `Submitting` if the operation is currently allowed
    fn begin(&mut self, operation: Operation) -> SessionResult<()> {
        if !recompute(&self.form).allows(operation) {
            return Err(self.reject(SessionError::OperationDisabled { operation }));
        }
        debug!(%operation, "submitting");
        self.state = SessionState::Submitting(operation);
        Ok(())
    }

    /// Record a refusal that never reached the store
    fn reject(&mut self, error: SessionError) -> SessionError {
        debug!(error = %error, "operation rejected");
        self.status = Some(Status::Error(error.to_string()));
        error
    }

    /// Leave `Submitting` without calling the store
    fn abort(&mut self, operation: Operation) -> SessionError {
        self.state = SessionState::Editing;
        self.reject(SessionError::OperationDisabled { operation })
    }

    /// Store call failed: keep the form, surface the error
    fn fail(&mut self, operation: Operation, error: GatewayError) -> SessionError {
        if error.is_connectivity() {
            warn!(%operation, error = %error, "record store unreachable");
        } else {
            warn!(%operation, error = %error, "operation failed");
        }
        self.state = SessionState::Editing;
        self.status = Some(Status::Error(error.to_string()));
        self.log_gate();
        error.into()
    }

    /// Confirmed mutation: reset the form and refresh the listing
    fn complete_mutation(&mut self, message: String) {
        self.form.reset();
        self.state = SessionState::Idle;
        self.status = Some(Status::Info(message));
        self.reload_listing();
        self.log_gate();
    }
}
