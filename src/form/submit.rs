//! Submission orchestration: validate, normalize, encode, send, notify.
//!
//! DESIGN
//! ======
//! `idle → submitting → idle`. The orchestrator admits one in-flight
//! submission at a time through an atomic flag held by an RAII guard, so the
//! flag is released on every exit path. A submit attempted while another is
//! in flight is a no-op (`SubmitOutcome::Rejected`), never queued.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures stay on the form as field errors and never reach the
//! transport. Transport failures are forwarded to the notifier with the
//! server's message; the draft is left exactly as the user typed it so the
//! submit can be retried.

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use super::editor::RestaurantForm;
use super::encode::encode_submission;
use super::normalize::to_wire;
use super::validate::ValidationErrors;
use crate::transport::{Notifier, RestaurantTransport, TransportError, TransportReply};

/// Label shown on the submit control while a submission is in flight.
pub const SUBMITTING_LABEL: &str = "submitting";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
}

/// Whether a submit creates a restaurant or updates the existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

impl SubmitMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Transport accepted the submission.
    Sent { mode: SubmitMode, reply: TransportReply },
    /// Transport rejected or failed the submission.
    Failed { mode: SubmitMode, error: TransportError },
    /// Validation blocked the submission; no transport call was made.
    Invalid(ValidationErrors),
    /// Another submission was already in flight.
    Rejected,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SubmissionOrchestrator {
    transport: Arc<dyn RestaurantTransport>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl SubmissionOrchestrator {
    pub fn new(transport: Arc<dyn RestaurantTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self { transport, notifier, in_flight: AtomicBool::new(false) }
    }

    pub fn status(&self) -> SubmitStatus {
        if self.in_flight.load(Ordering::Acquire) { SubmitStatus::Submitting } else { SubmitStatus::Idle }
    }

    pub fn is_submitting(&self) -> bool {
        self.status() == SubmitStatus::Submitting
    }

    /// Controls are disabled while a submission is in flight.
    pub fn controls_disabled(&self) -> bool {
        self.is_submitting()
    }

    /// Text for the submit control of `form`.
    pub fn submit_label(&self, form: &RestaurantForm) -> &'static str {
        if self.is_submitting() { SUBMITTING_LABEL } else { form.mode().label() }
    }

    /// Run one submit cycle for `form`.
    ///
    /// Creates when the session has no existing restaurant, updates otherwise.
    pub async fn submit(&self, form: &mut RestaurantForm) -> SubmitOutcome {
        if self.is_submitting() {
            warn!("submission already in flight; ignoring submit");
            return SubmitOutcome::Rejected;
        }

        let valid = match form.validate_all() {
            Ok(valid) => valid,
            Err(errors) => {
                warn!(errors = errors.len(), "submission blocked by validation errors");
                return SubmitOutcome::Invalid(errors);
            }
        };

        let wire = match to_wire(valid) {
            Ok(wire) => wire,
            Err(errors) => {
                warn!(errors = errors.len(), "submission blocked by unit conversion errors");
                form.replace_errors(errors.clone());
                return SubmitOutcome::Invalid(errors);
            }
        };

        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            warn!("submission already in flight; ignoring submit");
            return SubmitOutcome::Rejected;
        };

        let mode = form.mode();
        let payload = encode_submission(wire);
        info!(
            mode = mode.label(),
            fields = payload.len(),
            has_image = payload.has_file(),
            "submitting restaurant"
        );

        let result = match mode {
            SubmitMode::Create => self.transport.submit_create(payload).await,
            SubmitMode::Update => self.transport.submit_update(payload).await,
        };

        match result {
            Ok(reply) => {
                info!(mode = mode.label(), "restaurant submission accepted");
                self.notifier.success(&reply.message);
                SubmitOutcome::Sent { mode, reply }
            }
            Err(error) => {
                warn!(mode = mode.label(), %error, retryable = error.retryable(), "restaurant submission failed");
                self.notifier.error(&error.to_string());
                SubmitOutcome::Failed { mode, error }
            }
        }
    }
}
