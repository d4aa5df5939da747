//! Form state controller: owns the field and error records and mediates the
//! submit transition.
//!
//! Submission is split into [`FormController::begin_submit`] and
//! [`FormController::finish`] so the caller can keep accepting edits while a
//! handler call is outstanding. [`FormController::submit`] chains the two for
//! callers that do not need that. Split callers that stop waiting hand the
//! submission back through [`FormController::abandon`].

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::field::{FieldKind, FieldValue};
use super::mode::{FormMode, ModeDispatcher, field_domain, lookup_field};
use super::record::{ErrorRecord, FormRecord};
use super::rules::{Validation, validate};
use crate::domain::ports::SubmitHandler;
use crate::domain::{Error, ErrorCode, TraceId};

/// Misuse of the edit API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The name is not a field of any mode of this form.
    #[error("unknown field: {name}")]
    UnknownField {
        /// Name supplied by the caller.
        name: String,
    },
    /// The value does not match the field's declared kind.
    #[error("field {field} expects a {expected} value, got {found}")]
    KindMismatch {
        /// Field name.
        field: &'static str,
        /// Declared kind.
        expected: FieldKind,
        /// Kind supplied.
        found: FieldKind,
    },
}

/// Why a submission did not reach the handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    /// At least one field failed validation.
    #[error("{} field(s) failed validation", .errors.len())]
    Invalid {
        /// Messages for every failing field.
        errors: ErrorRecord,
    },
    /// A previous submission is still awaiting its handler.
    #[error("a submission is already in flight")]
    InFlight,
    /// [`FormController::begin_resubmit`] was called with nothing to retry.
    #[error("there is no failed submission to retry")]
    NothingToRetry,
}

/// Result of a submission that reached the handler.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<O> {
    /// The handler succeeded.
    Completed(O),
    /// The handler failed; the form stays open with a banner.
    Failed(Error),
    /// The form was reset while the handler ran; the result was dropped.
    Abandoned,
}

/// Form-level failure message, kept apart from per-field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Banner {
    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message to display.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier of the failed submission.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl From<&Error> for Banner {
    fn from(error: &Error) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_owned(),
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

/// Validated projection captured when a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot<M> {
    mode: M,
    record: FormRecord,
}

/// A validated submission awaiting its handler.
///
/// Holds its own copy of the projected record, so edits made after
/// [`FormController::begin_submit`] do not reach the handler.
#[derive(Debug)]
pub struct PendingSubmission<M: FormMode> {
    ticket: u64,
    generation: u64,
    trace_id: TraceId,
    snapshot: Snapshot<M>,
    payload: M::Payload,
}

impl<M: FormMode> PendingSubmission<M> {
    fn new(ticket: u64, generation: u64, snapshot: Snapshot<M>) -> Self {
        let payload = snapshot.mode.payload(&snapshot.record);
        Self {
            ticket,
            generation,
            trace_id: TraceId::generate(),
            snapshot,
            payload,
        }
    }

    /// Mode the submission was validated against.
    pub fn mode(&self) -> M {
        self.snapshot.mode
    }

    /// Projected record the payload was built from.
    pub fn projected(&self) -> &FormRecord {
        &self.snapshot.record
    }

    /// Typed payload for the handler.
    pub fn payload(&self) -> &M::Payload {
        &self.payload
    }

    /// Trace identifier scoped around the handler call.
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Invoke `handler` with the payload inside this submission's trace scope.
    pub async fn dispatch<H>(&self, handler: &H) -> Result<H::Output, Error>
    where
        H: SubmitHandler<M::Payload> + ?Sized,
    {
        TraceId::scope(self.trace_id, handler.handle(&self.payload)).await
    }
}

/// Ties an outstanding submission to its controller so the in-flight slot
/// is released if the submitting future is dropped before the handler
/// answers.
struct InFlightSlot<'a, M: FormMode> {
    form: &'a mut FormController<M>,
    ticket: u64,
    generation: u64,
    armed: bool,
}

impl<'a, M: FormMode> InFlightSlot<'a, M> {
    fn new(form: &'a mut FormController<M>, pending: &PendingSubmission<M>) -> Self {
        Self {
            form,
            ticket: pending.ticket,
            generation: pending.generation,
            armed: true,
        }
    }

    async fn run<H>(
        mut self,
        pending: PendingSubmission<M>,
        handler: &H,
    ) -> SubmitOutcome<H::Output>
    where
        H: SubmitHandler<M::Payload> + ?Sized,
    {
        let result = pending.dispatch(handler).await;
        self.armed = false;
        self.form.finish(pending, result)
    }
}

impl<M: FormMode> Drop for InFlightSlot<'_, M> {
    fn drop(&mut self) {
        if self.armed {
            self.form.release(self.ticket, self.generation);
        }
    }
}

/// Owns a [`FormRecord`] and its [`ErrorRecord`] for one form instance.
///
/// ## Invariants
/// - The handler is never invoked while the active ruleset reports errors.
/// - At most one submission is in flight.
/// - Error keys are always a subset of record keys.
/// - A handler failure never clears the record and never touches the error
///   record; it is reported through [`FormController::banner`].
///
/// # Examples
/// ```
/// use hub::domain::auth::AuthMode;
/// use hub::domain::form::FormController;
///
/// let mut form = FormController::new(AuthMode::Login);
/// form.set_field("email", "bob@example").unwrap();
/// assert!(!form.validate(AuthMode::Login).is_valid());
/// ```
#[derive(Debug)]
pub struct FormController<M: FormMode> {
    record: FormRecord,
    errors: ErrorRecord,
    dispatcher: ModeDispatcher<M>,
    in_flight: Option<u64>,
    next_ticket: u64,
    generation: u64,
    retry: Option<Snapshot<M>>,
    banner: Option<Banner>,
}

impl<M: FormMode> FormController<M> {
    /// Open an empty form in `initial` mode.
    #[must_use]
    pub fn new(initial: M) -> Self {
        Self {
            record: Self::blank_record(),
            errors: ErrorRecord::default(),
            dispatcher: ModeDispatcher::new(initial),
            in_flight: None,
            next_ticket: 0,
            generation: 0,
            retry: None,
            banner: None,
        }
    }

    /// Open a form pre-seeded with existing values.
    ///
    /// # Errors
    /// Returns a [`FormError`] when a seed names an unknown field or carries
    /// a value of the wrong kind.
    pub fn seeded<I, V>(initial: M, seed: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<FieldValue>,
    {
        let mut form = Self::new(initial);
        for (name, value) in seed {
            form.set_field(name, value)?;
        }
        Ok(form)
    }

    fn blank_record() -> FormRecord {
        FormRecord::blank(&field_domain::<M>())
    }

    /// Current field values.
    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    /// Current per-field validation messages.
    pub fn errors(&self) -> &ErrorRecord {
        &self.errors
    }

    /// Active mode.
    pub fn mode(&self) -> M {
        self.dispatcher.active()
    }

    /// Form-level failure from the last handler call, if any.
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Whether a submission is awaiting its handler.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a failed submission can be retried with
    /// [`FormController::begin_resubmit`].
    pub fn can_resubmit(&self) -> bool {
        self.retry.is_some() && self.in_flight.is_none()
    }

    /// Switch the active mode. Values and errors are kept as they are.
    pub fn select_mode(&mut self, mode: M) -> M {
        self.dispatcher.select(mode)
    }

    /// Overwrite one field and drop its validation message.
    ///
    /// # Errors
    /// Returns a [`FormError`] and leaves state untouched when the field is
    /// unknown or the value has the wrong kind.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let field = lookup_field::<M>(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_owned(),
        })?;
        let value = value.into();
        if value.kind() != field.kind() {
            return Err(FormError::KindMismatch {
                field: field.name(),
                expected: field.kind(),
                found: value.kind(),
            });
        }
        self.record.insert(field, value);
        self.errors.clear_field(field.name());
        Ok(())
    }

    /// Run the ruleset of `mode` over the current record.
    ///
    /// Pure: neither record is modified.
    pub fn validate(&self, mode: M) -> Validation {
        validate(ModeDispatcher::ruleset_for(mode), &self.record)
    }

    /// Project the current record onto the fields of `mode`.
    pub fn extract(&self, mode: M) -> FormRecord {
        ModeDispatcher::extract(mode, &self.record)
    }

    /// Validate the active mode and, when clean, take a snapshot for the
    /// handler.
    ///
    /// # Errors
    /// [`SubmitBlocked::InFlight`] while another submission is outstanding;
    /// [`SubmitBlocked::Invalid`] when validation fails, in which case the
    /// returned errors are also stored on the form.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission<M>, SubmitBlocked> {
        if self.in_flight.is_some() {
            return Err(SubmitBlocked::InFlight);
        }

        let mode = self.mode();
        let validation = self.validate(mode);
        if !validation.is_valid() {
            self.errors = validation.into_errors();
            debug!(
                mode = mode.label(),
                failing = self.errors.len(),
                "submission blocked by validation"
            );
            return Err(SubmitBlocked::Invalid {
                errors: self.errors.clone(),
            });
        }

        self.errors = validation.into_errors();
        let snapshot = Snapshot {
            mode,
            record: self.extract(mode),
        };
        Ok(self.start(snapshot))
    }

    /// Retry the last failed submission with its validated snapshot, without
    /// validating again.
    ///
    /// # Errors
    /// [`SubmitBlocked::InFlight`] while another submission is outstanding;
    /// [`SubmitBlocked::NothingToRetry`] when no failure is pending.
    pub fn begin_resubmit(&mut self) -> Result<PendingSubmission<M>, SubmitBlocked> {
        if self.in_flight.is_some() {
            return Err(SubmitBlocked::InFlight);
        }
        let snapshot = self.retry.clone().ok_or(SubmitBlocked::NothingToRetry)?;
        Ok(self.start(snapshot))
    }

    fn start(&mut self, snapshot: Snapshot<M>) -> PendingSubmission<M> {
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.in_flight = Some(ticket);
        let pending = PendingSubmission::new(ticket, self.generation, snapshot);
        debug!(
            mode = pending.mode().label(),
            trace_id = %pending.trace_id(),
            "submission started"
        );
        pending
    }

    /// Record the handler's result for `pending`.
    ///
    /// On success the submitted mode's transient fields are wiped and any
    /// banner or retry snapshot is dropped. On failure the record is left as
    /// is, a banner is raised and the snapshot is kept for a resubmit.
    pub fn finish<O>(
        &mut self,
        pending: PendingSubmission<M>,
        result: Result<O, Error>,
    ) -> SubmitOutcome<O> {
        if pending.generation != self.generation || self.in_flight != Some(pending.ticket) {
            debug!(
                trace_id = %pending.trace_id,
                "submission result dropped after the form was reset"
            );
            return SubmitOutcome::Abandoned;
        }
        self.in_flight = None;

        let PendingSubmission {
            trace_id, snapshot, ..
        } = pending;
        match result {
            Ok(output) => {
                for field in snapshot.mode.transient_fields() {
                    self.record
                        .insert(*field, FieldValue::empty(field.kind()));
                }
                self.retry = None;
                self.banner = None;
                info!(mode = snapshot.mode.label(), %trace_id, "submission completed");
                SubmitOutcome::Completed(output)
            }
            Err(error) => {
                warn!(
                    mode = snapshot.mode.label(),
                    %trace_id,
                    code = ?error.code(),
                    error = %error,
                    "submission failed"
                );
                self.banner = Some(Banner::from(&error));
                self.retry = Some(snapshot);
                SubmitOutcome::Failed(error)
            }
        }
    }

    /// Validate, call `handler` and record its result.
    ///
    /// Dropping the returned future before it completes (a timeout, a lost
    /// `select!` branch) releases the in-flight slot and keeps the record.
    ///
    /// # Errors
    /// Returns [`SubmitBlocked`] when the handler was not called.
    pub async fn submit<H>(
        &mut self,
        handler: &H,
    ) -> Result<SubmitOutcome<H::Output>, SubmitBlocked>
    where
        H: SubmitHandler<M::Payload> + ?Sized,
    {
        let pending = self.begin_submit()?;
        Ok(InFlightSlot::new(self, &pending).run(pending, handler).await)
    }

    /// Retry the last failed submission and record its result.
    ///
    /// Cancellation behaves as for [`FormController::submit`].
    ///
    /// # Errors
    /// Returns [`SubmitBlocked`] when the handler was not called.
    pub async fn resubmit<H>(
        &mut self,
        handler: &H,
    ) -> Result<SubmitOutcome<H::Output>, SubmitBlocked>
    where
        H: SubmitHandler<M::Payload> + ?Sized,
    {
        let pending = self.begin_resubmit()?;
        Ok(InFlightSlot::new(self, &pending).run(pending, handler).await)
    }

    /// Give up on `pending` without a result, e.g. after a caller-side
    /// timeout. The record, errors and banner are left alone and a new
    /// submission may start. Stale submissions are ignored.
    pub fn abandon(&mut self, pending: PendingSubmission<M>) {
        self.release(pending.ticket, pending.generation);
    }

    fn release(&mut self, ticket: u64, generation: u64) {
        if generation == self.generation && self.in_flight == Some(ticket) {
            self.in_flight = None;
            debug!(mode = self.mode().label(), "submission abandoned by caller");
        }
    }

    /// Hide the banner without touching anything else.
    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Close and reopen the form: every value, error and banner is
    /// discarded and any outstanding submission is abandoned.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.record = Self::blank_record();
        self.errors = ErrorRecord::default();
        self.in_flight = None;
        self.retry = None;
        self.banner = None;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
