//! Contact form state, validation and the pluggable submission boundary.
//!
//! Submission goes through [`ContactSubmitter`]. The bundled
//! [`SimulatedSubmitter`] makes no network call and always succeeds after a
//! fixed delay; a real backend only has to implement the trait.

use std::collections::BTreeMap;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

use crate::constants::SIMULATED_SUBMIT_DELAY;
use crate::timer::{Scheduler, TimerHandle, TimerTask};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Sender's name
    Name,
    /// Reply address
    Email,
    /// Message body
    Message,
}

impl Field {
    /// Every field in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Visible label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    /// Whether Enter inserts a newline instead of submitting.
    #[must_use]
    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Message)
    }
}

/// A validated message, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Sender's name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Message body
    pub message: String,
}

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Backend could not be reached
    #[error("the message service is unavailable")]
    Unavailable,
    /// Backend refused the message
    #[error("the message was rejected: {0}")]
    Rejected(String),
}

/// Result of handing a message to a submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// How long until the outcome is known
    pub delay: Duration,
    /// What happens once the delay elapses
    pub outcome: Result<(), SubmitError>,
}

/// Submission boundary.
pub trait ContactSubmitter {
    /// Sends a message.
    fn submit(&mut self, message: &ContactMessage) -> Submission;
}

/// Client-only stand-in: waits, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    sent: Vec<ContactMessage>,
}

impl SimulatedSubmitter {
    /// Succeeds after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            sent: Vec::new(),
        }
    }

    /// Messages handed over so far.
    #[must_use]
    pub fn sent(&self) -> &[ContactMessage] {
        &self.sent
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(SIMULATED_SUBMIT_DELAY)
    }
}

impl ContactSubmitter for SimulatedSubmitter {
    fn submit(&mut self, message: &ContactMessage) -> Submission {
        tracing::info!(from = %message.email, "simulated contact submission");
        self.sent.push(message.clone());
        Submission {
            delay: self.delay,
            outcome: Ok(()),
        }
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// Accepting input
    Editing,
    /// Waiting for the submitter
    Submitting,
    /// Last submission succeeded
    Sent,
    /// Last submission failed; the form is editable again
    Failed(String),
}

/// Outcome of pressing Send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed; see [`ContactForm::errors`]
    Invalid,
    /// A submission is already running
    Busy,
    /// Message handed to the submitter
    Started,
}

/// Contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, &'static str>,
    status: FormStatus,
    pending: Option<(TimerHandle, Result<(), SubmitError>)>,
}

impl ContactForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
            status: FormStatus::Editing,
            pending: None,
        }
    }

    /// Current text of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Validation message for a field.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// All validation messages.
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<Field, &'static str> {
        &self.errors
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Whether typing changes the fields.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !matches!(self.status, FormStatus::Submitting)
    }

    /// Types a character. Returns false when the form is locked.
    pub fn insert_char(&mut self, field: Field, c: char) -> bool {
        if !self.is_editable() || (c == '\n' && !field.is_multiline()) {
            return false;
        }
        self.values.entry(field).or_default().push(c);
        self.errors.remove(&field);
        true
    }

    /// Deletes the last character. Returns false when the form is locked.
    pub fn backspace(&mut self, field: Field) -> bool {
        if !self.is_editable() {
            return false;
        }
        if let Some(value) = self.values.get_mut(&field) {
            value.pop();
        }
        true
    }

    /// Checks every field, recording inline errors.
    pub fn validate(&mut self) -> Option<ContactMessage> {
        self.errors.clear();
        for field in Field::ALL {
            if self.value(field).trim().is_empty() {
                self.errors.insert(field, "This field is required");
            }
        }

        let email = self.value(Field::Email).trim().to_string();
        if !email.is_empty() && !is_valid_email(&email) {
            self.errors
                .insert(Field::Email, "Please enter a valid email address");
        }

        if !self.errors.is_empty() {
            return None;
        }

        Some(ContactMessage {
            name: self.value(Field::Name).trim().to_string(),
            email,
            message: self.value(Field::Message).trim().to_string(),
        })
    }

    /// Validates and hands the message to `submitter`.
    ///
    /// The outcome is applied when the scheduled [`TimerTask::SettleSubmission`]
    /// fires. Failures never retry on their own.
    pub fn submit(
        &mut self,
        now: Duration,
        submitter: &mut dyn ContactSubmitter,
        scheduler: &mut Scheduler,
    ) -> SubmitAttempt {
        if self.status == FormStatus::Submitting {
            return SubmitAttempt::Busy;
        }
        let Some(message) = self.validate() else {
            tracing::debug!(errors = self.errors.len(), "contact form invalid");
            return SubmitAttempt::Invalid;
        };

        let submission = submitter.submit(&message);
        let timer = scheduler.schedule(now, submission.delay, TimerTask::SettleSubmission);
        self.pending = Some((timer, submission.outcome));
        self.status = FormStatus::Submitting;
        SubmitAttempt::Started
    }

    /// Applies the outcome of a finished submission. Returns true if it was ours.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        match self.pending.take() {
            Some((timer, outcome)) if timer == handle => {
                match outcome {
                    Ok(()) => {
                        self.values.clear();
                        self.status = FormStatus::Sent;
                    }
                    Err(e) => {
                        tracing::warn!("contact submission failed: {e}");
                        self.status = FormStatus::Failed(e.to_string());
                    }
                }
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Drops a pending submission when the form goes away.
    pub fn unmount(&mut self, scheduler: &mut Scheduler) {
        if let Some((timer, _)) = self.pending.take() {
            scheduler.cancel(timer);
            self.status = FormStatus::Editing;
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

fn is_valid_email(value: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(value))
}
