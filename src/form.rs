//! Contact form: floating-label state, validation, and submission.
//!
//! The form knows nothing about notifications. [`ContactForm::submit`] and
//! [`ContactForm::advance`] return the message the page should surface, and
//! the [`App`](crate::app::App) routes it to the notification center.
//!
//! Submission goes through a [`Submitter`] after a fixed delay. The stock
//! [`SimulatedSubmitter`] always succeeds; the failure branch exists so a real
//! backend can be dropped in without reshaping the flow.

use crate::notification::Severity;
use crate::scheduler::{Millis, Scheduler};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name → value, as read from the form at submit time.
pub type FormData = BTreeMap<String, String>;

pub const VALIDATION_HEADER: &str = "Please fix the following errors:";
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Name,
    Email,
    Subject,
    ProjectType,
    Message,
}

impl Field {
    /// Declaration order; validation reports missing fields in this order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Subject,
        Field::ProjectType,
        Field::Message,
    ];

    /// The `name` attribute of the input.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::ProjectType => "project-type",
            Field::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::Subject => "Subject is required",
            Field::ProjectType => "Project type is required",
            Field::Message => "Message is required",
        }
    }
}

/// Validate submitted form data.
///
/// Returns human-readable errors: one per missing required field in
/// declaration order, then the email format error if an email was given but
/// does not look like `local@domain.tld`.
pub fn validate_form(data: &FormData) -> Vec<String> {
    let value = |field: Field| data.get(field.name()).map(|v| v.trim()).unwrap_or("");

    let mut errors: Vec<String> = Field::ALL
        .into_iter()
        .filter(|&f| value(f).is_empty())
        .map(|f| f.required_message().to_string())
        .collect();

    let email = value(Field::Email);
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(INVALID_EMAIL.to_string());
    }
    errors
}

/// Loose `local@domain.tld` shape check: no whitespace, exactly one `@`,
/// non-empty local part, and a dot inside the domain with at least one
/// character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

/// Combine validation errors into the single notification message.
pub fn validation_message(errors: &[String]) -> String {
    format!("{}\n{}", VALIDATION_HEADER, errors.join("\n"))
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Delivers a validated form to wherever messages go.
pub trait Submitter {
    fn submit(&mut self, data: &FormData) -> Result<(), SubmitError>;
}

/// Stand-in backend: accepts everything, sends nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSubmitter;

impl Submitter for SimulatedSubmitter {
    fn submit(&mut self, data: &FormData) -> Result<(), SubmitError> {
        tracing::debug!(fields = data.len(), "simulated submission accepted");
        Ok(())
    }
}

/// Floating-label flags for one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldVisual {
    pub has_value: bool,
    pub focused: bool,
}

/// A class change on one field, for the page to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChange {
    pub field: Field,
    pub class: &'static str,
    pub add: bool,
}

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Validation failed; nothing was sent and input is kept.
    Rejected { errors: Vec<String>, message: String },
    /// Loading state entered; the outcome arrives at `due`.
    Started { due: Millis },
    /// A submission is already in flight.
    Busy,
}

/// Result of a submission that completed.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub severity: Severity,
    pub message: String,
    /// Whether the fields were cleared.
    pub reset: bool,
    /// Class changes from resetting the visual state.
    pub classes: Vec<ClassChange>,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    values: BTreeMap<Field, String>,
    visual: BTreeMap<Field, FieldVisual>,
    loading: bool,
    submit_delay: Millis,
    in_flight: Scheduler<FormData>,
}

impl ContactForm {
    /// Build the form from the values present at page load. Fields that are
    /// already filled start with `has-value`.
    pub fn new(initial: &FormData, submit_delay: Millis, now: Millis) -> Self {
        let mut values = BTreeMap::new();
        let mut visual = BTreeMap::new();
        for field in Field::ALL {
            let value = initial.get(field.name()).cloned().unwrap_or_default();
            visual.insert(
                field,
                FieldVisual {
                    has_value: !value.trim().is_empty(),
                    focused: false,
                },
            );
            values.insert(field, value);
        }
        Self {
            values,
            visual,
            loading: false,
            submit_delay,
            in_flight: Scheduler::new(now),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn visual(&self, field: Field) -> FieldVisual {
        self.visual.get(&field).copied().unwrap_or_default()
    }

    /// Fields whose initial value already gives them `has-value`.
    pub fn initial_classes(&self) -> Vec<ClassChange> {
        Field::ALL
            .into_iter()
            .filter(|f| self.visual(*f).has_value)
            .map(|field| ClassChange {
                field,
                class: "has-value",
                add: true,
            })
            .collect()
    }

    /// Trimmed snapshot of every field.
    pub fn data(&self) -> FormData {
        self.values
            .iter()
            .map(|(f, v)| (f.name().to_string(), v.trim().to_string()))
            .collect()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.in_flight.next_due()
    }

    pub fn input(&mut self, field: Field, value: impl Into<String>) -> Vec<ClassChange> {
        self.values.insert(field, value.into());
        self.sync_has_value(field)
    }

    pub fn focus(&mut self, field: Field) -> Vec<ClassChange> {
        let visual = self.visual.entry(field).or_default();
        if visual.focused {
            return Vec::new();
        }
        visual.focused = true;
        vec![ClassChange {
            field,
            class: "focused",
            add: true,
        }]
    }

    pub fn blur(&mut self, field: Field) -> Vec<ClassChange> {
        let mut changes = Vec::new();
        let visual = self.visual.entry(field).or_default();
        if visual.focused {
            visual.focused = false;
            changes.push(ClassChange {
                field,
                class: "focused",
                add: false,
            });
        }
        changes.extend(self.sync_has_value(field));
        changes
    }

    fn sync_has_value(&mut self, field: Field) -> Vec<ClassChange> {
        let has_value = !self.value(field).trim().is_empty();
        let visual = self.visual.entry(field).or_default();
        if visual.has_value == has_value {
            return Vec::new();
        }
        visual.has_value = has_value;
        vec![ClassChange {
            field,
            class: "has-value",
            add: has_value,
        }]
    }

    /// Validate and, when valid, enter the loading state.
    pub fn submit(&mut self, now: Millis) -> SubmitStart {
        if self.loading {
            return SubmitStart::Busy;
        }
        let data = self.data();
        let errors = validate_form(&data);
        if !errors.is_empty() {
            let message = validation_message(&errors);
            return SubmitStart::Rejected { errors, message };
        }

        self.loading = true;
        self.in_flight.advance_to(now);
        self.in_flight.schedule_in(self.submit_delay, data);
        let due = now.saturating_add(self.submit_delay);
        tracing::debug!(due, "form submission started");
        SubmitStart::Started { due }
    }

    /// Complete a submission whose delay has elapsed by `now`.
    pub fn advance(
        &mut self,
        now: Millis,
        submitter: &mut dyn Submitter,
    ) -> Option<SubmitOutcome> {
        let (_, data) = self.in_flight.pop_due(now)?;

        let outcome = match submitter.submit(&data) {
            Ok(()) => {
                let classes = self.reset();
                SubmitOutcome {
                    severity: Severity::Success,
                    message: SUCCESS_MESSAGE.to_string(),
                    reset: true,
                    classes,
                }
            }
            Err(err) => {
                tracing::debug!(%err, "form submission failed");
                SubmitOutcome {
                    severity: Severity::Error,
                    message: FAILURE_MESSAGE.to_string(),
                    reset: false,
                    classes: Vec::new(),
                }
            }
        };

        self.loading = false;
        tracing::debug!(severity = %outcome.severity, "form submission finished");
        Some(outcome)
    }

    /// Clear every field and drop all visual flags.
    fn reset(&mut self) -> Vec<ClassChange> {
        let mut changes = Vec::new();
        for field in Field::ALL {
            self.values.insert(field, String::new());
            let visual = self.visual.entry(field).or_default();
            for (flag, class) in [
                (&mut visual.has_value, "has-value"),
                (&mut visual.focused, "focused"),
            ] {
                if *flag {
                    *flag = false;
                    changes.push(ClassChange {
                        field,
                        class,
                        add: false,
                    });
                }
            }
        }
        changes
    }
}
