//! Contact form: inline validation, success banner, reset.
//!
//! Validation never short-circuits: every field is checked in order and all
//! failures are shown together. Nothing is sent anywhere; a valid submission
//! only shows the banner and clears the form.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{Dom, NodeId};
use crate::event::handler::Handler;
use crate::event::message::Envelope;
use crate::page::PageState;
use crate::timer::Task;

pub const CONTACT_FORM: &str = "contactForm";
pub const SUCCESS_BANNER: &str = "contactSuccess";
pub const CLEAR_BUTTON: &str = "clearForm";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Loose `local@domain.tld` check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Banner text for a successful submission.
pub fn success_message(name: &str) -> String {
    format!("Thanks {name}! Your message has been received. (Demo)")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A contact form field, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Id of the input element.
    pub fn input_id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// Id of the inline error element.
    pub fn error_id(self) -> &'static str {
        match self {
            Field::Name => "err-name",
            Field::Email => "err-email",
            Field::Message => "err-message",
        }
    }

    /// Text shown when the field is invalid.
    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Please enter your name.",
            Field::Email => "Please enter a valid email address.",
            Field::Message => "Please write a short message.",
        }
    }
}

/// Trimmed field values of one submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    /// Read the current values. Missing inputs read as empty.
    pub fn read(state: &PageState) -> Self {
        Self {
            name: state.field_value(Field::Name.input_id()),
            email: state.field_value(Field::Email.input_id()),
            message: state.field_value(Field::Message.input_id()),
        }
    }

    /// Every invalid field, in validation order.
    pub fn validate(&self) -> Vec<Field> {
        let mut invalid = Vec::new();
        if self.name.is_empty() {
            invalid.push(Field::Name);
        }
        if !is_valid_email(&self.email) {
            invalid.push(Field::Email);
        }
        if self.message.is_empty() {
            invalid.push(Field::Message);
        }
        invalid
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// The form's elements, looked up once at install.
#[derive(Debug, Clone)]
pub struct FormParts {
    pub form: NodeId,
    pub errors: [Option<NodeId>; 3],
    pub success: Option<NodeId>,
}

impl FormParts {
    /// Locate the contact form; `None` if the page has none.
    pub fn find(dom: &Dom) -> Option<Self> {
        Some(Self {
            form: dom.query_by_id(CONTACT_FORM)?,
            errors: Field::ALL.map(|field| dom.query_by_id(field.error_id())),
            success: dom.query_by_id(SUCCESS_BANNER),
        })
    }

    fn error_node(&self, field: Field) -> Option<NodeId> {
        let slot = Field::ALL.iter().position(|&f| f == field)?;
        self.errors[slot]
    }

    /// Hide and empty every error, and hide the banner.
    pub fn clear(&self, state: &mut PageState) {
        for node in self.errors.iter().flatten().copied() {
            state.set_style(node, "display", "none");
            state.set_text(node, "");
        }
        if let Some(banner) = self.success {
            state.set_style(banner, "display", "none");
        }
    }
}

/// Submit handler for the contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    parts: FormParts,
    hide_after_ms: u64,
}

impl ContactForm {
    pub fn new(parts: FormParts, hide_after_ms: u64) -> Self {
        Self { parts, hide_after_ms }
    }
}

impl Handler for ContactForm {
    fn handle(&mut self, state: &mut PageState, envelope: &mut Envelope) {
        envelope.prevent_default();
        self.parts.clear(state);

        let submission = Submission::read(state);
        let invalid = submission.validate();
        if !invalid.is_empty() {
            tracing::debug!(?invalid, "contact form rejected");
            for field in invalid {
                if let Some(node) = self.parts.error_node(field) {
                    state.set_style(node, "display", "block");
                    state.set_text(node, field.error_message());
                }
            }
            return;
        }

        tracing::debug!("contact form accepted");
        if let Some(banner) = self.parts.success {
            state.set_text(banner, &success_message(&submission.name));
            state.set_style(banner, "display", "block");
            state.schedule(
                self.hide_after_ms,
                Task::SetStyles {
                    node: banner,
                    styles: vec![("display".to_owned(), "none".to_owned())],
                },
            );
        }
        state.reset_form(self.parts.form);
    }
}

/// Click handler for the "clear" button.
#[derive(Debug, Clone)]
pub struct ClearForm {
    parts: FormParts,
}

impl ClearForm {
    pub fn new(parts: FormParts) -> Self {
        Self { parts }
    }
}

impl Handler for ClearForm {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        state.reset_form(self.parts.form);
        self.parts.clear(state);
    }
}
