//! Contact form state and validation shared by the page and the server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NAME_MAX_CHARS: usize = 120;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const MESSAGE_MAX_CHARS: usize = 5_000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.as_str())]
    Missing(Field),
    #[error("{} is too long", .0.as_str())]
    TooLong(Field),
    #[error("email address is not valid")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("endpoint answered with status {0}")]
    Rejected(u16),
    #[error("request failed: {0}")]
    Network(String),
}

impl ContactForm {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let limits = [
            (Field::Name, NAME_MAX_CHARS),
            (Field::Email, EMAIL_MAX_CHARS),
            (Field::Message, MESSAGE_MAX_CHARS),
        ];

        for (field, max_chars) in limits {
            let value = self.field(field).trim();
            if value.is_empty() {
                return Err(ValidationError::Missing(field));
            }
            if value.chars().count() > max_chars {
                return Err(ValidationError::TooLong(field));
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    fields: ContactForm,
    status: SubmissionStatus,
}

impl ContactFormState {
    pub fn fields(&self) -> &ContactForm {
        &self.fields
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == SubmissionStatus::Sending
    }

    pub fn update(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.fields.name = value,
            Field::Email => self.fields.email = value,
            Field::Message => self.fields.message = value,
        }
    }

    /// Starts a submission and hands out the payload to send. Returns `None`
    /// while a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactForm> {
        if self.is_sending() {
            return None;
        }
        self.status = SubmissionStatus::Sending;
        Some(self.fields.trimmed())
    }

    pub fn resolve(&mut self, outcome: Result<(), SubmissionError>) {
        if !self.is_sending() {
            return;
        }

        match outcome {
            Ok(()) => {
                self.status = SubmissionStatus::Success;
                self.fields = ContactForm::default();
            }
            Err(error) => {
                tracing::warn!(error = %error, "contact submission failed");
                self.status = SubmissionStatus::Error;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFormState {
        let mut state = ContactFormState::default();
        state.update(Field::Name, "Jana Nováková");
        state.update(Field::Email, "jana@example.cz");
        state.update(Field::Message, "We need a new booking site.");
        state
    }

    #[test]
    fn success_clears_fields() {
        let mut state = filled();
        assert_eq!(state.status(), SubmissionStatus::Idle);

        let payload = state.begin_submit().expect("idle form submits");
        assert_eq!(payload.email, "jana@example.cz");
        assert_eq!(state.status(), SubmissionStatus::Sending);

        state.resolve(Ok(()));
        assert_eq!(state.status(), SubmissionStatus::Success);
        assert_eq!(state.fields(), &ContactForm::default());
    }

    #[test]
    fn failure_keeps_fields() {
        let mut state = filled();
        let before = state.fields().clone();

        state.begin_submit();
        state.resolve(Err(SubmissionError::Rejected(500)));

        assert_eq!(state.status(), SubmissionStatus::Error);
        assert_eq!(state.fields(), &before);
    }

    #[test]
    fn in_flight_submit_is_sent_once() {
        let mut state = filled();

        assert!(state.begin_submit().is_some());
        assert!(state.begin_submit().is_none());
    }

    #[test]
    fn retry_after_error_is_a_new_submission() {
        let mut state = filled();
        state.begin_submit();
        state.resolve(Err(SubmissionError::Network("offline".to_string())));

        assert!(state.begin_submit().is_some());
        assert_eq!(state.status(), SubmissionStatus::Sending);
    }

    #[test]
    fn stray_resolution_is_ignored() {
        let mut state = filled();
        state.resolve(Ok(()));

        assert_eq!(state.status(), SubmissionStatus::Idle);
        assert_eq!(state.fields().name, "Jana Nováková");
    }

    #[test]
    fn validation_rules() {
        let valid = filled().fields().clone();
        assert_eq!(valid.validate(), Ok(()));

        let mut blank_name = valid.clone();
        blank_name.name = "   ".to_string();
        assert_eq!(blank_name.validate(), Err(ValidationError::Missing(Field::Name)));

        for email in ["jana", "jana@", "@example.cz", "jana@example", "ja na@example.cz", "a@b@c.cz", "jana@example."] {
            let mut bad = valid.clone();
            bad.email = email.to_string();
            assert_eq!(bad.validate(), Err(ValidationError::InvalidEmail), "{email}");
        }

        let mut long = valid;
        long.message = "x".repeat(MESSAGE_MAX_CHARS + 1);
        assert_eq!(long.validate(), Err(ValidationError::TooLong(Field::Message)));
    }

    #[test]
    fn payload_uses_plain_field_names() {
        let json = serde_json::to_value(filled().fields()).expect("serializes");
        assert_eq!(json["name"], "Jana Nováková");
        assert_eq!(json["message"], "We need a new booking site.");
    }
}
