use std::fmt;

use serde::Serialize;

use crate::validate::TranslationRequest;

/// Shown when the provider answers without a usable `translated_text`
pub const NO_TRANSLATION_AVAILABLE: &str = "No translation available.";

/// Monotonic tag of one submit action within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl SubmissionId {
    pub fn next(self) -> Self {
        SubmissionId(self.0 + 1)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Text blank after trimming
    EmptyInput,
    /// Rejected by an optional validation rule
    InvalidInput,
    /// Connection, DNS or timeout failure
    NetworkFailure,
    /// Provider answered with a non-success status
    ProviderError,
}

impl ErrorKind {
    pub fn is_validation(self) -> bool {
        matches!(self, ErrorKind::EmptyInput | ErrorKind::InvalidInput)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TranslationOutcome {
    #[default]
    Idle,
    /// Held only while a submission is being validated, never published
    Validating,
    InFlight {
        submission: SubmissionId,
        request: TranslationRequest,
    },
    Succeeded {
        translated_text: String,
    },
    Failed {
        kind: ErrorKind,
        message: String,
    },
}

impl TranslationOutcome {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TranslationOutcome::InFlight { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            TranslationOutcome::Succeeded { .. } | TranslationOutcome::Failed { .. }
        )
    }

    pub fn translated_text(&self) -> Option<&str> {
        match self {
            TranslationOutcome::Succeeded { translated_text } => Some(translated_text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<(ErrorKind, &str)> {
        match self {
            TranslationOutcome::Failed { kind, message } => Some((*kind, message)),
            _ => None,
        }
    }
}

/// One published state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    pub submission: SubmissionId,
    pub outcome: TranslationOutcome,
}
