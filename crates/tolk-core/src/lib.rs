pub mod error;
pub mod types;
pub mod validate;

pub use error::ValidationError;
pub use types::{ErrorKind, SessionEvent, SubmissionId, TranslationOutcome};
pub use validate::{TranslationRequest, ValidationRules, validate};
