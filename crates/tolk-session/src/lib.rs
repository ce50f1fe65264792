mod form;
mod session;

#[cfg(test)]
mod tests;

pub use form::TranslationForm;
pub use session::{SessionOptions, SessionSnapshot, TranslationSession};
