mod diagnostic;
mod rules;
mod summary;
mod validator;

pub use diagnostic::Diagnostic;
pub use rules::{RuleRegistry, ValidationRule};
pub use summary::SpecSummary;
pub use validator::{collect_tokens, validate, validate_with, ValidateOptions};
