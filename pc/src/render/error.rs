//! Render state errors

use thiserror::Error;

/// Errors raised while editing a render state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Invalid value for {name} ({kind}): {value}")]
    InvalidValue { name: String, kind: String, value: String },

    #[error("Variable {0} has no option list to override")]
    NotCustomizable(String),

    #[error("No custom value is being edited")]
    NoCustomPending,
}
