//! Authoring error types

use thiserror::Error;

use crate::render::PlaceholderSyntax;

/// Reasons an authored prompt is refused before it reaches the catalog
#[derive(Debug, Error)]
pub enum AuthoringError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Malformed variables JSON: {0}")]
    MalformedVariables(#[source] serde_json::Error),

    #[error("Malformed example values JSON: {0}")]
    MalformedExampleValues(#[source] serde_json::Error),

    #[error("Invalid variable name: {0:?}")]
    InvalidVariableName(String),

    #[error("Variable declared more than once: {0}")]
    DuplicateVariable(String),

    #[error("Variable {0} is a picklist but declares no options")]
    MissingOptions(String),

    #[error("Example value given for undeclared variable: {0}")]
    UnknownExampleKey(String),

    #[error("Content mixes [NAME] and {{name}} placeholders for declared variables")]
    MixedSyntax,

    #[error("Declared {declared} placeholders but content only uses {found} tokens")]
    SyntaxMismatch {
        declared: PlaceholderSyntax,
        found: PlaceholderSyntax,
    },

    #[error("Unknown placeholder syntax: {0}")]
    InvalidSyntax(String),
}
