//! Authoring Boundary
//!
//! Everything a template must satisfy before the renderer sees it is enforced
//! here. Malformed variable or example JSON is refused rather than silently
//! replaced, so the renderer can assume well-formed input.

mod check;
mod draft;
mod error;

pub use check::{AuthoringWarning, check, warnings};
pub use draft::{PromptDraft, parse_checkbox, parse_example_values, parse_variables, split_csv};
pub use error::AuthoringError;
