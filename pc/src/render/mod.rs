//! Template Rendering
//!
//! Fills a template's placeholder tokens with user-supplied or example values.
//!
//! Two token conventions exist in the catalog:
//! 1. `[NAME]` (bracket, the default)
//! 2. `{name}` (brace)
//!
//! A template either declares its convention or has it detected from content.
//! Substitution is literal: no conditionals, loops or escaping.

mod error;
mod renderer;
mod state;
mod syntax;

pub use error::RenderError;
pub use renderer::{clear, fill_status, load_example, placeholders, render};
pub use state::{CustomDraft, RenderState};
pub use syntax::{PlaceholderSyntax, RESERVED_NAME_CHARS, is_valid_name};
