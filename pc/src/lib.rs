//! PromptCraft - prompt template catalog
//!
//! A catalog of AI prompt templates organised by category. Opening a template
//! gives a render state whose variables are filled by typing, picking an
//! option, overriding a picklist, or loading the author's example.
//!
//! # Core Concepts
//!
//! - **Literal Placeholders**: `[NAME]` or `{name}` tokens, replaced in one pass
//! - **Visible Gaps**: unfilled variables render as their placeholder, never as empty text
//! - **Checked at the Boundary**: malformed authoring input is refused before rendering
//!
//! # Modules
//!
//! - [`domain`] - Templates, variables and categories
//! - [`render`] - Placeholder substitution and per-view render state
//! - [`authoring`] - Validation of authored prompts
//! - [`catalog`] - Catalog file loading and browsing
//! - [`session`] - Interactive fill session
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use promptcraft::domain::{PromptTemplate, VariableSpec};
//! use promptcraft::render::RenderState;
//!
//! let template = PromptTemplate::new("blog", "Blog post", "Write a [TONE] post about [TOPIC].")
//!     .with_variables(vec![VariableSpec::new("TONE"), VariableSpec::new("TOPIC")]);
//!
//! let mut state = RenderState::new(&template);
//! state.set("TONE", "casual").unwrap();
//! assert_eq!(state.rendered(), "Write a casual post about [TOPIC].");
//! ```

pub mod authoring;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use authoring::{AuthoringError, AuthoringWarning, PromptDraft};
pub use catalog::{Access, Catalog, CatalogError, Listing, Query};
pub use config::Config;
pub use domain::{Category, FillStatus, PromptKind, PromptStatus, PromptTemplate, Values, VariableKind, VariableSpec};
pub use render::{PlaceholderSyntax, RenderError, RenderState};
pub use session::{FillSession, Reply};
