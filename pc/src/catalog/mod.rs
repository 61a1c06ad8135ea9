//! Prompt Catalog
//!
//! Read-only catalog of categories and prompt templates, loaded from a YAML or
//! JSON file. Every prompt passes the authoring checks at load time.
//!
//! ```text
//! categories:
//!   - id: c-writing
//!     name: Writing          # slug derived: writing
//! prompts:
//!   - id: blog
//!     title: Blog post
//!     content: "Write a [TONE] post about [TOPIC]."
//!     category: writing
//!     status: published
//!     variables: [{ name: TONE }, { name: TOPIC }]
//! ```

mod error;
mod store;

pub use error::CatalogError;
pub use store::{Access, Catalog, CategorySummary, Listing, Query};
