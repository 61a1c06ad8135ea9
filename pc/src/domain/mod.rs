//! Catalog data model
//!
//! Templates, their variables and the categories that group them.

mod category;
mod template;
mod variable;

pub use category::{Category, slugify};
pub use template::{FillStatus, PromptKind, PromptStatus, PromptTemplate, Values};
pub use variable::{VariableKind, VariableSpec};
