//! Prompt templates as stored in the catalog

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::variable::VariableSpec;
use crate::render::{self, PlaceholderSyntax};

/// Variable name to current value
pub type Values = BTreeMap<String, String>;

/// Variable name to "has a non-blank value"
pub type FillStatus = BTreeMap<String, bool>;

/// What the rendered prompt is meant to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    #[default]
    Text,
    Image,
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
        }
    }
}

impl std::str::FromStr for PromptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            _ => Err(format!("Unknown prompt type: {}", s)),
        }
    }
}

/// Publication state of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for PromptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for PromptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("Unknown prompt status: {}", s)),
        }
    }
}

/// A prompt template: text body with placeholders plus the variables that fill them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub title: String,

    /// Body containing placeholder tokens
    pub content: String,

    #[serde(default)]
    pub variables: Vec<VariableSpec>,

    #[serde(default, rename = "example_values", alias = "exampleValues")]
    pub example_values: Values,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Slug of the owning category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: PromptKind,

    #[serde(default)]
    pub status: PromptStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_cases: Vec<String>,

    /// Requires a premium subscription to open
    #[serde(default)]
    pub is_locked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Explicit placeholder convention; detected from content when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<PlaceholderSyntax>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PromptTemplate {
    /// Create a published text template with no variables
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            variables: Vec::new(),
            example_values: Values::new(),
            description: None,
            category: None,
            kind: PromptKind::Text,
            status: PromptStatus::Published,
            tags: Vec::new(),
            use_cases: Vec::new(),
            is_locked: false,
            thumbnail_url: None,
            syntax: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_variables(mut self, variables: Vec<VariableSpec>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_examples<'a>(mut self, examples: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.example_values = examples
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn in_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    /// Look up a declared variable by name
    pub fn variable(&self, name: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn has_examples(&self) -> bool {
        !self.example_values.is_empty()
    }

    pub fn is_published(&self) -> bool {
        self.status == PromptStatus::Published
    }

    /// Placeholder convention in effect for this template
    pub fn resolved_syntax(&self) -> PlaceholderSyntax {
        self.syntax
            .unwrap_or_else(|| PlaceholderSyntax::detect(&self.content, &self.variables))
    }

    /// Render the content with the given values
    pub fn render(&self, values: &Values) -> String {
        render::render(&self.content, &self.variables, values, self.resolved_syntax())
    }
}
