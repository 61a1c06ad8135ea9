//! Raw authored prompt fields
//!
//! A draft carries exactly what an author typed: JSON blobs for variables and
//! example values, comma-separated lists, checkbox strings. `validate` turns it
//! into a `PromptTemplate` or refuses it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::check::check;
use super::error::AuthoringError;
use crate::domain::{PromptKind, PromptStatus, PromptTemplate, Values, VariableSpec};
use crate::render::PlaceholderSyntax;

/// Prompt fields as submitted, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDraft {
    pub title: String,
    pub content: String,
    pub description: String,
    /// Category slug
    pub category: String,
    pub thumbnail_url: String,
    /// JSON array of variable declarations
    pub variables: String,
    /// JSON object of variable name to example value
    pub example_values: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    /// Comma-separated
    pub tags: String,
    /// Comma-separated
    pub use_cases: String,
    /// Checkbox value: `on`, `true` or `1` mean locked
    pub is_locked: String,
    /// `bracket`, `brace` or empty to detect
    pub syntax: String,
}

impl PromptDraft {
    /// Validate the draft into a template with the given id
    pub fn validate(&self, id: impl Into<String>) -> Result<PromptTemplate, AuthoringError> {
        let id = id.into();
        debug!(%id, "PromptDraft::validate: called");

        if self.title.trim().is_empty() {
            return Err(AuthoringError::MissingField("title"));
        }
        if self.content.trim().is_empty() {
            return Err(AuthoringError::MissingField("content"));
        }

        let variables = parse_variables(&self.variables)?;
        let example_values = parse_example_values(&self.example_values)?;
        let syntax = match self.syntax.trim() {
            "" => None,
            s => Some(s.parse::<PlaceholderSyntax>().map_err(|_| AuthoringError::InvalidSyntax(s.to_string()))?),
        };

        let now = Utc::now();
        let template = PromptTemplate {
            id,
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            variables,
            example_values,
            description: non_empty(&self.description),
            category: non_empty(&self.category),
            kind: pick_or(&self.kind, PromptKind::Text),
            status: pick_or(&self.status, PromptStatus::Draft),
            tags: split_csv(&self.tags),
            use_cases: split_csv(&self.use_cases),
            is_locked: parse_checkbox(&self.is_locked),
            thumbnail_url: non_empty(&self.thumbnail_url),
            syntax,
            created_at: Some(now),
            updated_at: Some(now),
        };

        check(&template)?;
        info!(id = %template.id, variables = template.variables.len(), "Validated prompt draft");
        Ok(template)
    }
}

/// Empty text means no variables
pub fn parse_variables(text: &str) -> Result<Vec<VariableSpec>, AuthoringError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(AuthoringError::MalformedVariables)
}

/// Empty text means no example
pub fn parse_example_values(text: &str) -> Result<Values, AuthoringError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Values::new());
    }
    serde_json::from_str(text).map_err(AuthoringError::MalformedExampleValues)
}

/// Split on commas, trim, drop empties
pub fn split_csv(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_checkbox(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "on" | "true" | "1")
}

/// Parse a value from a fixed set, falling back when it is not one of them
fn pick_or<T: std::str::FromStr>(text: &str, fallback: T) -> T {
    text.trim().parse().unwrap_or(fallback)
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VariableKind;

    fn draft() -> PromptDraft {
        PromptDraft {
            title: " Blog post ".to_string(),
            content: "Write a [TONE] post about [TOPIC].".to_string(),
            variables: r#"[{"name": "TONE", "type": "select", "options": ["casual", "formal"]}, {"name": "TOPIC"}]"#
                .to_string(),
            example_values: r#"{"TONE": "casual", "TOPIC": "cats"}"#.to_string(),
            tags: "blog, writing,, ".to_string(),
            is_locked: "on".to_string(),
            status: "published".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        let template = draft().validate("blog").unwrap();
        assert_eq!(template.id, "blog");
        assert_eq!(template.title, "Blog post");
        assert_eq!(template.variables.len(), 2);
        assert_eq!(template.variables[0].kind, VariableKind::Select);
        assert_eq!(template.example_values.len(), 2);
        assert_eq!(template.tags, vec!["blog".to_string(), "writing".to_string()]);
        assert!(template.is_locked);
        assert_eq!(template.status, PromptStatus::Published);
        assert_eq!(template.kind, PromptKind::Text);
        assert!(template.description.is_none());
        assert!(template.created_at.is_some());
    }

    #[test]
    fn test_validate_requires_title_and_content() {
        let mut d = draft();
        d.content = "\n".to_string();
        assert!(matches!(d.validate("x"), Err(AuthoringError::MissingField("content"))));

        let d = PromptDraft::default();
        assert!(matches!(d.validate("x"), Err(AuthoringError::MissingField("title"))));
    }

    #[test]
    fn test_validate_rejects_malformed_example_values() {
        let mut d = draft();
        d.example_values = "{TONE: casual".to_string();
        assert!(matches!(d.validate("x"), Err(AuthoringError::MalformedExampleValues(_))));

        d.example_values = r#"{"TONE": 3}"#.to_string();
        assert!(matches!(d.validate("x"), Err(AuthoringError::MalformedExampleValues(_))));
    }

    #[test]
    fn test_validate_rejects_malformed_variables() {
        let mut d = draft();
        d.variables = r#"{"name": "TONE"}"#.to_string();
        assert!(matches!(d.validate("x"), Err(AuthoringError::MalformedVariables(_))));
    }

    #[test]
    fn test_validate_empty_json_fields() {
        let d = PromptDraft {
            title: "Plain".to_string(),
            content: "No variables here.".to_string(),
            ..Default::default()
        };
        let template = d.validate("plain").unwrap();
        assert!(template.variables.is_empty());
        assert!(!template.has_examples());
        assert_eq!(template.status, PromptStatus::Draft);
        assert!(!template.is_locked);
    }

    #[test]
    fn test_validate_enum_fallbacks() {
        let mut d = draft();
        d.kind = "video".to_string();
        d.status = "live".to_string();
        let template = d.validate("x").unwrap();
        assert_eq!(template.kind, PromptKind::Text);
        assert_eq!(template.status, PromptStatus::Draft);
    }

    #[test]
    fn test_validate_syntax_field() {
        let mut d = draft();
        d.syntax = "brace".to_string();
        assert_eq!(d.validate("x").unwrap().syntax, Some(PlaceholderSyntax::Brace));

        d.syntax = "angle".to_string();
        assert!(matches!(d.validate("x"), Err(AuthoringError::InvalidSyntax(_))));
    }

    #[test]
    fn test_validate_runs_structural_checks() {
        let mut d = draft();
        d.example_values = r#"{"AUDIENCE": "kids"}"#.to_string();
        assert!(matches!(d.validate("x"), Err(AuthoringError::UnknownExampleKey(_))));
    }

    #[test]
    fn test_parse_checkbox() {
        assert!(parse_checkbox("ON"));
        assert!(parse_checkbox("true"));
        assert!(parse_checkbox("1"));
        assert!(!parse_checkbox(""));
        assert!(!parse_checkbox("yes"));
    }
}
