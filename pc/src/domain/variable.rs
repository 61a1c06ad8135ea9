//! Template variable declarations

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Input kind of a template variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Text,
    Textarea,
    Select,
    Dropdown,
    Number,
    Url,
}

impl VariableKind {
    /// Select and dropdown variables offer a fixed option list
    pub fn is_picklist(&self) -> bool {
        matches!(self, Self::Select | Self::Dropdown)
    }

    /// Text and textarea values are kept exactly as typed
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }
}

impl std::fmt::Display for VariableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Textarea => write!(f, "textarea"),
            Self::Select => write!(f, "select"),
            Self::Dropdown => write!(f, "dropdown"),
            Self::Number => write!(f, "number"),
            Self::Url => write!(f, "url"),
        }
    }
}

impl std::str::FromStr for VariableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "textarea" => Ok(Self::Textarea),
            "select" => Ok(Self::Select),
            "dropdown" => Ok(Self::Dropdown),
            "number" => Ok(Self::Number),
            "url" => Ok(Self::Url),
            _ => Err(format!("Unknown variable type: {}", s)),
        }
    }
}

/// A variable declared by a prompt template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Name used inside placeholder tokens, unique within a template
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: VariableKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Hint shown in an empty input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Choices for select/dropdown variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VariableSpec {
    /// Create a plain text variable
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Text,
            label: None,
            placeholder: None,
            options: Vec::new(),
            required: false,
            description: None,
        }
    }

    /// Create a select variable with the given options
    pub fn select(name: impl Into<String>, options: &[&str]) -> Self {
        Self {
            kind: VariableKind::Select,
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::new(name)
        }
    }

    pub fn with_kind(mut self, kind: VariableKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Label for display, falling back to the variable name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Check a user-entered value against the variable kind
    ///
    /// Empty values are always accepted; they mean "not filled yet".
    pub fn accepts(&self, value: &str) -> bool {
        debug!(name = %self.name, kind = %self.kind, "VariableSpec::accepts: called");
        let value = value.trim();
        if value.is_empty() {
            return true;
        }
        match self.kind {
            VariableKind::Text | VariableKind::Textarea => true,
            VariableKind::Number => value.parse::<f64>().is_ok_and(f64::is_finite),
            VariableKind::Url => looks_like_url(value),
            VariableKind::Select | VariableKind::Dropdown => self.options.iter().any(|o| o == value),
        }
    }
}

/// `scheme://rest` with an alphabetic scheme and no whitespace
fn looks_like_url(value: &str) -> bool {
    match value.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
                && !rest.is_empty()
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&VariableKind::Dropdown).unwrap();
        assert_eq!(json, "\"dropdown\"");

        let kind: VariableKind = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(kind, VariableKind::Textarea);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("URL".parse::<VariableKind>().unwrap(), VariableKind::Url);
        assert!("checkbox".parse::<VariableKind>().is_err());
    }

    #[test]
    fn test_spec_defaults_from_json() {
        let spec: VariableSpec = serde_json::from_str(r#"{"name": "TOPIC"}"#).unwrap();
        assert_eq!(spec.name, "TOPIC");
        assert_eq!(spec.kind, VariableKind::Text);
        assert!(spec.options.is_empty());
        assert!(!spec.required);
        assert_eq!(spec.display_label(), "TOPIC");
    }

    #[test]
    fn test_spec_type_field() {
        let spec: VariableSpec =
            serde_json::from_str(r#"{"name": "TONE", "type": "select", "options": ["casual", "formal"]}"#).unwrap();
        assert_eq!(spec.kind, VariableKind::Select);
        assert!(spec.kind.is_picklist());
    }

    #[test]
    fn test_accepts_number() {
        let spec = VariableSpec::new("COUNT").with_kind(VariableKind::Number);
        assert!(spec.accepts("12"));
        assert!(spec.accepts("3.5"));
        assert!(spec.accepts(""));
        assert!(!spec.accepts("twelve"));
        assert!(!spec.accepts("NaN"));
        assert!(!spec.accepts("inf"));
        assert!(!spec.accepts("-infinity"));
    }

    #[test]
    fn test_accepts_url() {
        let spec = VariableSpec::new("LINK").with_kind(VariableKind::Url);
        assert!(spec.accepts("https://example.com/a"));
        assert!(!spec.accepts("example.com"));
        assert!(!spec.accepts("https://"));
        assert!(!spec.accepts("https://exa mple.com"));
    }

    #[test]
    fn test_accepts_select() {
        let spec = VariableSpec::select("TONE", &["casual", "formal"]);
        assert!(spec.accepts("casual"));
        assert!(!spec.accepts("playful"));
        assert!(spec.accepts("   "));
    }
}
