//! Structural checks on typed templates

use std::collections::HashSet;

use tracing::debug;

use super::error::AuthoringError;
use crate::domain::PromptTemplate;
use crate::render::{self, PlaceholderSyntax};

/// Something worth telling the author that does not block publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthoringWarning {
    /// A token in the content names no declared variable; it will render verbatim
    UndeclaredPlaceholder(String),
    /// A declared variable never appears in the content
    UnusedVariable(String),
}

impl std::fmt::Display for AuthoringWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndeclaredPlaceholder(name) => write!(f, "placeholder {} is not a declared variable", name),
            Self::UnusedVariable(name) => write!(f, "variable {} does not appear in the content", name),
        }
    }
}

/// Check invariants the renderer relies on
pub fn check(template: &PromptTemplate) -> Result<(), AuthoringError> {
    debug!(id = %template.id, "check: called");
    if template.title.trim().is_empty() {
        return Err(AuthoringError::MissingField("title"));
    }
    if template.content.trim().is_empty() {
        return Err(AuthoringError::MissingField("content"));
    }

    let mut names = HashSet::new();
    for variable in &template.variables {
        if !render::is_valid_name(&variable.name) {
            return Err(AuthoringError::InvalidVariableName(variable.name.clone()));
        }
        if !names.insert(variable.name.as_str()) {
            return Err(AuthoringError::DuplicateVariable(variable.name.clone()));
        }
        if variable.kind.is_picklist() && variable.options.is_empty() {
            return Err(AuthoringError::MissingOptions(variable.name.clone()));
        }
    }

    if let Some(key) = template.example_values.keys().find(|k| !names.contains(k.as_str())) {
        return Err(AuthoringError::UnknownExampleKey(key.clone()));
    }

    let brackets = PlaceholderSyntax::Bracket.count_declared(&template.content, &template.variables);
    let braces = PlaceholderSyntax::Brace.count_declared(&template.content, &template.variables);
    if brackets > 0 && braces > 0 {
        debug!(%brackets, %braces, "check: mixed placeholder syntax");
        return Err(AuthoringError::MixedSyntax);
    }

    if let Some(declared) = template.syntax {
        let (own, other, found) = match declared {
            PlaceholderSyntax::Bracket => (brackets, braces, PlaceholderSyntax::Brace),
            PlaceholderSyntax::Brace => (braces, brackets, PlaceholderSyntax::Bracket),
        };
        if own == 0 && other > 0 {
            debug!(%declared, %found, "check: declared syntax does not match content");
            return Err(AuthoringError::SyntaxMismatch { declared, found });
        }
    }

    Ok(())
}

/// Non-fatal mismatches between content tokens and declared variables,
/// read with the convention the template is rendered under
pub fn warnings(template: &PromptTemplate, syntax: PlaceholderSyntax) -> Vec<AuthoringWarning> {
    let found = render::placeholders(&template.content, syntax);

    let mut warnings: Vec<AuthoringWarning> = found
        .iter()
        .filter(|name| template.variable(name).is_none())
        .map(|name| AuthoringWarning::UndeclaredPlaceholder(name.clone()))
        .collect();

    warnings.extend(
        template
            .variables
            .iter()
            .filter(|v| !found.contains(&v.name))
            .map(|v| AuthoringWarning::UnusedVariable(v.name.clone())),
    );
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{VariableKind, VariableSpec};

    fn template(content: &str, names: &[&str]) -> PromptTemplate {
        PromptTemplate::new("t", "Title", content).with_variables(names.iter().map(|n| VariableSpec::new(*n)).collect())
    }

    #[test]
    fn test_check_ok() {
        let t = template("Write about [TOPIC].", &["TOPIC"]).with_examples([("TOPIC", "owls")]);
        assert!(check(&t).is_ok());
    }

    #[test]
    fn test_check_missing_title() {
        let mut t = template("x", &[]);
        t.title = "  ".to_string();
        assert!(matches!(check(&t), Err(AuthoringError::MissingField("title"))));
    }

    #[test]
    fn test_check_duplicate_variable() {
        let t = template("[A]", &["A", "A"]);
        assert!(matches!(check(&t), Err(AuthoringError::DuplicateVariable(name)) if name == "A"));
    }

    #[test]
    fn test_check_invalid_name() {
        let t = template("[A]", &["A]"]);
        assert!(matches!(check(&t), Err(AuthoringError::InvalidVariableName(_))));
    }

    #[test]
    fn test_check_picklist_without_options() {
        let mut t = template("[TONE]", &[]);
        t.variables.push(VariableSpec::new("TONE").with_kind(VariableKind::Dropdown));
        assert!(matches!(check(&t), Err(AuthoringError::MissingOptions(_))));
    }

    #[test]
    fn test_check_unknown_example_key() {
        let t = template("[A]", &["A"]).with_examples([("B", "x")]);
        assert!(matches!(check(&t), Err(AuthoringError::UnknownExampleKey(key)) if key == "B"));
    }

    #[test]
    fn test_check_mixed_syntax() {
        let t = template("[A] and {b}", &["A", "b"]);
        assert!(matches!(check(&t), Err(AuthoringError::MixedSyntax)));
    }

    #[test]
    fn test_check_declared_syntax_must_match_content() {
        let mut t = template("Write about [TOPIC].", &["TOPIC"]);
        t.syntax = Some(PlaceholderSyntax::Brace);
        assert!(matches!(
            check(&t),
            Err(AuthoringError::SyntaxMismatch {
                declared: PlaceholderSyntax::Brace,
                found: PlaceholderSyntax::Bracket,
            })
        ));

        t.syntax = Some(PlaceholderSyntax::Bracket);
        assert!(check(&t).is_ok());

        let mut t = template("No tokens at all.", &["TOPIC"]);
        t.syntax = Some(PlaceholderSyntax::Brace);
        assert!(check(&t).is_ok());
    }

    #[test]
    fn test_check_brace_with_literal_brackets() {
        let t = template("List [1] and {topic}", &["topic"]);
        assert!(check(&t).is_ok());
    }

    #[test]
    fn test_warnings_follow_given_syntax() {
        let t = template("Write about {topic}.", &["topic"]);
        assert!(warnings(&t, PlaceholderSyntax::Brace).is_empty());
        assert_eq!(
            warnings(&t, PlaceholderSyntax::Bracket),
            vec![AuthoringWarning::UnusedVariable("topic".to_string())]
        );
    }

    #[test]
    fn test_warnings() {
        let t = template("Write about [TOPIC] for [AUDIENCE].", &["TOPIC", "TONE"]);
        let warnings = warnings(&t, PlaceholderSyntax::Bracket);
        assert_eq!(
            warnings,
            vec![
                AuthoringWarning::UndeclaredPlaceholder("AUDIENCE".to_string()),
                AuthoringWarning::UnusedVariable("TONE".to_string()),
            ]
        );
    }
}
