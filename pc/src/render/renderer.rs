//! Placeholder substitution
//!
//! Substitution is a single scan over the original content: each token naming a
//! declared variable is replaced by its value, or kept as-is while the value is
//! empty. Output is assembled from original token positions, so a value that
//! itself looks like a placeholder is never substituted again.

use std::collections::HashSet;

use tracing::debug;

use super::syntax::PlaceholderSyntax;
use crate::domain::{FillStatus, PromptTemplate, Values, VariableSpec};

/// Substitute declared placeholders in `content`
///
/// Tokens naming undeclared variables, and tokens whose value is missing or
/// empty, are copied through verbatim.
pub fn render(content: &str, variables: &[VariableSpec], values: &Values, syntax: PlaceholderSyntax) -> String {
    debug!(content_len = content.len(), variables = variables.len(), %syntax, "render: called");
    let declared: HashSet<&str> = variables.iter().map(|v| v.name.as_str()).collect();

    let mut out = String::with_capacity(content.len());
    let mut copied_to = 0;
    let mut substituted = 0usize;

    for caps in syntax.pattern().captures_iter(content) {
        let (Some(token), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if !declared.contains(name.as_str()) {
            continue;
        }
        if let Some(value) = values.get(name.as_str()).filter(|v| !v.is_empty()) {
            out.push_str(&content[copied_to..token.start()]);
            out.push_str(value);
            copied_to = token.end();
            substituted += 1;
        }
    }
    out.push_str(&content[copied_to..]);

    debug!(%substituted, "render: done");
    out
}

/// Per-variable "has a non-blank value"
pub fn fill_status(variables: &[VariableSpec], values: &Values) -> FillStatus {
    variables
        .iter()
        .map(|v| {
            let filled = values.get(&v.name).is_some_and(|value| !value.trim().is_empty());
            (v.name.clone(), filled)
        })
        .collect()
}

/// Copy of the template's example values, or `None` if it has none
pub fn load_example(template: &PromptTemplate) -> Option<Values> {
    debug!(id = %template.id, "load_example: called");
    if !template.has_examples() {
        debug!("load_example: template has no example values");
        return None;
    }
    debug_assert!(
        template.example_values.keys().all(|k| template.variable(k).is_some()),
        "example values must only name declared variables"
    );
    Some(template.example_values.clone())
}

/// Every declared variable mapped to the empty string
pub fn clear(variables: &[VariableSpec]) -> Values {
    variables.iter().map(|v| (v.name.clone(), String::new())).collect()
}

/// Distinct placeholder names in `content`, in order of first appearance
pub fn placeholders(content: &str, syntax: PlaceholderSyntax) -> Vec<String> {
    let mut seen = HashSet::new();
    syntax
        .pattern()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vars(names: &[&str]) -> Vec<VariableSpec> {
        names.iter().map(|n| VariableSpec::new(*n)).collect()
    }

    fn values(pairs: &[(&str, &str)]) -> Values {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    const BLOG: &str = "Write a [TONE] post about [TOPIC].";

    #[test]
    fn test_render_partial_fill() {
        let out = render(BLOG, &vars(&["TONE", "TOPIC"]), &values(&[("TONE", "casual")]), PlaceholderSyntax::Bracket);
        assert_eq!(out, "Write a casual post about [TOPIC].");
    }

    #[test]
    fn test_render_empty_values_is_identity() {
        let out = render(BLOG, &vars(&["TONE", "TOPIC"]), &Values::new(), PlaceholderSyntax::Bracket);
        assert_eq!(out, BLOG);
    }

    #[test]
    fn test_render_empty_string_keeps_placeholder() {
        let out = render(BLOG, &vars(&["TONE", "TOPIC"]), &values(&[("TONE", "")]), PlaceholderSyntax::Bracket);
        assert_eq!(out, BLOG);
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render(
            "[NAME], dear [NAME]!",
            &vars(&["NAME"]),
            &values(&[("NAME", "Ada")]),
            PlaceholderSyntax::Bracket,
        );
        assert_eq!(out, "Ada, dear Ada!");
    }

    #[test]
    fn test_render_leaves_undeclared_tokens() {
        let out = render(
            "See [NOTE] about [TOPIC].",
            &vars(&["TOPIC"]),
            &values(&[("TOPIC", "owls"), ("NOTE", "ignored")]),
            PlaceholderSyntax::Bracket,
        );
        assert_eq!(out, "See [NOTE] about owls.");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render(
            "[A] then [B]",
            &vars(&["A", "B"]),
            &values(&[("A", "[B]"), ("B", "bee")]),
            PlaceholderSyntax::Bracket,
        );
        assert_eq!(out, "[B] then bee");
    }

    #[test]
    fn test_render_brace_syntax() {
        let out = render(
            "Summarise {topic} for [AUDIENCE].",
            &vars(&["topic", "AUDIENCE"]),
            &values(&[("topic", "tides"), ("AUDIENCE", "kids")]),
            PlaceholderSyntax::Brace,
        );
        assert_eq!(out, "Summarise tides for [AUDIENCE].");
    }

    #[test]
    fn test_render_nested_brackets() {
        let out = render("[[X]]", &vars(&["X"]), &values(&[("X", "1")]), PlaceholderSyntax::Bracket);
        assert_eq!(out, "[1]");
    }

    #[test]
    fn test_fill_status() {
        let status = fill_status(&vars(&["TONE", "TOPIC"]), &values(&[("TONE", "casual")]));
        assert_eq!(status.get("TONE"), Some(&true));
        assert_eq!(status.get("TOPIC"), Some(&false));

        let status = fill_status(&vars(&["TONE", "TOPIC"]), &Values::new());
        assert!(status.values().all(|filled| !filled));
        assert_eq!(status.len(), 2);
    }

    #[test]
    fn test_fill_status_trims() {
        let status = fill_status(&vars(&["TONE"]), &values(&[("TONE", "   ")]));
        assert_eq!(status.get("TONE"), Some(&false));
    }

    #[test]
    fn test_load_example() {
        let template = PromptTemplate::new("t", "T", BLOG)
            .with_variables(vars(&["TONE", "TOPIC"]))
            .with_examples([("TONE", "playful"), ("TOPIC", "cats")]);
        assert_eq!(load_example(&template), Some(values(&[("TONE", "playful"), ("TOPIC", "cats")])));
    }

    #[test]
    fn test_load_example_none() {
        let template = PromptTemplate::new("t", "T", BLOG).with_variables(vars(&["TONE", "TOPIC"]));
        assert_eq!(load_example(&template), None);
    }

    #[test]
    fn test_load_example_then_clear() {
        let variables = vars(&["TONE", "TOPIC"]);
        let template = PromptTemplate::new("t", "T", BLOG)
            .with_variables(variables.clone())
            .with_examples([("TONE", "playful")]);
        let _ = load_example(&template);
        assert_eq!(clear(&variables), values(&[("TONE", ""), ("TOPIC", "")]));
    }

    #[test]
    fn test_placeholders() {
        let names = placeholders("[B] [A] [B] {c}", PlaceholderSyntax::Bracket);
        assert_eq!(names, vec!["B".to_string(), "A".to_string()]);
        assert_eq!(placeholders("[B] {c}", PlaceholderSyntax::Brace), vec!["c".to_string()]);
    }

    #[derive(Debug, Clone)]
    enum Piece {
        Text(String),
        Declared(usize),
        /// Lower-case name, never declared; emitted in both token forms
        Undeclared(String),
        /// Declared name written in the other convention
        OtherForm(usize),
    }

    fn other(syntax: PlaceholderSyntax) -> PlaceholderSyntax {
        match syntax {
            PlaceholderSyntax::Bracket => PlaceholderSyntax::Brace,
            PlaceholderSyntax::Brace => PlaceholderSyntax::Bracket,
        }
    }

    fn count_tokens(content: &str, syntax: PlaceholderSyntax) -> usize {
        syntax.pattern().find_iter(content).count()
    }

    fn template_strategy() -> impl Strategy<Value = (PlaceholderSyntax, Vec<String>, String)> {
        let syntax = prop_oneof![Just(PlaceholderSyntax::Bracket), Just(PlaceholderSyntax::Brace)];
        (syntax, prop::collection::btree_set("[A-Z]{1,6}", 1..4))
            .prop_flat_map(|(syntax, names)| {
                let names: Vec<String> = names.into_iter().collect();
                let count = names.len();
                let piece = prop_oneof![
                    "[a-z .,]{0,8}".prop_map(Piece::Text),
                    (0..count).prop_map(Piece::Declared),
                    "[a-z]{1,4}".prop_map(Piece::Undeclared),
                    (0..count).prop_map(Piece::OtherForm),
                ];
                (Just(syntax), Just(names), prop::collection::vec(piece, 0..12))
            })
            .prop_map(|(syntax, names, pieces)| {
                let mut content = String::new();
                for piece in pieces {
                    match piece {
                        Piece::Text(text) => content.push_str(&text),
                        Piece::Declared(i) => content.push_str(&syntax.token(&names[i])),
                        Piece::Undeclared(name) => {
                            content.push_str(&PlaceholderSyntax::Bracket.token(&name));
                            content.push_str(&PlaceholderSyntax::Brace.token(&name));
                        }
                        Piece::OtherForm(i) => content.push_str(&other(syntax).token(&names[i])),
                    }
                }
                (syntax, names, content)
            })
    }

    proptest! {
        #[test]
        fn prop_render_with_no_values_is_identity((syntax, names, content) in template_strategy()) {
            let variables: Vec<VariableSpec> = names.iter().map(VariableSpec::new).collect();
            prop_assert_eq!(render(&content, &variables, &Values::new(), syntax), content);
        }

        #[test]
        fn prop_filled_tokens_disappear(
            (syntax, names, content) in template_strategy(),
            fill in prop::collection::vec("[a-z]{1,6}", 4),
        ) {
            let variables: Vec<VariableSpec> = names.iter().map(VariableSpec::new).collect();
            let values: Values = names.iter().cloned().zip(fill.iter().cloned()).collect();
            let out = render(&content, &variables, &values, syntax);
            for name in &names {
                prop_assert!(!out.contains(&syntax.token(name)));
            }

            // Undeclared tokens and the other convention pass through untouched
            let undeclared = syntax
                .pattern()
                .captures_iter(&content)
                .filter(|caps| !names.iter().any(|n| n == &caps[1]))
                .count();
            prop_assert_eq!(count_tokens(&out, syntax), undeclared);
            prop_assert_eq!(count_tokens(&out, other(syntax)), count_tokens(&content, other(syntax)));
        }

        #[test]
        fn prop_rerender_is_noop(
            (syntax, names, content) in template_strategy(),
            fill in prop::collection::vec(prop::option::of("[a-z ]{1,6}"), 4),
        ) {
            let variables: Vec<VariableSpec> = names.iter().map(VariableSpec::new).collect();
            let values: Values = names
                .iter()
                .zip(fill.iter())
                .filter_map(|(name, value)| value.clone().map(|v| (name.clone(), v)))
                .collect();
            let once = render(&content, &variables, &values, syntax);
            let twice = render(&once, &variables, &values, syntax);
            prop_assert_eq!(once, twice);
        }
    }
}
