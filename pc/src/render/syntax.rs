//! Placeholder token conventions

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::VariableSpec;

/// Characters that may not appear inside a placeholder name
pub const RESERVED_NAME_CHARS: &[char] = &['[', ']', '{', '}', '\r', '\n'];

static BRACKET_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]{}\r\n]+)\]").expect("bracket token pattern is valid"));

static BRACE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^\[\]{}\r\n]+)\}").expect("brace token pattern is valid"));

/// How a template marks its placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderSyntax {
    /// `[NAME]`
    #[default]
    Bracket,
    /// `{name}`
    Brace,
}

impl PlaceholderSyntax {
    /// The placeholder form of a variable name
    pub fn token(&self, name: &str) -> String {
        match self {
            Self::Bracket => format!("[{}]", name),
            Self::Brace => format!("{{{}}}", name),
        }
    }

    /// Pattern matching one token; capture group 1 is the name
    pub(crate) fn pattern(&self) -> &'static Regex {
        match self {
            Self::Bracket => &BRACKET_TOKEN,
            Self::Brace => &BRACE_TOKEN,
        }
    }

    /// Number of tokens in `content` that name a declared variable
    pub fn count_declared(&self, content: &str, variables: &[VariableSpec]) -> usize {
        self.pattern()
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .filter(|name| variables.iter().any(|v| v.name == name.as_str()))
            .count()
    }

    /// Guess the convention from content when a template does not declare one
    ///
    /// Brace wins only when it strictly outnumbers bracket tokens naming declared
    /// variables.
    pub fn detect(content: &str, variables: &[VariableSpec]) -> Self {
        let brackets = Self::Bracket.count_declared(content, variables);
        let braces = Self::Brace.count_declared(content, variables);
        debug!(%brackets, %braces, "PlaceholderSyntax::detect: counted tokens");
        if braces > brackets { Self::Brace } else { Self::Bracket }
    }
}

impl std::fmt::Display for PlaceholderSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bracket => write!(f, "bracket"),
            Self::Brace => write!(f, "brace"),
        }
    }
}

impl std::str::FromStr for PlaceholderSyntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bracket" | "[]" => Ok(Self::Bracket),
            "brace" | "{}" => Ok(Self::Brace),
            _ => Err(format!("Unknown placeholder syntax: {}", s)),
        }
    }
}

/// Whether `name` can appear inside a placeholder token
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(RESERVED_NAME_CHARS)
}
