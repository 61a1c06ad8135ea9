//! Catalog categories

use serde::{Deserialize, Serialize};

/// A category grouping prompts in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,

    /// URL-safe key; derived from the name when left empty
    #[serde(default)]
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            description: None,
            icon: None,
        }
    }

    /// Does `key` name this category by slug, id or display name
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.id == key
            || self.slug.eq_ignore_ascii_case(key)
            || self.name.eq_ignore_ascii_case(key)
    }
}

/// Lower-case, collapse runs of non-alphanumerics into `-`, trim `-` at both ends
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Social Media"), "social-media");
        assert_eq!(slugify("  E-commerce!! "), "e-commerce");
        assert_eq!(slugify("AI & ML -- 2024"), "ai-ml-2024");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_new_derives_slug() {
        let category = Category::new("c1", "Image Generation");
        assert_eq!(category.slug, "image-generation");
    }

    #[test]
    fn test_matches() {
        let category = Category::new("c1", "Social Media");
        assert!(category.matches("social-media"));
        assert!(category.matches("SOCIAL-MEDIA"));
        assert!(category.matches("social media"));
        assert!(category.matches("c1"));
        assert!(!category.matches("social"));
    }
}
