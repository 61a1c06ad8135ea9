//! Catalog file loading and browsing

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::CatalogError;
use crate::authoring;
use crate::domain::{Category, PromptTemplate, slugify};

/// What the current viewer is entitled to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Free,
    Premium,
}

/// Filters for browsing prompts
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Category slug, id or name
    pub category: Option<String>,
    /// Case-insensitive text matched against title, content, description and use cases
    pub search: Option<String>,
    /// Include draft and archived prompts
    pub include_unpublished: bool,
}

/// Result of a browse, newest first
#[derive(Debug, Clone, Default)]
pub struct Listing<'a> {
    pub prompts: Vec<&'a PromptTemplate>,
}

impl<'a> Listing<'a> {
    /// Split into free and locked prompts, keeping order
    pub fn partition(&self) -> (Vec<&'a PromptTemplate>, Vec<&'a PromptTemplate>) {
        self.prompts.iter().copied().partition(|p| !p.is_locked)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

/// A category with its number of published prompts
#[derive(Debug, Clone)]
pub struct CategorySummary<'a> {
    pub category: &'a Category,
    pub prompt_count: usize,
}

/// Categories and prompt templates loaded from a file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    prompts: Vec<PromptTemplate>,
}

impl Catalog {
    /// Build a catalog, checking every prompt
    pub fn new(categories: Vec<Category>, prompts: Vec<PromptTemplate>) -> Result<Self, CatalogError> {
        Self { categories, prompts }.validated()
    }

    /// Load a catalog file; `.json` files are parsed as JSON, everything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(?path, "Catalog::load: called");
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        info!(
            path = %path.display(),
            categories = catalog.categories.len(),
            prompts = catalog.prompts.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yaml::from_str(content)?;
        catalog.validated()
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(content)?;
        catalog.validated()
    }

    fn validated(mut self) -> Result<Self, CatalogError> {
        debug!("Catalog::validated: called");
        let mut slugs = HashSet::new();
        for category in &mut self.categories {
            if category.slug.trim().is_empty() {
                category.slug = slugify(&category.name);
            }
            if !slugs.insert(category.slug.clone()) {
                return Err(CatalogError::DuplicateCategory(category.slug.clone()));
            }
        }

        let mut ids = HashSet::new();
        for prompt in &self.prompts {
            if !ids.insert(prompt.id.as_str()) {
                return Err(CatalogError::DuplicatePrompt(prompt.id.clone()));
            }
            authoring::check(prompt).map_err(|source| CatalogError::InvalidPrompt {
                id: prompt.id.clone(),
                source,
            })?;
            if let Some(category) = &prompt.category {
                if !slugs.contains(category) {
                    return Err(CatalogError::UnknownCategory {
                        id: prompt.id.clone(),
                        category: category.clone(),
                    });
                }
            }
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// All prompts, published or not, in file order
    pub fn prompts(&self) -> &[PromptTemplate] {
        &self.prompts
    }

    /// Categories with their published prompt counts
    pub fn categories(&self) -> Vec<CategorySummary<'_>> {
        self.categories
            .iter()
            .map(|category| CategorySummary {
                category,
                prompt_count: self
                    .prompts
                    .iter()
                    .filter(|p| p.is_published() && p.category.as_deref() == Some(category.slug.as_str()))
                    .count(),
            })
            .collect()
    }

    /// Find a category by slug, id or name
    pub fn find_category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches(key))
    }

    /// Any prompt by id, regardless of status or lock
    pub fn prompt(&self, id: &str) -> Option<&PromptTemplate> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Prompts matching `query`, newest first
    pub fn browse(&self, query: &Query) -> Listing<'_> {
        debug!(?query, "Catalog::browse: called");
        let category_slug = match query.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(key) => match self.find_category(key) {
                Some(category) => Some(category.slug.as_str()),
                None => {
                    debug!(%key, "Catalog::browse: unknown category, nothing matches");
                    return Listing::default();
                }
            },
            None => None,
        };
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut prompts: Vec<&PromptTemplate> = self
            .prompts
            .iter()
            .filter(|p| query.include_unpublished || p.is_published())
            .filter(|p| category_slug.is_none_or(|slug| p.category.as_deref() == Some(slug)))
            .filter(|p| needle.as_deref().is_none_or(|n| matches_search(p, n)))
            .collect();
        prompts.sort_by(|a, b| newest_first(a, b));

        debug!(count = prompts.len(), "Catalog::browse: done");
        Listing { prompts }
    }

    /// Open a prompt for rendering
    ///
    /// Unpublished prompts are invisible; locked prompts need premium access.
    pub fn open(&self, id: &str, access: Access) -> Result<&PromptTemplate, CatalogError> {
        debug!(%id, ?access, "Catalog::open: called");
        let prompt = self
            .prompt(id)
            .filter(|p| p.is_published())
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        if prompt.is_locked && access != Access::Premium {
            debug!(%id, "Catalog::open: locked prompt refused");
            return Err(CatalogError::Locked(id.to_string()));
        }
        Ok(prompt)
    }
}

fn matches_search(prompt: &PromptTemplate, needle: &str) -> bool {
    prompt.title.to_lowercase().contains(needle)
        || prompt.content.to_lowercase().contains(needle)
        || prompt
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || prompt.use_cases.iter().any(|u| u.to_lowercase().contains(needle))
}

/// Newest first, undated last, then by id
fn newest_first(a: &PromptTemplate, b: &PromptTemplate) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.id.cmp(&b.id))
}
