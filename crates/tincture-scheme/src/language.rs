//! Language registry collaborator.
//!
//! A registry maps a language tag (`"c"`, `"rust"`, `"def"`) to a display
//! name and to the ordered list of style ids that language highlights. The
//! serializer uses the display name for section comments; editors use the
//! style ids to pre-create styles. Neither is needed to parse or serialize
//! correctly.

use std::collections::HashMap;

/// Source of language metadata.
pub trait LanguageRegistry {
    /// Human-readable name for a language tag.
    fn display_name(&self, tag: &str) -> Option<String>;

    /// Well-known style ids of a language, in presentation order.
    fn style_ids(&self, tag: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Default)]
struct LanguageEntry {
    name: String,
    style_ids: Vec<String>,
}

/// In-memory [`LanguageRegistry`].
///
/// ```
/// use tincture_scheme::{LanguageRegistry, StaticLanguageRegistry};
///
/// let registry = StaticLanguageRegistry::new()
///     .with_language("c", "C", ["c:comment", "c:keyword"]);
///
/// assert_eq!(registry.display_name("c").as_deref(), Some("C"));
/// assert_eq!(registry.style_ids("c"), vec!["c:comment", "c:keyword"]);
/// assert!(registry.style_ids("go").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticLanguageRegistry {
    languages: HashMap<String, LanguageEntry>,
}

impl StaticLanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a language.
    pub fn insert<I, S>(&mut self, tag: impl Into<String>, name: impl Into<String>, style_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.insert(
            tag.into(),
            LanguageEntry {
                name: name.into(),
                style_ids: style_ids.into_iter().map(Into::into).collect(),
            },
        );
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_language<I, S>(
        mut self,
        tag: impl Into<String>,
        name: impl Into<String>,
        style_ids: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(tag, name, style_ids);
        self
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl LanguageRegistry for StaticLanguageRegistry {
    fn display_name(&self, tag: &str) -> Option<String> {
        self.languages.get(tag).map(|entry| entry.name.clone())
    }

    fn style_ids(&self, tag: &str) -> Vec<String> {
        self.languages
            .get(tag)
            .map(|entry| entry.style_ids.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_language() {
        let mut registry = StaticLanguageRegistry::new();
        registry.insert("def", "Default", ["def:comment"]);
        registry.insert("def", "Defaults", ["def:string", "def:number"]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.display_name("def").as_deref(), Some("Defaults"));
        assert_eq!(registry.style_ids("def"), vec!["def:string", "def:number"]);
    }
}
