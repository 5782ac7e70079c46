//! Section registry: the fixed, ordered list of page sections.
//!
//! The registry is built once from configuration; sections are not created
//! or destroyed at runtime. Order is load-bearing: it defines the tie-break
//! priority of the active-section scan and must match the visual
//! top-to-bottom order of sections on the page.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// SectionId
// =============================================================================

/// Identifier of a page section (doubles as the HTML anchor, e.g. `#about`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the id is safe to use as an HTML anchor:
    /// non-empty, lowercase alphanumeric and hyphens only.
    pub fn is_anchor_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// Section
// =============================================================================

/// A named, anchorable region of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    /// Human-readable navigation label (e.g. "About").
    label: String,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

// =============================================================================
// SectionRegistry
// =============================================================================

/// Registration errors.
///
/// Duplicate ids are rejected: a duplicate makes the declared-order
/// tie-break ambiguous and the page anchors collide.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionRegistryError {
    #[error("duplicate section id `{0}`")]
    DuplicateId(SectionId),
}

/// The fixed, ordered section list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry from an ordered sequence of sections.
    ///
    /// Ids must be unique. An empty sequence is accepted (the tracker then
    /// never changes state), but the config layer refuses an empty
    /// `[[site.sections]]` list before a registry is ever built.
    pub fn new(sections: Vec<Section>) -> Result<Self, SectionRegistryError> {
        for (i, section) in sections.iter().enumerate() {
            if sections[..i].iter().any(|s| s.id() == section.id()) {
                return Err(SectionRegistryError::DuplicateId(section.id().clone()));
            }
        }
        Ok(Self { sections })
    }

    /// Sections in declared (tie-break) order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Id of the first declared section, the tracker's initial state.
    pub fn first_id(&self) -> Option<&SectionId> {
        self.sections.first().map(Section::id)
    }

    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio_sections() -> Vec<Section> {
        vec![
            Section::new("home", "Home"),
            Section::new("about", "About"),
            Section::new("projects", "Projects"),
            Section::new("blog", "Blog"),
            Section::new("contact", "Contact"),
        ]
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry = SectionRegistry::new(portfolio_sections()).unwrap();
        let ids: Vec<_> = registry.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["home", "about", "projects", "blog", "contact"]);
        assert_eq!(registry.first_id().unwrap().as_str(), "home");
    }

    #[test]
    fn test_registry_rejects_duplicate_id() {
        let sections = vec![
            Section::new("home", "Home"),
            Section::new("about", "About"),
            Section::new("home", "Home again"),
        ];
        assert_eq!(
            SectionRegistry::new(sections),
            Err(SectionRegistryError::DuplicateId(SectionId::from("home")))
        );
    }

    #[test]
    fn test_registry_accepts_empty() {
        let registry = SectionRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.first_id(), None);
    }

    #[test]
    fn test_lookup() {
        let registry = SectionRegistry::new(portfolio_sections()).unwrap();
        assert!(registry.contains(&SectionId::from("blog")));
        assert_eq!(
            registry.get(&SectionId::from("about")).unwrap().label(),
            "About"
        );
        assert!(!registry.contains(&SectionId::from("resume")));
    }

    #[test]
    fn test_anchor_safe_ids() {
        assert!(SectionId::from("about").is_anchor_safe());
        assert!(SectionId::from("my-work-2").is_anchor_safe());
        assert!(!SectionId::from("").is_anchor_safe());
        assert!(!SectionId::from("About").is_anchor_safe());
        assert!(!SectionId::from("my work").is_anchor_safe());
    }
}
