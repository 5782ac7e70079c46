//! Viewport-relative section bounds and the provider seam.
//!
//! Bounds are queried on demand and never cached by the tracker: layout can
//! change between queries (resize, images loading in), so every evaluation
//! asks the provider fresh. Two providers exist:
//!
//! - [`ScrollSnapshot`], built from a live client's scroll report; a
//!   section missing from the snapshot is not mounted.
//! - [`DocumentLayout`], a pure model mapping document-space extents
//!   through a scroll offset; used by tests and the registry self-check.

use rustc_hash::FxHashMap;

use super::registry::SectionId;
use crate::reload::message::SectionRect;

// =============================================================================
// SectionBounds
// =============================================================================

/// A section's current vertical extent relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether the activation line falls inside this extent.
    ///
    /// Both comparisons are inclusive. Non-finite values (a misbehaving
    /// client reporting NaN or infinity) fail the test and the section is
    /// treated as not a candidate rather than an error.
    pub fn contains(&self, line: f64) -> bool {
        self.top.is_finite()
            && self.bottom.is_finite()
            && self.top <= line
            && self.bottom >= line
    }
}

// =============================================================================
// BoundsProvider
// =============================================================================

/// On-demand bounds query for mounted sections.
///
/// `None` means the section is not currently mounted/rendered; never an
/// error, just "not a candidate".
pub trait BoundsProvider {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds>;
}

// =============================================================================
// ScrollSnapshot
// =============================================================================

/// One scroll report from a live client: the scroll offset plus the
/// viewport-relative rect of every mounted section at that instant.
#[derive(Debug, Clone)]
pub struct ScrollSnapshot {
    /// Vertical scroll distance from the top of the page.
    offset: f64,
    rects: FxHashMap<SectionId, SectionBounds>,
}

impl ScrollSnapshot {
    pub fn new(offset: f64, rects: impl IntoIterator<Item = SectionRect>) -> Self {
        let rects = rects
            .into_iter()
            .map(|r| (r.id, SectionBounds::new(r.top, r.bottom)))
            .collect();
        Self { offset, rects }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn mounted(&self) -> usize {
        self.rects.len()
    }
}

impl BoundsProvider for ScrollSnapshot {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.rects.get(id).copied()
    }
}

// =============================================================================
// DocumentLayout
// =============================================================================

/// Document-space section extents, mapped to viewport-relative bounds
/// through a scroll offset.
///
/// `bounds = document extent - scroll offset`, the same arithmetic the
/// browser performs for `getBoundingClientRect`.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    extents: Vec<(SectionId, SectionBounds)>,
}

impl DocumentLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section's document-space extent (top and bottom offsets from
    /// the top of the page).
    pub fn with_section(mut self, id: impl Into<SectionId>, top: f64, bottom: f64) -> Self {
        self.extents
            .push((id.into(), SectionBounds::new(top, bottom)));
        self
    }

    /// View this layout at a given scroll offset.
    pub fn at_scroll(&self, offset: f64) -> ScrolledLayout<'_> {
        ScrolledLayout {
            layout: self,
            offset,
        }
    }
}

/// A [`DocumentLayout`] viewed at a fixed scroll offset.
pub struct ScrolledLayout<'a> {
    layout: &'a DocumentLayout,
    offset: f64,
}

impl BoundsProvider for ScrolledLayout<'_> {
    fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
        self.layout
            .extents
            .iter()
            .find(|(section_id, _)| section_id == id)
            .map(|(_, extent)| SectionBounds::new(extent.top - self.offset, extent.bottom - self.offset))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive_edges() {
        let bounds = SectionBounds::new(100.0, 200.0);
        assert!(bounds.contains(100.0));
        assert!(bounds.contains(200.0));
        assert!(bounds.contains(150.0));
        assert!(!bounds.contains(99.9));
        assert!(!bounds.contains(200.1));
    }

    #[test]
    fn test_contains_rejects_non_finite() {
        assert!(!SectionBounds::new(f64::NAN, 200.0).contains(100.0));
        assert!(!SectionBounds::new(0.0, f64::NAN).contains(100.0));
        assert!(!SectionBounds::new(f64::NEG_INFINITY, f64::INFINITY).contains(100.0));
    }

    #[test]
    fn test_snapshot_missing_section_is_unmounted() {
        let snapshot = ScrollSnapshot::new(
            0.0,
            vec![SectionRect {
                id: SectionId::from("home"),
                top: 0.0,
                bottom: 800.0,
            }],
        );
        assert!(snapshot.bounds(&SectionId::from("home")).is_some());
        assert!(snapshot.bounds(&SectionId::from("about")).is_none());
        assert_eq!(snapshot.mounted(), 1);
    }

    #[test]
    fn test_document_layout_scroll_arithmetic() {
        let layout = DocumentLayout::new()
            .with_section("home", 0.0, 800.0)
            .with_section("about", 800.0, 1600.0);

        let view = layout.at_scroll(900.0);
        let about = view.bounds(&SectionId::from("about")).unwrap();
        assert_eq!(about, SectionBounds::new(-100.0, 700.0));

        let home = view.bounds(&SectionId::from("home")).unwrap();
        assert_eq!(home, SectionBounds::new(-900.0, -100.0));

        assert!(view.bounds(&SectionId::from("contact")).is_none());
    }
}
