//! Scroll-driven active-section tracking.
//!
//! The single page is divided into named sections (home, about, projects,
//! blog, contact). As the viewer scrolls, exactly one section is considered
//! "active" and its navigation link is highlighted. The decision rule:
//!
//! - An activation line sits at a fixed offset below the viewport top
//!   (100 units by default).
//! - A section is a candidate when its current viewport-relative extent
//!   straddles that line (`top <= line <= bottom`, both inclusive).
//! - The first candidate in declared section order wins; declaration order
//!   matches the visual top-to-bottom order of sections on the page.
//! - When nothing qualifies (e.g. the viewer scrolled into the footer),
//!   the previously active section stays active.
//!
//! The tracker never caches bounds: layout can change between queries
//! (resize, content load), so providers are asked fresh on every evaluation.
//!
//! # Module Structure
//!
//! - `bounds` - viewport-relative extents and the [`BoundsProvider`] seam
//! - `registry` - the fixed, ordered section list
//! - `tracker` - the [`ActiveSectionTracker`] state machine

pub mod bounds;
pub mod registry;
pub mod tracker;

pub use bounds::{BoundsProvider, DocumentLayout, ScrollSnapshot, SectionBounds};
pub use registry::{Section, SectionId, SectionRegistry, SectionRegistryError};
pub use tracker::{ActiveSectionTracker, DEFAULT_ACTIVATION_LINE};
