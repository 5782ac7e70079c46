//! The active-section state machine.
//!
//! One state variable (`active`), overwritten only when a strictly-ordered
//! scan over the registry finds a section straddling the activation line;
//! any other evaluation is a self-loop. There is no terminal state: a
//! tracker lives as long as the client connection that owns it, and is
//! dropped (deregistered) when that connection goes away.

use super::bounds::BoundsProvider;
use super::registry::{SectionId, SectionRegistry};

/// Offset of the activation line below the viewport top, in CSS pixels.
///
/// A section is active while this line falls inside its extent. A fixed
/// near-top line keeps evaluation cheap (one bounds check per section,
/// early exit on first match) and deterministic under the declared-order
/// tie-break, unlike "largest visible area" policies which get ambiguous
/// when several sections are partially visible.
pub const DEFAULT_ACTIVATION_LINE: f64 = 100.0;

/// Fallback active id for a tracker built over an empty registry.
const FALLBACK_SECTION: &str = "home";

/// Tracks which section is currently active for one viewer.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    registry: SectionRegistry,
    line: f64,
    active: SectionId,
}

impl ActiveSectionTracker {
    /// Create a tracker with the default activation line.
    ///
    /// Initial state: the first registered section's id (conventionally
    /// "home"). An empty registry falls back to "home" and the tracker
    /// stays there forever.
    pub fn new(registry: SectionRegistry) -> Self {
        let active = registry
            .first_id()
            .cloned()
            .unwrap_or_else(|| SectionId::from(FALLBACK_SECTION));
        Self {
            registry,
            line: DEFAULT_ACTIVATION_LINE,
            active,
        }
    }

    /// Override the activation line offset (config: `site.nav.activation_line`).
    pub fn with_activation_line(mut self, line: f64) -> Self {
        self.line = line;
        self
    }

    /// The currently active section id.
    pub fn active(&self) -> &SectionId {
        &self.active
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Handle one scroll signal: re-evaluate and update the active id.
    ///
    /// Never fails; a no-match evaluation leaves the state untouched.
    pub fn on_scroll(&mut self, bounds: &dyn BoundsProvider) {
        self.active = self.evaluate(bounds);
    }

    /// Determine the active section for the given bounds, without mutating.
    ///
    /// Scans registered sections in declared order and returns the first
    /// whose extent straddles the activation line. Unmounted sections
    /// (provider returns `None`) are skipped. When no section qualifies the
    /// previously active id is returned unchanged; scrolling past the last
    /// section must not reset the highlight to a default.
    pub fn evaluate(&self, bounds: &dyn BoundsProvider) -> SectionId {
        for section in self.registry.iter() {
            if let Some(extent) = bounds.bounds(section.id())
                && extent.contains(self.line)
            {
                return section.id().clone();
            }
        }
        self.active.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::message::SectionRect;
    use crate::scrollspy::bounds::{DocumentLayout, ScrollSnapshot};
    use crate::scrollspy::registry::{Section, SectionRegistry};

    fn registry(ids: &[(&str, &str)]) -> SectionRegistry {
        SectionRegistry::new(
            ids.iter()
                .map(|(id, label)| Section::new(*id, *label))
                .collect(),
        )
        .unwrap()
    }

    fn portfolio_registry() -> SectionRegistry {
        registry(&[
            ("home", "Home"),
            ("about", "About"),
            ("projects", "Projects"),
            ("blog", "Blog"),
            ("contact", "Contact"),
        ])
    }

    fn rect(id: &str, top: f64, bottom: f64) -> SectionRect {
        SectionRect {
            id: SectionId::from(id),
            top,
            bottom,
        }
    }

    #[test]
    fn test_initial_state_is_first_section() {
        let tracker = ActiveSectionTracker::new(portfolio_registry());
        assert_eq!(tracker.active().as_str(), "home");
    }

    #[test]
    fn test_initial_state_empty_registry_falls_back() {
        let tracker = ActiveSectionTracker::new(SectionRegistry::new(Vec::new()).unwrap());
        assert_eq!(tracker.active().as_str(), "home");
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let tracker = ActiveSectionTracker::new(portfolio_registry());
        let snapshot = ScrollSnapshot::new(
            850.0,
            vec![rect("home", -850.0, -50.0), rect("about", -50.0, 750.0)],
        );

        let first = tracker.evaluate(&snapshot);
        for _ in 0..10 {
            assert_eq!(tracker.evaluate(&snapshot), first);
        }
        assert_eq!(first.as_str(), "about");
    }

    #[test]
    fn test_tie_break_declared_order_wins() {
        // Both straddle the line at 100; A is declared first.
        let tracker = ActiveSectionTracker::new(registry(&[("a", "A"), ("b", "B")]));
        let snapshot = ScrollSnapshot::new(
            0.0,
            vec![rect("a", 50.0, 150.0), rect("b", 80.0, 200.0)],
        );
        assert_eq!(tracker.evaluate(&snapshot).as_str(), "a");
    }

    #[test]
    fn test_no_candidate_retains_prior_state() {
        let mut tracker = ActiveSectionTracker::new(portfolio_registry());

        // Land on "projects" first.
        let on_projects = ScrollSnapshot::new(1700.0, vec![rect("projects", 50.0, 800.0)]);
        tracker.on_scroll(&on_projects);
        assert_eq!(tracker.active().as_str(), "projects");

        // Now a scroll where nothing straddles the line (footer territory).
        let in_footer = ScrollSnapshot::new(
            4000.0,
            vec![
                rect("projects", -2300.0, -1550.0),
                rect("contact", -700.0, 60.0),
            ],
        );
        tracker.on_scroll(&in_footer);
        assert_eq!(tracker.active().as_str(), "projects");
    }

    #[test]
    fn test_unmounted_section_skipped() {
        let mut tracker = ActiveSectionTracker::new(portfolio_registry());

        // "home" would qualify geometrically but is absent from the report,
        // so "about" (mounted, straddling) wins.
        let snapshot = ScrollSnapshot::new(
            0.0,
            vec![rect("about", 90.0, 900.0), rect("projects", 900.0, 1700.0)],
        );
        tracker.on_scroll(&snapshot);
        assert_eq!(tracker.active().as_str(), "about");
    }

    #[test]
    fn test_on_scroll_updates_then_holds() {
        let mut tracker = ActiveSectionTracker::new(portfolio_registry());
        let layout = DocumentLayout::new()
            .with_section("home", 0.0, 800.0)
            .with_section("about", 800.0, 1600.0)
            .with_section("projects", 1600.0, 2400.0);

        tracker.on_scroll(&layout.at_scroll(0.0));
        assert_eq!(tracker.active().as_str(), "home");

        tracker.on_scroll(&layout.at_scroll(900.0));
        assert_eq!(tracker.active().as_str(), "about");

        tracker.on_scroll(&layout.at_scroll(1700.0));
        assert_eq!(tracker.active().as_str(), "projects");

        // Past every section: retains "projects".
        tracker.on_scroll(&layout.at_scroll(9000.0));
        assert_eq!(tracker.active().as_str(), "projects");
    }

    #[test]
    fn test_scroll_through_page_boundary_case() {
        // home's bottom sits exactly on the activation line after scrolling;
        // the inclusive rule makes it a candidate and declared order keeps
        // it active over "about".
        let tracker = ActiveSectionTracker::new(portfolio_registry());
        let layout = DocumentLayout::new()
            .with_section("home", 0.0, 800.0)
            .with_section("about", 800.0, 1600.0);

        let at_line = layout.at_scroll(700.0); // home: (-700, 100)
        assert_eq!(tracker.evaluate(&at_line).as_str(), "home");

        // One pixel further: home's bottom is 99, off the line, so about wins.
        let past_line = layout.at_scroll(701.0);
        assert_eq!(tracker.evaluate(&past_line).as_str(), "about");
    }

    #[test]
    fn test_custom_activation_line() {
        let tracker = ActiveSectionTracker::new(registry(&[("a", "A"), ("b", "B")]))
            .with_activation_line(300.0);
        let snapshot = ScrollSnapshot::new(
            0.0,
            vec![rect("a", 0.0, 250.0), rect("b", 250.0, 900.0)],
        );
        assert_eq!(tracker.evaluate(&snapshot).as_str(), "b");
    }

    #[test]
    fn test_malformed_bounds_not_a_candidate() {
        let mut tracker = ActiveSectionTracker::new(portfolio_registry());
        let snapshot = ScrollSnapshot::new(
            0.0,
            vec![rect("home", f64::NAN, f64::NAN), rect("about", 50.0, 500.0)],
        );
        tracker.on_scroll(&snapshot);
        assert_eq!(tracker.active().as_str(), "about");
    }

    #[test]
    fn test_empty_registry_is_permanent_self_loop() {
        let mut tracker = ActiveSectionTracker::new(SectionRegistry::new(Vec::new()).unwrap());
        let snapshot = ScrollSnapshot::new(0.0, vec![rect("home", 0.0, 800.0)]);
        tracker.on_scroll(&snapshot);
        assert_eq!(tracker.active().as_str(), "home");
    }
}
