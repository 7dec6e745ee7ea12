//! Scroll-spy navigation.
//!
//! The host measures each section's viewport-relative top on scroll and
//! passes the numbers in; everything derived from them is computed here.

use serde::{Deserialize, Serialize};

use crate::state::DEFAULT_SECTION;

/// A section counts as active once its top crosses this line (below the fixed nav bar).
pub const ACTIVE_THRESHOLD: f64 = 100.0;
/// Scroll offset past which the back-to-top button shows.
pub const BACK_TO_TOP_OFFSET: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { id: "intro", label: "Intro" },
    NavItem { id: "overview", label: "Overview" },
    NavItem { id: "products", label: "Products" },
    NavItem { id: "bottlenecks", label: "Bottlenecks" },
    NavItem { id: "roadmap", label: "Roadmap" },
    NavItem { id: "metrics", label: "Metrics" },
    NavItem { id: "experiments", label: "Experiments" },
    NavItem { id: "data-needs", label: "Data I Need" },
    NavItem { id: "assumptions", label: "Assumptions & Risks" },
    NavItem { id: "full-plan", label: "Full Plan" },
];

pub fn default_nav_items() -> &'static [NavItem] {
    NAV_ITEMS
}

/// Viewport-relative top of one section; `None` if the element is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMetrics {
    pub id: String,
    pub top: Option<f64>,
}

/// First present section whose top is at or above `threshold` while the next
/// section's top is still below it.
pub fn active_section(sections: &[SectionMetrics], threshold: f64) -> Option<&str> {
    sections.iter().enumerate().find_map(|(i, s)| {
        let top = s.top?;
        let next_top = sections
            .get(i + 1)
            .map(|n| n.top.unwrap_or(f64::INFINITY))
            .unwrap_or(f64::INFINITY);
        (top <= threshold && next_top > threshold).then_some(s.id.as_str())
    })
}

/// Percentage of the document scrolled, clamped to [0, 100].
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !(scrollable > 0.0) || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollState {
    pub progress: f64,
    pub show_back_to_top: bool,
    pub active: String,
}

/// Remembers the last active section so it sticks while no section qualifies.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    active: String,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self { active: DEFAULT_SECTION.to_string() }
    }
}

impl ScrollSpy {
    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn update(
        &mut self,
        scroll_top: f64,
        document_height: f64,
        viewport_height: f64,
        sections: &[SectionMetrics],
    ) -> ScrollState {
        if let Some(id) = active_section(sections, ACTIVE_THRESHOLD) {
            if id != self.active {
                self.active = id.to_string();
            }
        }
        ScrollState {
            progress: scroll_progress(scroll_top, document_height, viewport_height),
            show_back_to_top: scroll_top > BACK_TO_TOP_OFFSET,
            active: self.active.clone(),
        }
    }
}
