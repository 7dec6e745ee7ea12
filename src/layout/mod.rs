// Orbit layout for the product diagram.
//
// Places N product nodes in an annulus around a fixed center node.
//
// Goals:
// - Deterministic: same keys + same container size => bit-identical output
// - Organic: golden-angle seeding plus per-key jitter instead of rigid rings
// - No overlap in the feasible regime, including hover growth
// - Never fails: degenerate sizes are clamped, crowded layouts shrink the
//   nodes and finally degrade to a best-effort arrangement
//
// Submodules:
// - config: size table per breakpoint and tuning constants
// - jitter: FNV-1a based per-key offsets
// - spatial_grid: neighbour queries for relaxation and verification
// - orbit_placement: seeding, relaxation, shrink-and-retry
// - observer: cached, size-driven recomputation with subscribers

use serde::{Deserialize, Serialize};

mod config;
mod jitter;
mod observer;
mod orbit_placement;
mod spatial_grid;

pub use config::{Breakpoint, LayoutConfig, SizeProfile};
pub use jitter::{fnv1a, unit_hash, Jitter};
pub use observer::{OrbitSession, SubscriptionId};
pub use orbit_placement::layout_orbit;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn polar(radius: f64, angle: f64) -> Self {
        Self { x: radius * angle.cos(), y: radius * angle.sin() }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn distance(&self, other: PointF) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An item to place. `key` drives the jitter and must be stable across renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrbitItem {
    pub id: String,
    pub key: String,
}

impl OrbitItem {
    /// Item whose jitter key is its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { key: id.clone(), id }
    }

    pub fn with_key(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self { id: id.into(), key: key.into() }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replace unmeasured (zero, negative or non-finite) extents with `fallback`.
    pub fn or_fallback(self, fallback: f64) -> Self {
        let fix = |v: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self { width: fix(self.width), height: fix(self.height) }
    }

    /// Side of the square working area.
    pub fn extent(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// One placed item: offset from the container center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Direction from the center, in radians (y grows downwards).
    pub angle: f64,
}

impl Placement {
    pub fn point(&self) -> PointF {
        PointF::new(self.x, self.y)
    }

    pub fn radius(&self) -> f64 {
        self.point().length()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    /// Text extends to the right of the anchor.
    Start,
    /// Text extends to the left of the anchor.
    End,
}

/// Where to draw a node's label, relative to the node center.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub align: LabelAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitLayout {
    /// One entry per input item, in input order.
    pub positions: Vec<Placement>,
    /// Shared diameter of every item node in this layout.
    pub node_diameter: f64,
    pub center_diameter: f64,
    /// Decorative guide rings, innermost first.
    pub ring_radii: Vec<f64>,
    pub breakpoint: Breakpoint,
    /// False when the layout is a best-effort fallback that may overlap.
    pub feasible: bool,
}

impl OrbitLayout {
    /// Label anchor for a placement: pushed outwards along its angle, and
    /// aligned away from the center.
    pub fn label_anchor(&self, placement: &Placement, cfg: &LayoutConfig) -> LabelAnchor {
        let distance = self.node_diameter / 2.0 + cfg.label_offset;
        let anchor = PointF::polar(distance, placement.angle);
        let right_side = placement.angle > -std::f64::consts::FRAC_PI_2
            && placement.angle < std::f64::consts::FRAC_PI_2;
        LabelAnchor {
            x: anchor.x,
            y: anchor.y,
            align: if right_side { LabelAlign::Start } else { LabelAlign::End },
        }
    }

    /// Smallest center-to-center distance between any two placements.
    pub fn min_pair_distance(&self) -> Option<f64> {
        let mut best: Option<f64> = None;
        for (i, a) in self.positions.iter().enumerate() {
            for b in &self.positions[i + 1..] {
                let d = a.point().distance(b.point());
                best = Some(best.map_or(d, |m| m.min(d)));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_fallback() {
        let size = ContainerSize::new(0.0, f64::NAN).or_fallback(400.0);
        assert_eq!(size, ContainerSize::new(400.0, 400.0));
        assert_eq!(ContainerSize::new(700.0, 320.0).extent(), 320.0);
    }

    #[test]
    fn test_label_anchor_sides() {
        let cfg = LayoutConfig::default();
        let layout = OrbitLayout {
            positions: vec![],
            node_diameter: 40.0,
            center_diameter: 80.0,
            ring_radii: vec![],
            breakpoint: Breakpoint::Narrow,
            feasible: true,
        };
        let right = Placement { id: "r".into(), x: 100.0, y: 0.0, angle: 0.0 };
        let left = Placement { id: "l".into(), x: -100.0, y: 0.0, angle: std::f64::consts::PI };
        let up = Placement { id: "u".into(), x: 0.0, y: -100.0, angle: -std::f64::consts::FRAC_PI_2 };

        let a = layout.label_anchor(&right, &cfg);
        assert_eq!(a.align, LabelAlign::Start);
        assert!((a.x - 38.0).abs() < 1e-9);
        assert_eq!(layout.label_anchor(&left, &cfg).align, LabelAlign::End);
        // Straight up is not strictly on the right half
        assert_eq!(layout.label_anchor(&up, &cfg).align, LabelAlign::End);
    }

    #[test]
    fn test_item_key_defaults_to_id() {
        let item = OrbitItem::new("kiosk");
        assert_eq!(item.key, "kiosk");
        assert_eq!(OrbitItem::with_key("a", "b").key, "b");
    }
}
