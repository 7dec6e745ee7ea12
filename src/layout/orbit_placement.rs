// Orbit placement: collision-avoiding radial layout.
//
// For a candidate node diameter d:
// 1. Band: R_max = size/2 - d/2 - padding, R_min = center + d/2 + standoff
// 2. Seed: golden-angle angles, equal-area radii across [R_min, R_max]
// 3. Jitter: per-key angle/radius offsets (see jitter.rs)
// 4. Relax: push close pairs apart, re-clamping radii after every move
// 5. Verify: every pair at least accept_ratio * min_sep apart
//
// Candidates start at the preferred diameter and shrink by a fixed step down
// to the profile minimum. If even the minimum is rejected, that attempt is
// returned as a best-effort layout.
//
// Properties:
// - Deterministic (no randomness, fixed iteration order)
// - Bounded: at most ceil((max - min) / step) + 1 attempts, each with at
//   most relax_passes passes, whatever the config says
// - Never produces NaN or negative radii

use std::f64::consts::FRAC_PI_2;

use tracing::{debug, warn};

use super::spatial_grid::SpatialGrid;
use super::{ContainerSize, LayoutConfig, OrbitItem, OrbitLayout, Placement, PointF};
use super::jitter::Jitter;

/// pi * (3 - sqrt(5))
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Hard cap on shrink-and-retry attempts, whatever the step.
const MAX_ATTEMPTS: usize = 64;

/// Radial band available for item centers.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Band {
    r_min: f64,
    r_max: f64,
}

impl Band {
    fn width(&self) -> f64 {
        self.r_max - self.r_min
    }

    fn mid(&self) -> f64 {
        (self.r_min + self.r_max) / 2.0
    }

    /// Move `p` radially into the band. A point at the center goes straight up.
    fn clamp(&self, p: PointF) -> PointF {
        let r = p.length();
        if r < 1e-9 {
            return PointF::new(0.0, -self.r_min);
        }
        let target = r.clamp(self.r_min, self.r_max);
        PointF::new(p.x * target / r, p.y * target / r)
    }
}

/// Geometry that does not depend on the node diameter.
#[derive(Debug, Copy, Clone)]
struct Frame {
    extent: f64,
    center_radius: f64,
    padding: f64,
}

impl Frame {
    fn band(&self, node_diameter: f64, cfg: &LayoutConfig) -> Band {
        Band {
            r_min: self.center_radius + node_diameter / 2.0 + cfg.center_standoff,
            r_max: self.extent / 2.0 - node_diameter / 2.0 - self.padding,
        }
    }

    /// Band for a best-effort layout: never negative, never inverted.
    fn fallback_band(&self, node_diameter: f64, cfg: &LayoutConfig) -> Band {
        let band = self.band(node_diameter, cfg);
        let r_max = band.r_max.max(0.0);
        Band { r_min: band.r_min.min(r_max), r_max }
    }
}

#[derive(Debug)]
struct Attempt {
    node_diameter: f64,
    band: Band,
    points: Vec<PointF>,
    accepted: bool,
}

/// Lay out `items` around the center of a container of `size`.
pub fn layout_orbit(items: &[OrbitItem], size: ContainerSize, cfg: &LayoutConfig) -> OrbitLayout {
    let size = size.or_fallback(cfg.fallback_extent);
    let breakpoint = cfg.breakpoint(size.width);
    let profile = cfg.profile(breakpoint);

    let extent = size.extent();
    let scale = extent / cfg.design_extent;
    let frame = Frame {
        extent,
        center_radius: profile.center_radius * scale.min(1.0),
        padding: profile.safety_padding + profile.label_padding,
    };

    let min_d = profile.min_node_diameter;
    let preferred = (profile.node_diameter * scale).clamp(min_d, profile.max_node_diameter.max(min_d));

    // A non-positive or non-finite step jumps straight to the minimum.
    let step = if cfg.shrink_step.is_finite() && cfg.shrink_step > 0.0 {
        cfg.shrink_step
    } else {
        f64::INFINITY
    };
    let mut remaining = max_attempts(preferred, min_d, step);

    let mut diameter = preferred;
    let attempt = loop {
        remaining -= 1;
        let last = diameter <= min_d || remaining == 0;
        if let Some(attempt) = try_diameter(items, &frame, diameter, last, cfg) {
            if attempt.accepted {
                break attempt;
            }
            if last {
                warn!(
                    items = items.len(),
                    extent,
                    node_diameter = diameter,
                    "orbit layout infeasible at minimum node size, using best-effort placement"
                );
                break attempt;
            }
        }
        // The final attempt always runs at the minimum.
        diameter = if remaining == 1 { min_d } else { (diameter - step).max(min_d) };
    };

    finish(items, &frame, attempt, breakpoint, cfg)
}

/// Attempts needed to walk from `preferred` down to `min_d`, both ends
/// included, capped at MAX_ATTEMPTS.
fn max_attempts(preferred: f64, min_d: f64, step: f64) -> usize {
    if !(preferred > min_d) {
        return 1;
    }
    let steps = ((preferred - min_d) / step).ceil();
    let steps = if steps.is_finite() { (steps as usize).max(1) } else { MAX_ATTEMPTS };
    steps.saturating_add(1).min(MAX_ATTEMPTS)
}

/// One layout attempt at a fixed node diameter. Returns None when the band is
/// too narrow and `best_effort` is not set.
fn try_diameter(
    items: &[OrbitItem],
    frame: &Frame,
    node_diameter: f64,
    best_effort: bool,
    cfg: &LayoutConfig,
) -> Option<Attempt> {
    let band = frame.band(node_diameter, cfg);
    let band_ok = band.width() >= cfg.min_slack;
    debug!(
        node_diameter,
        r_min = band.r_min,
        r_max = band.r_max,
        band_ok,
        "orbit layout attempt"
    );
    if !band_ok && !best_effort {
        return None;
    }
    let band = if band_ok { band } else { frame.fallback_band(node_diameter, cfg) };

    let min_sep = node_diameter * cfg.hover_growth + cfg.gap;
    let mut points = seed_positions(items, band, cfg);
    relax(&mut points, band, min_sep, cfg.relax_passes);

    let accepted = band_ok && !has_violation(&points, cfg.accept_ratio * min_sep);
    Some(Attempt { node_diameter, band, points, accepted })
}

/// Golden-angle seeding with equal-area radii, perturbed per key.
fn seed_positions(items: &[OrbitItem], band: Band, cfg: &LayoutConfig) -> Vec<PointF> {
    let n = items.len();
    if n == 1 {
        return vec![PointF::polar(band.mid(), -FRAC_PI_2)];
    }

    let inner_sq = band.r_min * band.r_min;
    let outer_sq = band.r_max * band.r_max;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let jitter = Jitter::for_key(&item.key);
            let t = (i as f64 + 0.5) / n as f64;
            let base_radius = (inner_sq + t * (outer_sq - inner_sq)).sqrt();
            let radius = base_radius + jitter.radius * cfg.radius_jitter * band.width();
            let angle = -FRAC_PI_2 + i as f64 * GOLDEN_ANGLE + jitter.angle * cfg.angle_jitter;
            band.clamp(PointF::polar(radius, angle))
        })
        .collect()
}

/// Pairwise relaxation. Every pair closer than `min_sep` is pushed apart
/// symmetrically; both points are re-clamped into the band after the push.
fn relax(points: &mut [PointF], band: Band, min_sep: f64, passes: usize) {
    if points.len() < 2 {
        return;
    }
    for pass in 0..passes {
        // Candidates from the positions at the start of the pass; pairs that
        // only become close mid-pass are picked up by the next one.
        let grid = SpatialGrid::from_points(min_sep, points);
        let candidates = grid.close_pairs(points, min_sep);
        if candidates.is_empty() {
            debug!(pass, "orbit relaxation settled");
            return;
        }

        let mut moved = false;
        for (i, j) in candidates {
            let (a, b) = (points[i], points[j]);
            let dist = a.distance(b);
            if dist >= min_sep {
                continue;
            }
            let (ux, uy) = if dist > 1e-9 {
                ((a.x - b.x) / dist, (a.y - b.y) / dist)
            } else {
                // Coincident: split along the tangent at `a`.
                let t = if a.length() > 1e-9 { a.angle() + FRAC_PI_2 } else { 0.0 };
                (t.cos(), t.sin())
            };
            let push = (min_sep - dist) / 2.0;
            points[i] = band.clamp(PointF::new(a.x + ux * push, a.y + uy * push));
            points[j] = band.clamp(PointF::new(b.x - ux * push, b.y - uy * push));
            moved |= points[i] != a || points[j] != b;
        }
        if !moved {
            return;
        }
    }
}

fn has_violation(points: &[PointF], threshold: f64) -> bool {
    let grid = SpatialGrid::from_points(threshold, points);
    !grid.close_pairs(points, threshold).is_empty()
}

fn finish(
    items: &[OrbitItem],
    frame: &Frame,
    attempt: Attempt,
    breakpoint: super::Breakpoint,
    cfg: &LayoutConfig,
) -> OrbitLayout {
    let positions = items
        .iter()
        .zip(&attempt.points)
        .map(|(item, p)| Placement { id: item.id.clone(), x: p.x, y: p.y, angle: p.angle() })
        .collect();

    OrbitLayout {
        positions,
        node_diameter: attempt.node_diameter,
        center_diameter: frame.center_radius * 2.0,
        ring_radii: ring_radii(attempt.band, cfg.ring_count),
        breakpoint,
        feasible: attempt.accepted,
    }
}

/// `count` radii evenly spaced from the inner to the outer band edge.
fn ring_radii(band: Band, count: usize) -> Vec<f64> {
    let count = count.max(2);
    (0..count)
        .map(|k| band.r_min + band.width() * k as f64 / (count - 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Breakpoint;
    use proptest::prelude::*;

    fn up() -> PointF {
        PointF::polar(1.0, -FRAC_PI_2)
    }

    fn items(n: usize) -> Vec<OrbitItem> {
        (0..n).map(|i| OrbitItem::new(format!("item-{i}"))).collect()
    }

    fn assert_contained(layout: &OrbitLayout, size: ContainerSize) {
        let half = size.extent() / 2.0;
        for p in &layout.positions {
            assert!(p.x.is_finite() && p.y.is_finite(), "{} is not finite", p.id);
            assert!(
                p.radius() + layout.node_diameter / 2.0 <= half + 1e-9,
                "{} escapes the container: r={} d={}",
                p.id,
                p.radius(),
                layout.node_diameter
            );
        }
    }

    #[test]
    fn test_twelve_items_wide_container() {
        let cfg = LayoutConfig::default();
        let size = ContainerSize::new(700.0, 700.0);
        let layout = layout_orbit(&items(12), size, &cfg);

        assert_eq!(layout.breakpoint, Breakpoint::Wide);
        assert!(layout.feasible);
        assert_eq!(layout.positions.len(), 12);
        assert!(layout.node_diameter >= cfg.wide.min_node_diameter);
        assert!(layout.node_diameter <= cfg.wide.max_node_diameter);
        let min_dist = layout.min_pair_distance().unwrap();
        assert!(min_dist >= layout.node_diameter + cfg.gap, "min distance {min_dist}");
        assert_contained(&layout, size);

        let again = layout_orbit(&items(12), size, &cfg);
        assert_eq!(layout, again);
        assert_eq!(
            serde_json::to_string(&layout).unwrap(),
            serde_json::to_string(&again).unwrap()
        );
    }

    #[test]
    fn test_six_items_do_not_overlap() {
        let cfg = LayoutConfig::default();
        let layout = layout_orbit(&items(6), ContainerSize::new(700.0, 700.0), &cfg);
        assert!(layout.min_pair_distance().unwrap() >= layout.node_diameter);
    }

    #[test]
    fn test_crowded_layout_degrades_to_minimum() {
        let cfg = LayoutConfig::default();
        let size = ContainerSize::new(200.0, 200.0);
        let layout = layout_orbit(&items(200), size, &cfg);

        assert!(!layout.feasible);
        assert_eq!(layout.node_diameter, cfg.narrow.min_node_diameter);
        assert_eq!(layout.positions.len(), 200);
        assert_contained(&layout, size);
        assert!(layout.ring_radii.iter().all(|r| r.is_finite() && *r >= 0.0));
    }

    #[test]
    fn test_shrinks_before_giving_up() {
        let cfg = LayoutConfig::default();
        // Preferred diameter for 500px is 45; 70 items do not fit at that size.
        let size = ContainerSize::new(500.0, 500.0);
        let layout = layout_orbit(&items(70), size, &cfg);
        assert!(layout.node_diameter < 45.0);
        assert!(layout.node_diameter >= cfg.narrow.min_node_diameter);
        assert_contained(&layout, size);
    }

    #[test]
    fn test_empty_items() {
        let cfg = LayoutConfig::default();
        let layout = layout_orbit(&[], ContainerSize::new(400.0, 400.0), &cfg);
        assert!(layout.positions.is_empty());
        assert!(layout.feasible);
        assert_eq!(layout.ring_radii.len(), cfg.ring_count);
        assert!(layout.ring_radii.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_item_is_straight_up_at_mid_radius() {
        let cfg = LayoutConfig::default();
        let size = ContainerSize::new(400.0, 400.0);
        let layout = layout_orbit(&items(1), size, &cfg);
        assert_eq!(layout.positions.len(), 1);

        let p = &layout.positions[0];
        let rings = &layout.ring_radii;
        let mid = (rings[0] + rings[rings.len() - 1]) / 2.0;
        assert!((p.radius() - mid).abs() < 1e-9);
        let dir = PointF::new(p.x / p.radius(), p.y / p.radius());
        assert!(dir.distance(up()) < 1e-9);
        assert_contained(&layout, size);
    }

    #[test]
    fn test_unmeasured_container_uses_fallback() {
        let cfg = LayoutConfig::default();
        let unmeasured = layout_orbit(&items(5), ContainerSize::new(0.0, 0.0), &cfg);
        let fallback = layout_orbit(&items(5), ContainerSize::new(400.0, 400.0), &cfg);
        assert_eq!(unmeasured, fallback);
    }

    #[test]
    fn test_tiny_container_has_no_nan() {
        let cfg = LayoutConfig::default();
        let layout = layout_orbit(&items(8), ContainerSize::new(30.0, 30.0), &cfg);
        assert!(!layout.feasible);
        assert_eq!(layout.node_diameter, cfg.narrow.min_node_diameter);
        for p in &layout.positions {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
        assert!(layout.ring_radii.iter().all(|r| r.is_finite() && *r >= 0.0));
    }

    #[test]
    fn test_radii_scale_with_container() {
        let cfg = LayoutConfig::default();
        let small = layout_orbit(&items(10), ContainerSize::new(700.0, 700.0), &cfg);
        let large = layout_orbit(&items(10), ContainerSize::new(1400.0, 1400.0), &cfg);
        // Both sizes are past the max node diameter, so only the extent differs.
        assert_eq!(small.node_diameter, large.node_diameter);

        // Outer ring sits a fixed margin inside the container edge.
        let margin = small.node_diameter / 2.0 + cfg.wide.safety_padding + cfg.wide.label_padding;
        let outer = |l: &OrbitLayout| l.ring_radii[l.ring_radii.len() - 1];
        assert!((outer(&small) + margin - 350.0).abs() < 1e-9);
        assert!((outer(&large) + margin - 700.0).abs() < 1e-9);
        let ratio = outer(&large) / outer(&small);
        assert!(ratio > 1.9 && ratio < 2.3, "outer ring ratio {ratio}");

        let mean = |l: &OrbitLayout| l.positions.iter().map(|p| p.radius()).sum::<f64>() / l.positions.len() as f64;
        let mean_ratio = mean(&large) / mean(&small);
        assert!(mean_ratio > 1.6 && mean_ratio < 2.4, "mean radius ratio {mean_ratio}");
    }

    #[test]
    fn test_degenerate_shrink_step_still_terminates() {
        let size = ContainerSize::new(500.0, 500.0);
        for step in [0.0, -3.0, f64::NAN, f64::INFINITY, 1e-300] {
            let cfg = LayoutConfig { shrink_step: step, ..LayoutConfig::default() };
            let layout = layout_orbit(&items(200), size, &cfg);
            assert_eq!(layout.positions.len(), 200);
            assert_eq!(layout.node_diameter, cfg.narrow.min_node_diameter, "step {step}");
            assert!(!layout.feasible);
            assert_contained(&layout, size);
        }
    }

    #[test]
    fn test_max_attempts() {
        assert_eq!(max_attempts(45.0, 24.0, 2.0), 12);
        assert_eq!(max_attempts(44.0, 24.0, 2.0), 11);
        assert_eq!(max_attempts(24.0, 24.0, 2.0), 1);
        assert_eq!(max_attempts(45.0, 24.0, f64::INFINITY), 2);
        assert_eq!(max_attempts(45.0, 24.0, 1e-300), MAX_ATTEMPTS);
    }

    #[test]
    fn test_jitter_follows_key_not_order() {
        let cfg = LayoutConfig::default();
        let size = ContainerSize::new(700.0, 700.0);
        let a = layout_orbit(&[OrbitItem::with_key("x", "alpha"), OrbitItem::with_key("y", "beta")], size, &cfg);
        let b = layout_orbit(&[OrbitItem::with_key("x", "gamma"), OrbitItem::with_key("y", "beta")], size, &cfg);
        assert_ne!(a.positions[0], b.positions[0]);
    }

    #[test]
    fn test_band_clamp() {
        let band = Band { r_min: 50.0, r_max: 100.0 };
        assert_eq!(band.clamp(PointF::new(0.0, 0.0)), PointF::new(0.0, -50.0));
        assert!((band.clamp(PointF::new(10.0, 0.0)).x - 50.0).abs() < 1e-12);
        assert!((band.clamp(PointF::new(0.0, 300.0)).y - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_relax_separates_coincident_points() {
        let band = Band { r_min: 50.0, r_max: 150.0 };
        let mut points = vec![PointF::new(0.0, -100.0), PointF::new(0.0, -100.0)];
        relax(&mut points, band, 40.0, 10);
        assert!(points[0].distance(points[1]) >= 40.0 - 1e-6);
    }

    #[test]
    fn test_ring_radii_span_band() {
        let rings = ring_radii(Band { r_min: 10.0, r_max: 30.0 }, 3);
        assert_eq!(rings, vec![10.0, 20.0, 30.0]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_layout_is_deterministic_and_contained(
            n in 0usize..40,
            width in 120.0f64..1200.0,
            height in 120.0f64..1200.0,
        ) {
            let cfg = LayoutConfig::default();
            let size = ContainerSize::new(width, height);
            let first = layout_orbit(&items(n), size, &cfg);
            let second = layout_orbit(&items(n), size, &cfg);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.positions.len(), n);

            let half = size.extent() / 2.0;
            for p in &first.positions {
                prop_assert!(p.x.is_finite() && p.y.is_finite());
                prop_assert!(p.radius() + first.node_diameter / 2.0 <= half + 1e-9);
            }
            if first.feasible {
                if let Some(d) = first.min_pair_distance() {
                    prop_assert!(d >= first.node_diameter);
                }
            }
        }
    }
}
