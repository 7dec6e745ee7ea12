// Size table and tuning constants for the orbit layout.
//
// The table has one SizeProfile per breakpoint. Everything else is shared.
// Distances are in the same unit as the container size (CSS pixels in the
// browser).

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Narrow,
    Wide,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeProfile {
    /// Radius of the center node at the design extent (never scaled up).
    pub center_radius: f64,
    /// Preferred node diameter at the design extent.
    pub node_diameter: f64,
    /// Floor for both scaling and shrink-and-retry.
    pub min_node_diameter: f64,
    pub max_node_diameter: f64,
    /// Margin kept between a node and the container edge.
    pub safety_padding: f64,
    /// Room reserved outside the outermost node for its label.
    pub label_padding: f64,
}

impl SizeProfile {
    pub fn narrow() -> Self {
        Self {
            center_radius: 40.0,
            node_diameter: 36.0,
            min_node_diameter: 24.0,
            max_node_diameter: 48.0,
            safety_padding: 6.0,
            label_padding: 18.0,
        }
    }

    pub fn wide() -> Self {
        Self {
            center_radius: 48.0,
            node_diameter: 44.0,
            min_node_diameter: 28.0,
            max_node_diameter: 56.0,
            safety_padding: 6.0,
            label_padding: 22.0,
        }
    }
}

/// A profile as written in a config file: any field may be left out.
#[derive(Debug, Deserialize)]
struct ProfileOverride {
    center_radius: Option<f64>,
    node_diameter: Option<f64>,
    min_node_diameter: Option<f64>,
    max_node_diameter: Option<f64>,
    safety_padding: Option<f64>,
    label_padding: Option<f64>,
}

impl ProfileOverride {
    fn apply(self, base: SizeProfile) -> SizeProfile {
        SizeProfile {
            center_radius: self.center_radius.unwrap_or(base.center_radius),
            node_diameter: self.node_diameter.unwrap_or(base.node_diameter),
            min_node_diameter: self.min_node_diameter.unwrap_or(base.min_node_diameter),
            max_node_diameter: self.max_node_diameter.unwrap_or(base.max_node_diameter),
            safety_padding: self.safety_padding.unwrap_or(base.safety_padding),
            label_padding: self.label_padding.unwrap_or(base.label_padding),
        }
    }
}

fn narrow_profile<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SizeProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.apply(SizeProfile::narrow()))
}

fn wide_profile<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SizeProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.apply(SizeProfile::wide()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Missing fields are filled from `SizeProfile::narrow()`.
    #[serde(deserialize_with = "narrow_profile")]
    pub narrow: SizeProfile,
    /// Missing fields are filled from `SizeProfile::wide()`.
    #[serde(deserialize_with = "wide_profile")]
    pub wide: SizeProfile,
    /// Containers at least this wide use the wide profile.
    pub wide_min_width: f64,
    /// Used for any extent that is zero, negative or not finite (not yet measured).
    pub fallback_extent: f64,
    /// Extent the size table was designed for; sizes scale against it.
    pub design_extent: f64,
    /// Gap between the center node and the innermost item.
    pub center_standoff: f64,
    /// Extra spacing between neighbouring items.
    pub gap: f64,
    /// Nodes grow by this factor on hover; separation accounts for it.
    pub hover_growth: f64,
    /// Minimum radial band width for a layout to be attempted.
    pub min_slack: f64,
    /// Fraction of the required separation a relaxed layout must reach.
    pub accept_ratio: f64,
    /// Node diameter decrement per retry.
    pub shrink_step: f64,
    /// Upper bound on relaxation passes per attempt.
    pub relax_passes: usize,
    /// Full width of the angular jitter, in radians.
    pub angle_jitter: f64,
    /// Full width of the radial jitter, as a fraction of the band width.
    pub radius_jitter: f64,
    /// Number of decorative guide rings.
    pub ring_count: usize,
    /// Distance between a node's edge and its label anchor.
    pub label_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            narrow: SizeProfile::narrow(),
            wide: SizeProfile::wide(),
            wide_min_width: 600.0,
            fallback_extent: 400.0,
            design_extent: 400.0,
            center_standoff: 12.0,
            gap: 8.0,
            hover_growth: 1.15,
            min_slack: 8.0,
            accept_ratio: 0.92,
            shrink_step: 2.0,
            relax_passes: 24,
            angle_jitter: 0.3,
            radius_jitter: 0.15,
            ring_count: 3,
            label_offset: 18.0,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) config; missing fields take their defaults.
    pub fn from_json(input: &str) -> Result<Self> {
        let cfg: LayoutConfig = serde_json::from_str(input).map_err(Error::ConfigParse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn breakpoint(&self, width: f64) -> Breakpoint {
        if width >= self.wide_min_width {
            Breakpoint::Wide
        } else {
            Breakpoint::Narrow
        }
    }

    pub fn profile(&self, breakpoint: Breakpoint) -> &SizeProfile {
        match breakpoint {
            Breakpoint::Narrow => &self.narrow,
            Breakpoint::Wide => &self.wide,
        }
    }

    /// Reject configs that would break termination or produce degenerate output.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [("narrow", &self.narrow), ("wide", &self.wide)] {
            let finite = [
                p.center_radius,
                p.node_diameter,
                p.min_node_diameter,
                p.max_node_diameter,
                p.safety_padding,
                p.label_padding,
            ]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
            if !finite {
                return Err(invalid(format!("{name}: sizes must be finite and non-negative")));
            }
            if p.min_node_diameter <= 0.0 {
                return Err(invalid(format!("{name}: min_node_diameter must be positive")));
            }
            if p.min_node_diameter > p.max_node_diameter {
                return Err(invalid(format!(
                    "{name}: min_node_diameter ({}) exceeds max_node_diameter ({})",
                    p.min_node_diameter, p.max_node_diameter
                )));
            }
        }
        if !(self.fallback_extent.is_finite() && self.fallback_extent > 0.0) {
            return Err(invalid("fallback_extent must be positive"));
        }
        if !(self.design_extent.is_finite() && self.design_extent > 0.0) {
            return Err(invalid("design_extent must be positive"));
        }
        if !(self.shrink_step.is_finite() && self.shrink_step > 0.0) {
            return Err(invalid("shrink_step must be positive"));
        }
        if !(self.accept_ratio > 0.0 && self.accept_ratio <= 1.0) {
            return Err(invalid("accept_ratio must be in (0, 1]"));
        }
        if !(self.hover_growth.is_finite() && self.hover_growth >= 1.0) {
            return Err(invalid("hover_growth must be at least 1"));
        }
        let spacing = [
            self.wide_min_width,
            self.center_standoff,
            self.gap,
            self.min_slack,
            self.angle_jitter,
            self.radius_jitter,
            self.label_offset,
        ];
        if !spacing.iter().all(|v| v.is_finite() && *v >= 0.0) {
            return Err(invalid("spacing constants must be finite and non-negative"));
        }
        if self.ring_count < 2 {
            return Err(invalid("ring_count must be at least 2"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_breakpoint_threshold() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.breakpoint(599.9), Breakpoint::Narrow);
        assert_eq!(cfg.breakpoint(600.0), Breakpoint::Wide);
        assert_eq!(cfg.profile(Breakpoint::Wide).node_diameter, 44.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = LayoutConfig::from_json(r#"{ "gap": 12, "wide": { "max_node_diameter": 64 } }"#).unwrap();
        assert_eq!(cfg.gap, 12.0);
        assert_eq!(cfg.wide.max_node_diameter, 64.0);
        assert_eq!(cfg.wide.min_node_diameter, 28.0);
        assert_eq!(cfg.relax_passes, 24);
    }

    #[test]
    fn test_partial_profile_merges_onto_its_own_breakpoint() {
        let cfg = LayoutConfig::from_json(r#"{ "wide": { "max_node_diameter": 64 }, "narrow": { "label_padding": 10 } }"#)
            .unwrap();
        assert_eq!(cfg.wide, SizeProfile { max_node_diameter: 64.0, ..SizeProfile::wide() });
        assert_eq!(cfg.narrow, SizeProfile { label_padding: 10.0, ..SizeProfile::narrow() });
    }

    #[test]
    fn test_empty_profile_object_is_the_default_profile() {
        let cfg = LayoutConfig::from_json(r#"{ "wide": {} }"#).unwrap();
        assert_eq!(cfg.wide, SizeProfile::wide());
        assert_eq!(cfg.narrow, SizeProfile::narrow());
    }

    #[test]
    fn test_rejects_inverted_node_bounds() {
        let err = LayoutConfig::from_json(r#"{ "narrow": { "min_node_diameter": 60, "max_node_diameter": 40 } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_shrink_step() {
        let cfg = LayoutConfig { shrink_step: 0.0, ..LayoutConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = LayoutConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
