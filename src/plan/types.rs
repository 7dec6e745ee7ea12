use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    /// Style token for the persona tag.
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touchpoint {
    pub id: String,
    pub name: String,
}

/// Which orbit a product belongs to (legend and node colour only).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitRing {
    Demand,
    Merchant,
    Fulfillment,
    Control,
    Enablers,
    Adjacent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitRingInfo {
    pub id: OrbitRing,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub orbit_ring: OrbitRing,
    #[serde(default)]
    pub touchpoints: Vec<String>,
    #[serde(default)]
    pub personas: Vec<String>,
    #[serde(default)]
    pub pain_tags: Vec<String>,
    #[serde(default)]
    pub icon: String,
}

impl Product {
    /// Name shown next to an orbit node, without the suite prefixes.
    pub fn short_name(&self) -> String {
        self.name.replacen("Starship ", "", 1).replacen("Campus ", "", 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bottleneck {
    pub id: String,
    pub title: String,
    pub pain_scenario: String,
    pub metrics_impacted: Vec<String>,
    pub proposed_levers: Vec<String>,
    pub products: Vec<String>,
    pub touchpoints: Vec<String>,
    pub personas: Vec<String>,
    pub roadmap_phases: Vec<String>,
    pub related_experiments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapPhase {
    pub id: String,
    pub label: String,
    pub date_range: String,
    pub goals: Vec<String>,
    pub deliverables: Vec<String>,
    pub example_scenarios: Vec<String>,
    pub kpis_watched: Vec<String>,
    pub touchpoints_affected: Vec<String>,
    pub full_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metric {
    pub id: String,
    pub name: String,
    pub category: String,
    pub definition: String,
    pub why_it_matters: String,
    pub pains_addressed: Vec<String>,
    pub touchpoints_influencing: Vec<String>,
    pub personas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experiment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub hypothesis: String,
    pub expected_impact: String,
    pub risks: Vec<String>,
    pub required_data: Vec<String>,
    pub success_metric: String,
    pub primary_touchpoints: Vec<String>,
    pub personas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataNeed {
    pub id: String,
    pub item: String,
    pub why_needed: String,
    pub what_without_it: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumption {
    pub id: String,
    pub assumption: String,
    #[serde(default)]
    pub risk_if_wrong: String,
    #[serde(default)]
    pub validation_approach: String,
    pub priority: Priority,
}
