// Read-only content catalog.
//
// The catalog is loaded once from JSON and never mutated. Every query takes
// the current FilterState and returns borrowed views in catalog order, so the
// same filter always yields the same sequence.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::OrbitItem;
use crate::state::FilterState;

use super::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanCatalog {
    pub personas: Vec<Persona>,
    pub touchpoints: Vec<Touchpoint>,
    pub products: Vec<Product>,
    /// Product drawn as the fixed center node instead of an orbiting item.
    pub center_product: String,
    pub orbit_rings: Vec<OrbitRingInfo>,
    pub bottlenecks: Vec<Bottleneck>,
    pub roadmap_phases: Vec<RoadmapPhase>,
    pub metrics: Vec<Metric>,
    pub metric_categories: Vec<String>,
    pub experiments: Vec<Experiment>,
    pub experiment_categories: Vec<String>,
    pub data_needs: Vec<DataNeed>,
    pub assumptions: Vec<Assumption>,
    pub summary_pitch: String,
    pub share_text: String,
    pub full_plan_text: String,
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self {
            personas: Vec::new(),
            touchpoints: Vec::new(),
            products: Vec::new(),
            center_product: "starship-360".to_string(),
            orbit_rings: Vec::new(),
            bottlenecks: Vec::new(),
            roadmap_phases: Vec::new(),
            metrics: Vec::new(),
            metric_categories: Vec::new(),
            experiments: Vec::new(),
            experiment_categories: Vec::new(),
            data_needs: Vec::new(),
            assumptions: Vec::new(),
            summary_pitch: String::new(),
            share_text: String::new(),
            full_plan_text: String::new(),
        }
    }
}

/// Items of one category, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a, T> {
    pub category: &'a str,
    pub items: Vec<&'a T>,
}

impl PlanCatalog {
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(Error::Catalog)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn filtered_products(&self, filter: &FilterState) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(&p.personas, &p.touchpoints))
            .collect()
    }

    pub fn filtered_bottlenecks(&self, filter: &FilterState) -> Vec<&Bottleneck> {
        self.bottlenecks
            .iter()
            .filter(|b| filter.matches(&b.personas, &b.touchpoints))
            .collect()
    }

    pub fn filtered_metrics(&self, filter: &FilterState) -> Vec<&Metric> {
        self.metrics
            .iter()
            .filter(|m| filter.matches(&m.personas, &m.touchpoints_influencing))
            .collect()
    }

    pub fn filtered_experiments(&self, filter: &FilterState) -> Vec<&Experiment> {
        self.experiments
            .iter()
            .filter(|e| filter.matches(&e.personas, &e.primary_touchpoints))
            .collect()
    }

    /// Items for the orbit diagram: matching products except the center one,
    /// ordered by id then name.
    pub fn orbit_items(&self, filter: &FilterState) -> Vec<OrbitItem> {
        let mut products: Vec<&Product> = self
            .filtered_products(filter)
            .into_iter()
            .filter(|p| p.id != self.center_product)
            .collect();
        products.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
        products.into_iter().map(|p| OrbitItem::new(p.id.clone())).collect()
    }

    pub fn metrics_by_category(&self, filter: &FilterState) -> Vec<CategoryGroup<'_, Metric>> {
        group_by_category(&self.metric_categories, self.filtered_metrics(filter), |m| m.category.as_str())
    }

    pub fn experiments_by_category(&self, filter: &FilterState) -> Vec<CategoryGroup<'_, Experiment>> {
        group_by_category(&self.experiment_categories, self.filtered_experiments(filter), |e| e.category.as_str())
    }

    pub fn assumptions_by_priority(&self, priority: Priority) -> Vec<&Assumption> {
        self.assumptions.iter().filter(|a| a.priority == priority).collect()
    }

    /// Experiments referenced by a bottleneck. References are written with a
    /// dash (`exp-3`) while ids are not (`exp3-pricing`), so the first dash of
    /// the reference is dropped before the substring match.
    pub fn related_experiments(&self, bottleneck: &Bottleneck) -> Vec<&Experiment> {
        let refs: Vec<String> = bottleneck
            .related_experiments
            .iter()
            .map(|r| r.replacen('-', "", 1))
            .collect();
        self.experiments
            .iter()
            .filter(|e| refs.iter().any(|r| e.id.contains(r.as_str())))
            .collect()
    }

    pub fn related_phases(&self, bottleneck: &Bottleneck) -> Vec<&RoadmapPhase> {
        self.roadmap_phases
            .iter()
            .filter(|p| bottleneck.roadmap_phases.contains(&p.id))
            .collect()
    }
}

fn group_by_category<'a, T>(
    categories: &'a [String],
    items: Vec<&'a T>,
    category_of: impl Fn(&T) -> &str,
) -> Vec<CategoryGroup<'a, T>> {
    categories
        .iter()
        .map(|category| CategoryGroup {
            category: category.as_str(),
            items: items.iter().copied().filter(|item| category_of(*item) == category.as_str()).collect(),
        })
        .filter(|group| !group.items.is_empty())
        .collect()
}
