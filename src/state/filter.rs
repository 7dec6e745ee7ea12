//! Persona / touchpoint filter.

use serde::{Deserialize, Serialize};

/// Selected persona and touchpoint ids, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub personas: Vec<String>,
    pub touchpoints: Vec<String>,
}

fn toggle(list: &mut Vec<String>, id: &str) {
    match list.iter().position(|x| x == id) {
        Some(idx) => {
            list.remove(idx);
        }
        None => list.push(id.to_string()),
    }
}

impl FilterState {
    pub fn toggle_persona(&mut self, id: &str) {
        toggle(&mut self.personas, id);
    }

    pub fn toggle_touchpoint(&mut self, id: &str) {
        toggle(&mut self.touchpoints, id);
    }

    pub fn clear(&mut self) {
        self.personas.clear();
        self.touchpoints.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.personas.is_empty() || !self.touchpoints.is_empty()
    }

    /// An item matches when it shares at least one selected persona (if any
    /// are selected) and at least one selected touchpoint (if any are selected).
    pub fn matches<P, T>(&self, item_personas: &[P], item_touchpoints: &[T]) -> bool
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        let persona_match = self.personas.is_empty()
            || self.personas.iter().any(|p| item_personas.iter().any(|ip| ip.as_ref() == p));
        let touchpoint_match = self.touchpoints.is_empty()
            || self.touchpoints.iter().any(|t| item_touchpoints.iter().any(|it| it.as_ref() == t));
        persona_match && touchpoint_match
    }
}
