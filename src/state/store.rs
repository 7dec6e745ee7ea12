//! Single UI store with reducer-style transitions.
//!
//! Everything the page toggles (filters, expanded accordions, the active nav
//! section, the mobile menu, the product detail panel) lives here and only
//! changes through [`reduce`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::filter::FilterState;

pub const DEFAULT_SECTION: &str = "intro";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiState {
    pub filters: FilterState,
    pub expanded: BTreeSet<String>,
    pub active_section: String,
    pub menu_open: bool,
    pub selected_product: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            expanded: BTreeSet::new(),
            active_section: DEFAULT_SECTION.to_string(),
            menu_open: false,
            selected_product: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum UiAction {
    TogglePersona(String),
    ToggleTouchpoint(String),
    ClearFilters,
    ToggleExpanded(String),
    CollapseAll,
    SetActiveSection(String),
    ToggleMenu,
    /// Jump to a section; closes the mobile menu.
    NavigateTo(String),
    SelectProduct(String),
    CloseProduct,
}

impl UiState {
    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::TogglePersona(id) => self.filters.toggle_persona(&id),
            UiAction::ToggleTouchpoint(id) => self.filters.toggle_touchpoint(&id),
            UiAction::ClearFilters => self.filters.clear(),
            UiAction::ToggleExpanded(id) => {
                if !self.expanded.remove(&id) {
                    self.expanded.insert(id);
                }
            }
            UiAction::CollapseAll => self.expanded.clear(),
            UiAction::SetActiveSection(id) => self.active_section = id,
            UiAction::ToggleMenu => self.menu_open = !self.menu_open,
            UiAction::NavigateTo(id) => {
                self.active_section = id;
                self.menu_open = false;
            }
            UiAction::SelectProduct(id) => self.selected_product = Some(id),
            UiAction::CloseProduct => self.selected_product = None,
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }
}

/// Pure transition: returns the next state, leaves `state` untouched.
pub fn reduce(state: &UiState, action: UiAction) -> UiState {
    let mut next = state.clone();
    next.apply(action);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_is_pure() {
        let state = UiState::default();
        let next = reduce(&state, UiAction::TogglePersona("student".into()));
        assert!(state.filters.personas.is_empty());
        assert_eq!(next.filters.personas, vec!["student"]);
    }

    #[test]
    fn test_toggle_expanded() {
        let mut state = UiState::default();
        state.apply(UiAction::ToggleExpanded("bottleneck-1".into()));
        state.apply(UiAction::ToggleExpanded("phase-2".into()));
        assert!(state.is_expanded("bottleneck-1"));
        state.apply(UiAction::ToggleExpanded("bottleneck-1".into()));
        assert!(!state.is_expanded("bottleneck-1"));
        state.apply(UiAction::CollapseAll);
        assert!(state.expanded.is_empty());
    }

    #[test]
    fn test_navigate_closes_menu() {
        let mut state = UiState::default();
        assert_eq!(state.active_section, "intro");
        state.apply(UiAction::ToggleMenu);
        assert!(state.menu_open);
        state.apply(UiAction::NavigateTo("roadmap".into()));
        assert!(!state.menu_open);
        assert_eq!(state.active_section, "roadmap");
    }

    #[test]
    fn test_product_panel() {
        let state = reduce(&UiState::default(), UiAction::SelectProduct("kiosk".into()));
        assert_eq!(state.selected_product.as_deref(), Some("kiosk"));
        assert_eq!(reduce(&state, UiAction::CloseProduct).selected_product, None);
    }

    #[test]
    fn test_action_json_shape() {
        let action: UiAction = serde_json::from_str(r#"{"type":"toggle_touchpoint","id":"kiosk"}"#).unwrap();
        assert_eq!(action, UiAction::ToggleTouchpoint("kiosk".into()));
        let action: UiAction = serde_json::from_str(r#"{"type":"clear_filters"}"#).unwrap();
        assert_eq!(action, UiAction::ClearFilters);
    }
}
