// Page controller.
//
// Ties the catalog, the UI store, the orbit session and the scroll spy
// together so the wasm class is a thin shim:
// - filter actions re-derive the orbit items and relayout
// - container resizes go straight to the orbit session
// - scroll updates feed the active nav section back into the store

use crate::layout::{ContainerSize, LayoutConfig, OrbitSession};
use crate::nav::{ScrollSpy, ScrollState, SectionMetrics};
use crate::output::OrbitOutput;
use crate::plan::PlanCatalog;
use crate::state::{reduce, UiAction, UiState};

#[derive(Debug)]
pub struct PlanView {
    catalog: PlanCatalog,
    state: UiState,
    session: OrbitSession,
    spy: ScrollSpy,
}

impl PlanView {
    pub fn new(catalog: PlanCatalog, cfg: LayoutConfig) -> Self {
        let state = UiState::default();
        let items = catalog.orbit_items(&state.filters);
        let session = OrbitSession::new(cfg, items);
        Self { catalog, state, session, spy: ScrollSpy::default() }
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn session_mut(&mut self) -> &mut OrbitSession {
        &mut self.session
    }

    /// Returns true if the orbit layout changed.
    pub fn resize(&mut self, size: ContainerSize) -> bool {
        self.session.resize(size)
    }

    /// Apply an action. Returns true if the orbit layout changed.
    pub fn dispatch(&mut self, action: UiAction) -> bool {
        let next = reduce(&self.state, action);
        let filters_changed = next.filters != self.state.filters;
        self.state = next;
        if filters_changed {
            let items = self.catalog.orbit_items(&self.state.filters);
            self.session.set_items(items)
        } else {
            false
        }
    }

    pub fn scroll(
        &mut self,
        scroll_top: f64,
        document_height: f64,
        viewport_height: f64,
        sections: &[SectionMetrics],
    ) -> ScrollState {
        let scroll = self.spy.update(scroll_top, document_height, viewport_height, sections);
        if scroll.active != self.state.active_section {
            self.state = reduce(&self.state, UiAction::SetActiveSection(scroll.active.clone()));
        }
        scroll
    }

    pub fn orbit(&self) -> OrbitOutput {
        OrbitOutput::from_layout(self.session.layout(), self.session.config(), Some(&self.catalog))
    }
}
