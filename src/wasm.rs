//! WASM bindings for the orbit-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Inputs arrive as JSON strings, outputs leave as JSON strings; failures are
//! logged to the console and reported through an `error` field.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use wasm_bindgen::prelude::*;

use crate::console::ConsoleLayer;
use crate::layout::{layout_orbit, ContainerSize, LayoutConfig};
use crate::nav::{default_nav_items, SectionMetrics};
use crate::output::{error_json, parse_items, to_json, OrbitOutput};
use crate::plan::{parse_full_plan, PlanCatalog};
use crate::share::{copy_toast, ClipboardError, ShareTarget};
use crate::state::{reduce, UiAction, UiState};
use crate::view::PlanView;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Route the crate's tracing events to the browser console. Call once after
/// loading the module; `verbose` also forwards debug events.
#[wasm_bindgen]
pub fn init_logging(verbose: bool) {
    let max_level = if verbose { Level::DEBUG } else { Level::INFO };
    let layer = ConsoleLayer::new(max_level, |level: Level, line: &str| {
        if level <= Level::WARN {
            console_error(line);
        } else {
            console_log(line);
        }
    });
    if let Err(e) = tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer)) {
        console_error(&format!("Logging already initialised: {}", e));
    }
}

#[wasm_bindgen]
pub fn compute_orbit_layout(items_json: &str, width: f64, height: f64) -> String {
    let items = match parse_items(items_json) {
        Ok(items) => items,
        Err(e) => {
            console_error(&format!("Error parsing orbit items: {}", e));
            return to_json(&OrbitOutput::from_error(&e));
        }
    };
    let cfg = LayoutConfig::default();
    let layout = layout_orbit(&items, ContainerSize::new(width, height), &cfg);
    to_json(&OrbitOutput::from_layout(&layout, &cfg, None))
}

/// Split the full plan text into accordion sections. Returns a JSON array.
#[wasm_bindgen]
pub fn parse_plan(text: &str) -> String {
    to_json(&parse_full_plan(text))
}

/// Apply one action to a serialized UI state and return the next state.
/// On a malformed payload the input state is returned unchanged.
#[wasm_bindgen]
pub fn reduce_ui_state(state_json: &str, action_json: &str) -> String {
    let state: UiState = match serde_json::from_str(state_json) {
        Ok(state) => state,
        Err(e) => {
            console_error(&format!("Error parsing ui state: {}", e));
            return error_json(&e.to_string());
        }
    };
    match serde_json::from_str::<UiAction>(action_json) {
        Ok(action) => to_json(&reduce(&state, action)),
        Err(e) => {
            console_error(&format!("Error parsing ui action: {}", e));
            to_json(&state)
        }
    }
}

/// Toast for a finished clipboard write. `message` is the rejection reason
/// when `ok` is false.
#[wasm_bindgen]
pub fn copy_result(target: &str, ok: bool, message: &str) -> String {
    let Some(target) = ShareTarget::parse(target) else {
        console_error(&format!("Unknown share target '{}'", target));
        return error_json("unknown share target");
    };
    let result = if ok { Ok(()) } else { Err(ClipboardError(message.to_string())) };
    to_json(&copy_toast(target, result))
}

#[wasm_bindgen]
pub fn print_page() {
    let Some(window) = web_sys::window() else {
        console_error("No window to print");
        return;
    };
    if let Err(e) = window.print() {
        console_error(&format!("Print failed: {:?}", e));
    }
}

/// Viewport-relative top of every nav section, in nav order.
#[wasm_bindgen]
pub fn measure_sections() -> String {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return "[]".to_string();
    };
    let sections: Vec<SectionMetrics> = default_nav_items()
        .iter()
        .map(|item| SectionMetrics {
            id: item.id.to_string(),
            top: document
                .get_element_by_id(item.id)
                .map(|el| el.get_bounding_client_rect().top()),
        })
        .collect();
    to_json(&sections)
}

/// The orbit diagram and page state behind one mounted page.
#[wasm_bindgen]
pub struct OrbitView {
    inner: PlanView,
}

#[wasm_bindgen]
impl OrbitView {
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<OrbitView, JsValue> {
        let catalog = PlanCatalog::from_json(catalog_json).map_err(|e| {
            console_error(&format!("Error loading catalog: {}", e));
            JsValue::from_str(&e.to_string())
        })?;
        Ok(OrbitView { inner: PlanView::new(catalog, LayoutConfig::default()) })
    }

    /// Returns true if the layout changed and should be redrawn.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.inner.resize(ContainerSize::new(width, height))
    }

    /// Returns true if the layout changed and should be redrawn.
    pub fn dispatch(&mut self, action_json: &str) -> bool {
        match serde_json::from_str::<UiAction>(action_json) {
            Ok(action) => self.inner.dispatch(action),
            Err(e) => {
                console_error(&format!("Error parsing ui action: {}", e));
                false
            }
        }
    }

    /// Feed a scroll event; `sections_json` is what `measure_sections` returned.
    pub fn scroll(&mut self, scroll_top: f64, document_height: f64, viewport_height: f64, sections_json: &str) -> String {
        let sections: Vec<SectionMetrics> = match serde_json::from_str(sections_json) {
            Ok(sections) => sections,
            Err(e) => {
                console_error(&format!("Error parsing section metrics: {}", e));
                Vec::new()
            }
        };
        to_json(&self.inner.scroll(scroll_top, document_height, viewport_height, &sections))
    }

    pub fn state(&self) -> String {
        to_json(self.inner.state())
    }

    pub fn layout(&self) -> String {
        to_json(&self.inner.orbit())
    }

    /// Text to write to the clipboard for a share target.
    pub fn share_text(&self, target: &str) -> Option<String> {
        ShareTarget::parse(target).map(|t| t.text(self.inner.catalog()).to_string())
    }
}
