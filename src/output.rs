//! Payloads exchanged with the page.
//!
//! These structs are serialized to JSON and handed to the frontend for
//! rendering; wasm.rs only parses inputs and serializes these.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{Breakpoint, LabelAnchor, LayoutConfig, OrbitItem, OrbitLayout};
use crate::plan::PlanCatalog;

/// A placed orbit node ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutput {
    pub id: String,
    pub label: String,
    /// Offset from the container center
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub label_anchor: LabelAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub diameter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined orbit diagram sent to the page
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<CenterOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ring_radii: Vec<f64>,
    pub node_diameter: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<Breakpoint>,
    pub feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl OrbitOutput {
    /// Labels come from the catalog's short product names when one is given,
    /// otherwise the item id is shown.
    pub fn from_layout(layout: &OrbitLayout, cfg: &LayoutConfig, catalog: Option<&PlanCatalog>) -> Self {
        let label_for = |id: &str| {
            catalog
                .and_then(|c| c.product(id))
                .map(|p| p.short_name())
                .unwrap_or_else(|| id.to_string())
        };

        let nodes = layout
            .positions
            .iter()
            .map(|p| NodeOutput {
                id: p.id.clone(),
                label: label_for(&p.id),
                x: p.x,
                y: p.y,
                angle: p.angle,
                label_anchor: layout.label_anchor(p, cfg),
            })
            .collect();

        let center = CenterOutput {
            label: catalog.map(|c| label_for(&c.center_product)),
            diameter: layout.center_diameter,
        };

        Self {
            nodes,
            center: Some(center),
            ring_radii: layout.ring_radii.clone(),
            node_diameter: layout.node_diameter,
            breakpoint: Some(layout.breakpoint),
            feasible: layout.feasible,
            error: None,
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self { error: Some(ErrorInfo { message: err.to_string() }), ..Self::default() }
    }
}

/// Orbit items as sent by the page: either a bare id or `{ id, key? }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ItemInput {
    Id(String),
    Item { id: String, key: Option<String> },
}

impl ItemInput {
    fn into_item(self) -> OrbitItem {
        match self {
            ItemInput::Id(id) | ItemInput::Item { id, key: None } => OrbitItem::new(id),
            ItemInput::Item { id, key: Some(key) } => OrbitItem::with_key(id, key),
        }
    }
}

pub fn parse_items(input: &str) -> Result<Vec<OrbitItem>> {
    let items: Vec<ItemInput> = serde_json::from_str(input).map_err(Error::Payload)?;
    Ok(items.into_iter().map(ItemInput::into_item).collect())
}

/// Serialize a payload, falling back to an error object.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&e.to_string()))
}

pub fn error_json(message: &str) -> String {
    let info = ErrorInfo { message: message.to_string() };
    serde_json::json!({ "error": info }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_orbit, ContainerSize};

    #[test]
    fn test_parse_items_accepts_ids_and_objects() {
        let items = parse_items(r#"["a", { "id": "b" }, { "id": "c", "key": "seed" }]"#).unwrap();
        assert_eq!(items[0], OrbitItem::new("a"));
        assert_eq!(items[1], OrbitItem::new("b"));
        assert_eq!(items[2], OrbitItem::with_key("c", "seed"));
    }

    #[test]
    fn test_parse_items_rejects_garbage() {
        assert!(matches!(parse_items("{\"id\": 1}"), Err(Error::Payload(_))));
    }

    #[test]
    fn test_output_uses_catalog_labels() {
        let catalog = PlanCatalog::from_json(
            r#"{ "products": [
                { "id": "starship-360", "name": "Starship 360", "orbitRing": "control" },
                { "id": "kiosk-app", "name": "Starship Kiosk", "orbitRing": "demand" }
            ] }"#,
        )
        .unwrap();
        let cfg = LayoutConfig::default();
        let layout = layout_orbit(&[OrbitItem::new("kiosk-app"), OrbitItem::new("ghost")], ContainerSize::new(500.0, 500.0), &cfg);
        let out = OrbitOutput::from_layout(&layout, &cfg, Some(&catalog));

        assert_eq!(out.nodes[0].label, "Kiosk");
        assert_eq!(out.nodes[1].label, "ghost");
        assert_eq!(out.center.as_ref().and_then(|c| c.label.as_deref()), Some("360"));
        assert!(out.error.is_none());
    }

    #[test]
    fn test_error_output_shape() {
        let err = parse_items("nope").unwrap_err();
        let json = to_json(&OrbitOutput::from_error(&err));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("nodes").is_none());
        assert!(value["error"]["message"].as_str().unwrap().starts_with("invalid ui payload"));
    }

    #[test]
    fn test_error_json() {
        let value: serde_json::Value = serde_json::from_str(&error_json("bad \"quote\"")).unwrap();
        assert_eq!(value["error"]["message"], "bad \"quote\"");
    }
}
