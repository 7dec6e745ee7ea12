pub mod console;
pub mod error;
pub mod layout;
pub mod nav;
pub mod output;
pub mod plan;
pub mod share;
pub mod state;
pub mod view;
mod wasm;

pub use error::{Error, Result};
pub use layout::{layout_orbit, ContainerSize, LayoutConfig, OrbitItem, OrbitLayout, OrbitSession};
pub use view::PlanView;
pub use wasm::*;
