mod catalog;
mod document;
mod types;

pub use catalog::{CategoryGroup, PlanCatalog};
pub use document::{parse_full_plan, PlanSection, Subsection};
pub use types::*;
