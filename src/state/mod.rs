mod filter;
mod store;

pub use filter::FilterState;
pub use store::{reduce, UiAction, UiState, DEFAULT_SECTION};
