//! Marker list persisted in a single key-value slot.

mod repository;
mod shared;
mod store;

pub use repository::MarkerRepository;
pub use shared::SharedMarkerStore;
pub use store::{MarkerStore, DEFAULT_MARKER_KEY};
