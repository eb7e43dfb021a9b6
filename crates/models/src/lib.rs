//! Marker domain types shared by the store and its callers.
//! - `MarkerRecord` / `LatLng` define the persisted JSON shape.
//! - `MarkerInput` carries raw user input and validates it before it reaches a store.

pub mod errors;
pub mod marker;
pub mod input;

pub use input::{Coordinate, MarkerInput};
pub use marker::{LatLng, MarkerRecord};
