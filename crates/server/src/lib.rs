pub mod routes;
pub mod startup;
pub mod errors;
pub mod observability;

pub use startup::{build_state, run, AppState};
