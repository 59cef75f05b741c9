pub mod geo;
pub mod time;

// Geoprim crate: small, well-tested primitives only.
pub use geo::*;
pub use time::*;
