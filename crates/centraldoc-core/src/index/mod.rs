// ── Device hierarchy index ──
//
// Serial-keyed registry of merged device records plus the site and group
// membership derived from one monitoring snapshot.

pub mod hierarchy;
pub mod registry;
pub mod settings;
pub mod sort;

pub use hierarchy::Hierarchy;
pub use registry::Registry;
pub use settings::{DEFAULT_RF_ZONE, rf_zone};
pub use sort::ordered_positions;
