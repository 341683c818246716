//! Techno-economic assessment of broadband satellite constellations.
//!
//! The domain crates are re-exported here so front-ends depend on a single crate:
//! link budget and capacity modelling, cost of ownership, and launch emissions.
//! [`scenario`] ties them together for catalog-driven batch runs.

pub mod scenario;

pub use satnet_capacity as capacity;
pub use satnet_config as config;
pub use satnet_core as common;
pub use satnet_cost as cost;
pub use satnet_emissions as emissions;
pub use satnet_export as export;
pub use satnet_linkbudget as linkbudget;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
