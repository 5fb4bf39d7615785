//! route-optimizer core
//!
//! Greedy nearest-neighbor route construction over great-circle estimates,
//! plus the request/response plumbing around it.

pub mod traits;
pub mod model;
pub mod haversine;
pub mod validation;
pub mod solver;
pub mod client;
