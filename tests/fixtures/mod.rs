//! Test fixtures for route-optimizer.
//!
//! Real central Tokyo landmarks plus helpers for building requests.

pub mod tokyo_locations;

pub use tokyo_locations::*;
