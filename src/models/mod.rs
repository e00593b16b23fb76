//! Data models for the weather lookup API.
//!
//! This module contains the request/response models of the HTTP surface
//! and the domain types produced by the location resolver and forecast
//! aggregator.

pub mod api;
pub mod weather;

pub use api::*;
pub use weather::*;
