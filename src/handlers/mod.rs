//! HTTP request handlers for API endpoints.
//!
//! Each handler is annotated for OpenAPI generation; [`create_app`] wires
//! them into an application.

pub mod health;
pub mod index;
pub mod metrics;
pub mod openapi;
pub mod weather;

pub use health::*;
pub use index::*;
pub use metrics::*;
pub use openapi::*;
pub use weather::*;
