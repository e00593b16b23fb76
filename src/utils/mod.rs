//! Utility functions and helper modules.
//!
//! Request inspection for logging, route labels for metrics, and the
//! number/text shaping applied to report fields.

pub mod http;
pub mod route;
pub mod text;

pub use http::*;
pub use route::*;
pub use text::*;
