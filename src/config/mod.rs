//! Configuration structures and loading utilities.
//!
//! Every structure here is loaded once from the environment at startup
//! and passed explicitly to the components that need it.

pub mod server;
pub mod weather;

pub use server::*;
pub use weather::*;
