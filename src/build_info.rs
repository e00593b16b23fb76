//! Build metadata emitted by `build.rs`.
//!
//! vergen only emits the git SHA when the crate is built inside a git
//! checkout, so every value has a fallback.

/// Short git commit SHA
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// RFC 3339 build timestamp
pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(timestamp) => timestamp,
    None => "unknown",
};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
