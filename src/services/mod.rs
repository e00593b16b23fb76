//! Business logic and service layer modules.
//!
//! The OpenWeather client, the location resolver and forecast aggregator
//! built on it, the report service composing them, and metrics collection.

pub mod forecast;
pub mod location;
pub mod metrics;
pub mod openweather;
pub mod weather;

pub use forecast::*;
pub use location::*;
pub use metrics::*;
pub use openweather::*;
pub use weather::*;
