//! Scenario layer: configuration surface and the top-level driver that
//! sequences search, filters and validators against one page.

pub mod config;
pub mod driver;

pub use config::{Bounds, ConfigError, LocatorMap, ScenarioConfig};
pub use driver::ScenarioDriver;
