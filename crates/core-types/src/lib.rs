//! Shared primitives for the listcheck harness crates.

pub mod errors;
pub mod locator;
pub mod report;

pub use errors::CheckError;
pub use locator::{ElementHandle, Locator};
pub use report::{ItemOutcome, ScenarioReport, StepReport, Verdict};
