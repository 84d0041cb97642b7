//! Error types shared across the harness crates.

use thiserror::Error;

/// Errors raised while driving the page. Assertion failures are not errors;
/// they are `Fail` verdicts in the report.
#[derive(Debug, Error, Clone)]
pub enum CheckError {
    /// A bounded wait exhausted its budget before the predicate held.
    #[error("timed out after {budget_ms}ms waiting for {what}")]
    Timeout { what: String, budget_ms: u64 },

    /// Both the simulated and the script interaction path failed.
    #[error("interaction failed on {locator}: {reason}")]
    Action { locator: String, reason: String },

    /// The browser backend reported an I/O or protocol failure.
    #[error("page backend error: {0}")]
    Page(String),

    /// The scenario cannot meaningfully continue.
    #[error("scenario aborted: {0}")]
    Aborted(String),
}

impl CheckError {
    pub fn timeout(what: impl Into<String>, budget_ms: u64) -> Self {
        CheckError::Timeout {
            what: what.into(),
            budget_ms,
        }
    }

    pub fn action(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckError::Action {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    pub fn page(reason: impl Into<String>) -> Self {
        CheckError::Page(reason.into())
    }

    pub fn aborted(reason: impl Into<String>) -> Self {
        CheckError::Aborted(reason.into())
    }

    /// Timeouts are recoverable at the primitive layer (they trigger the
    /// fallback path); everything else is not.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CheckError::Timeout { .. })
    }
}
