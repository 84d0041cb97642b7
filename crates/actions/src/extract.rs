//! Numeric extraction from rendered element text.

use tracing::warn;

use listcheck_core_types::{CheckError, Locator};

use crate::ports::PagePort;
use crate::wait::Waiter;

/// How strongly the matched elements must have arrived before reading them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementGate {
    Present,
    Visible,
}

/// Strip every non-digit character; `None` when nothing usable remains.
/// `"€1.250/month"` parses as `1250`, same as the rendered figure.
pub fn digits_only(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Wait for all elements matching `locator` (per `gate`), read each one's
/// rendered text in document order and coerce it to an integer. Entries
/// that reduce to nothing are placeholder or still-loading elements:
/// recorded as a warning and skipped, never an error. Document order is
/// preserved — the sort-order check depends on it.
pub async fn extract_numbers(
    port: &dyn PagePort,
    waiter: &Waiter,
    locator: &Locator,
    gate: ElementGate,
) -> Result<Vec<i64>, CheckError> {
    let handles = match gate {
        ElementGate::Present => waiter.all_present(port, locator).await?,
        ElementGate::Visible => waiter.all_visible(port, locator).await?,
    };

    let mut values = Vec::with_capacity(handles.len());
    for (index, handle) in handles.iter().enumerate() {
        let text = match port.read_text(handle).await {
            Ok(text) => text,
            Err(err) => {
                warn!(%locator, index, error = %err, "element unreadable, skipping");
                continue;
            }
        };
        match digits_only(&text) {
            Some(value) => values.push(value),
            None => warn!(%locator, index, text = %text, "no digits in element text, skipping"),
        }
    }
    Ok(values)
}
