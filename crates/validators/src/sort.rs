use tracing::{info, warn};

use listcheck_core_types::{ItemOutcome, StepReport};

/// The sequence must equal its own descending sort, i.e. be monotonically
/// non-increasing in document order.
pub fn check_descending(name: &str, values: &[i64]) -> StepReport {
    let mut step = StepReport::new(name);
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    if values == sorted.as_slice() {
        info!(step = name, count = values.len(), "sequence sorted descending");
        step.push(ItemOutcome::pass("order"));
        return step;
    }

    let divergence = values
        .windows(2)
        .position(|pair| pair[0] < pair[1])
        .unwrap_or(0);
    warn!(step = name, index = divergence, "sequence not sorted descending");
    step.push(ItemOutcome::fail(
        "order",
        format!(
            "not monotonically non-increasing: value at index {} precedes a larger one ({} < {})",
            divergence,
            values[divergence],
            values[divergence + 1]
        ),
    ));
    step
}
