use tracing::{debug, warn};

use listcheck_core_types::{ItemOutcome, StepReport};

/// No grouping's count may exceed `ceiling`.
pub fn check_count_ceiling(name: &str, counts: &[(String, i64)], ceiling: i64) -> StepReport {
    let mut step = StepReport::new(name);
    for (label, count) in counts {
        if *count > ceiling {
            warn!(step = name, item = %label, count, ceiling, "count above ceiling");
            step.push(ItemOutcome::fail(
                label.clone(),
                format!("count {count} exceeds ceiling {ceiling}"),
            ));
        } else {
            debug!(step = name, item = %label, count, "count within ceiling");
            step.push(ItemOutcome::pass(label.clone()));
        }
    }
    step
}
