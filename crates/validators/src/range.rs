use tracing::{debug, warn};

use listcheck_core_types::{ItemOutcome, StepReport};

/// Every value must lie inside `[min, max]`; each offender is reported with
/// its value.
pub fn check_range(name: &str, values: &[i64], min: i64, max: i64) -> StepReport {
    let mut step = StepReport::new(name);
    for (index, &value) in values.iter().enumerate() {
        let label = format!("{name}[{index}]");
        if value < min || value > max {
            warn!(step = name, index, value, min, max, "value out of range");
            step.push(ItemOutcome::fail(
                label,
                format!("{value} outside [{min}, {max}]"),
            ));
        } else {
            debug!(step = name, index, value, "value in range");
            step.push(ItemOutcome::pass(label));
        }
    }
    step
}
