//! Verdicts and reports produced by the validators.

use std::fmt;

/// Outcome of a single business-rule check on a single item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// One item's result inside a validation step, labelled so the report can
/// name the offender.
#[derive(Clone, Debug)]
pub struct ItemOutcome {
    pub label: String,
    pub verdict: Verdict,
}

impl ItemOutcome {
    pub fn pass(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            verdict: Verdict::Pass,
        }
    }

    pub fn fail(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            verdict: Verdict::Fail(reason.into()),
        }
    }
}

/// Aggregated result of one validator invocation.
#[derive(Clone, Debug, Default)]
pub struct StepReport {
    pub name: String,
    pub items: Vec<ItemOutcome>,
}

impl StepReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: ItemOutcome) {
        self.items.push(outcome);
    }

    pub fn passed(&self) -> bool {
        self.items.iter().all(|item| item.verdict.is_pass())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|item| !item.verdict.is_pass())
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        write!(
            f,
            "{}: {} ({} items, {} failed)",
            self.name,
            if self.passed() { "PASS" } else { "FAIL" },
            self.items.len(),
            failed
        )
    }
}

/// Full scenario result: one step per validator, in execution order.
#[derive(Clone, Debug, Default)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    pub fn record(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(StepReport::passed)
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step)?;
            for item in step.failures() {
                let Verdict::Fail(reason) = &item.verdict else {
                    continue;
                };
                writeln!(f, "  {}: {}", item.label, reason)?;
            }
        }
        write!(
            f,
            "overall: {}",
            if self.all_passed() { "PASS" } else { "FAIL" }
        )
    }
}
