//! Validators: business predicates over extracted page data.
//!
//! The range, sort-order and count-ceiling checks are pure functions over
//! already-extracted sequences. The reveal check is the one validator that
//! drives the page itself, one isolated item at a time.

pub mod count;
pub mod range;
pub mod reveal;
pub mod sort;

pub use count::check_count_ceiling;
pub use range::check_range;
pub use reveal::{check_reveal, RevealLocators, RevealOutcome, RevealState};
pub use sort::check_descending;
