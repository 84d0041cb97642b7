//! Interaction primitives for the listcheck harness.
//!
//! Everything the harness does to a live page goes through the [`PagePort`]
//! trait and is guarded by the bounded-polling [`Waiter`]: the page is
//! network-loaded and client-rendered, so no read of its state may be
//! assumed immediately available.

pub mod click;
pub mod extract;
pub mod ports;
pub mod type_text;
pub mod wait;

pub use click::click;
pub use extract::{digits_only, extract_numbers, ElementGate};
pub use ports::PagePort;
pub use type_text::type_text;
pub use wait::Waiter;

#[cfg(test)]
pub(crate) mod testing;
