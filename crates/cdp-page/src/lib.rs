//! Live `PagePort` backend over the Chrome DevTools Protocol.

pub mod launch;
pub mod page;
mod resolve;

pub use launch::BrowserSession;
pub use page::CdpPagePort;
