use async_trait::async_trait;
use serde_json::Value;

use listcheck_core_types::{CheckError, ElementHandle, Locator};

/// The browser surface the harness consumes: element location, text and
/// state reads, click/keystroke simulation, direct page-script execution,
/// and navigation. Nothing else of the backend leaks past this trait.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// Navigate the session to `url` and wait for the initial load.
    async fn goto(&self, url: &str) -> Result<(), CheckError>;

    /// Navigate back one history entry.
    async fn back(&self) -> Result<(), CheckError>;

    /// All elements currently matching `locator`, in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, CheckError>;

    /// Matching elements scoped to the subtree rooted at `scope`.
    async fn find_within(
        &self,
        scope: &ElementHandle,
        locator: &Locator,
    ) -> Result<Vec<ElementHandle>, CheckError>;

    /// Rendered text of the element.
    async fn read_text(&self, handle: &ElementHandle) -> Result<String, CheckError>;

    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool, CheckError>;

    /// Visible, enabled and not obscured; a simulated click can land on it.
    async fn is_interactable(&self, handle: &ElementHandle) -> Result<bool, CheckError>;

    /// Simulated pointer click.
    async fn click(&self, handle: &ElementHandle) -> Result<(), CheckError>;

    /// Simulated keystrokes into the element.
    async fn send_keys(&self, handle: &ElementHandle, text: &str) -> Result<(), CheckError>;

    /// Evaluate a script expression in the page, returning its JSON value.
    async fn eval(&self, script: &str) -> Result<Value, CheckError>;

    /// Call a JS function with the element bound to `this`.
    async fn eval_on(
        &self,
        handle: &ElementHandle,
        function: &str,
    ) -> Result<Value, CheckError>;
}
