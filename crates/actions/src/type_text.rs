//! Type into a field: clear via direct state assignment, then simulate
//! keystrokes.

use tracing::debug;

use listcheck_core_types::{CheckError, Locator};

use crate::ports::PagePort;
use crate::wait::Waiter;

/// Wait for the field to become visible, blank it through the script path
/// (a scripted `value = ''` sidesteps composition and debounce handlers
/// that simulated backspaces would trip), then type `value` key by key so
/// the page's own input-driven side effects still fire.
pub async fn type_text(
    port: &dyn PagePort,
    waiter: &Waiter,
    locator: &Locator,
    value: &str,
) -> Result<(), CheckError> {
    let handle = waiter.first_visible(port, locator).await?;
    port.eval_on(&handle, "function() { this.value = ''; }")
        .await?;
    port.send_keys(&handle, value).await?;
    debug!(%locator, chars = value.len(), "typed");
    Ok(())
}
