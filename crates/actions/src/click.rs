//! Click with an explicit ordered fallback: simulated pointer first, direct
//! script click second.

use tracing::{debug, warn};

use listcheck_core_types::{CheckError, Locator};

use crate::ports::PagePort;
use crate::wait::Waiter;

/// Best-effort click on the first element matching `locator`.
///
/// The primary path waits for an interactable match and dispatches a
/// simulated click. If that wait or the click itself fails (element
/// obscured, detached, or not yet interactive), the element is re-located
/// and clicked through the page-script mechanism instead. Only when both
/// paths fail does the error reach the caller: a pure timeout (element
/// never appeared) propagates as `Timeout`, anything else as `Action`.
pub async fn click(
    port: &dyn PagePort,
    waiter: &Waiter,
    locator: &Locator,
) -> Result<(), CheckError> {
    let primary = simulated_click(port, waiter, locator).await;
    let primary_err = match primary {
        Ok(()) => {
            debug!(%locator, "clicked");
            return Ok(());
        }
        Err(err) => {
            warn!(%locator, error = %err, "simulated click failed, falling back to script click");
            err
        }
    };

    match scripted_click(port, waiter, locator).await {
        Ok(()) => {
            debug!(%locator, "clicked via script");
            Ok(())
        }
        Err(err) if err.is_timeout() && primary_err.is_timeout() => Err(err),
        Err(err) => Err(CheckError::action(
            locator.to_string(),
            format!("simulated path: {primary_err}; script path: {err}"),
        )),
    }
}

async fn simulated_click(
    port: &dyn PagePort,
    waiter: &Waiter,
    locator: &Locator,
) -> Result<(), CheckError> {
    let handle = waiter.first_interactable(port, locator).await?;
    port.click(&handle).await
}

async fn scripted_click(
    port: &dyn PagePort,
    waiter: &Waiter,
    locator: &Locator,
) -> Result<(), CheckError> {
    let handles = waiter.all_present(port, locator).await?;
    // all_present never yields an empty vec
    let handle = handles[0];
    port.eval_on(&handle, "function() { this.click(); }")
        .await?;
    Ok(())
}
