//! Bounded polling: the single synchronization primitive of the harness.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::trace;

use listcheck_core_types::{CheckError, ElementHandle, Locator};

use crate::ports::PagePort;

/// Re-evaluates a probe over live page state until it yields a value or the
/// budget elapses. Timeout and poll interval are fixed configuration, not
/// adaptive backoff.
#[derive(Clone, Copy, Debug)]
pub struct Waiter {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for Waiter {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl Waiter {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Poll `probe` until it returns `Some`. Backend errors inside the probe
    /// propagate immediately; `None` means "not yet". A final probe runs at
    /// the deadline before `Timeout` is reported.
    pub async fn until<T, F, Fut>(&self, what: &str, mut probe: F) -> Result<T, CheckError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, CheckError>>,
    {
        let started = Instant::now();
        loop {
            if let Some(value) = probe().await? {
                return Ok(value);
            }
            if started.elapsed() + self.poll_interval >= self.timeout {
                if let Some(value) = probe().await? {
                    return Ok(value);
                }
                return Err(CheckError::timeout(what, self.timeout.as_millis() as u64));
            }
            trace!(what, elapsed_ms = started.elapsed().as_millis() as u64, "condition not yet satisfied");
            sleep(self.poll_interval).await;
        }
    }

    /// Wait until at least one element matches `locator`; returns all
    /// matches in document order.
    pub async fn all_present(
        &self,
        port: &dyn PagePort,
        locator: &Locator,
    ) -> Result<Vec<ElementHandle>, CheckError> {
        self.until(&format!("{locator} present"), || async move {
            let handles = port.find_all(locator).await?;
            Ok((!handles.is_empty()).then_some(handles))
        })
        .await
    }

    /// Wait until at least one element matches and every match is visible.
    pub async fn all_visible(
        &self,
        port: &dyn PagePort,
        locator: &Locator,
    ) -> Result<Vec<ElementHandle>, CheckError> {
        self.until(&format!("{locator} visible"), || async move {
            let handles = port.find_all(locator).await?;
            if handles.is_empty() {
                return Ok(None);
            }
            for handle in &handles {
                // A handle gone stale between find and probe counts as
                // not-yet, same as an invisible one.
                if !port.is_visible(handle).await.unwrap_or(false) {
                    return Ok(None);
                }
            }
            Ok(Some(handles))
        })
        .await
    }

    /// Wait for the first visible match.
    pub async fn first_visible(
        &self,
        port: &dyn PagePort,
        locator: &Locator,
    ) -> Result<ElementHandle, CheckError> {
        self.until(&format!("{locator} visible"), || async move {
            for handle in port.find_all(locator).await? {
                if port.is_visible(&handle).await.unwrap_or(false) {
                    return Ok(Some(handle));
                }
            }
            Ok(None)
        })
        .await
    }

    /// Wait for the first match a simulated click can land on.
    pub async fn first_interactable(
        &self,
        port: &dyn PagePort,
        locator: &Locator,
    ) -> Result<ElementHandle, CheckError> {
        self.until(&format!("{locator} interactable"), || async move {
            for handle in port.find_all(locator).await? {
                if port.is_interactable(&handle).await.unwrap_or(false) {
                    return Ok(Some(handle));
                }
            }
            Ok(None)
        })
        .await
    }

    /// Wait for the first visible match inside the subtree at `scope`.
    pub async fn visible_within(
        &self,
        port: &dyn PagePort,
        scope: &ElementHandle,
        locator: &Locator,
    ) -> Result<ElementHandle, CheckError> {
        self.until(&format!("{locator} visible within {scope}"), || async move {
            for handle in port.find_within(scope, locator).await? {
                if port.is_visible(&handle).await.unwrap_or(false) {
                    return Ok(Some(handle));
                }
            }
            Ok(None)
        })
        .await
    }
}
