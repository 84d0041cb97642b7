//! Browser process lifecycle: launch, page creation, shutdown.

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use listcheck_core_types::CheckError;

use crate::page::CdpPagePort;

/// One launched browser process plus the event loop that keeps its CDP
/// websocket drained. Owns both for the lifetime of the run.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a Chrome/Chromium instance and start draining its events.
    pub async fn launch(headless: bool) -> Result<Self, CheckError> {
        let mut builder = BrowserConfig::builder().window_size(1920, 1080);
        if !headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(CheckError::page)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| CheckError::page(format!("browser launch failed: {err}")))?;
        info!(headless, "browser launched");

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    error!(error = %err, "CDP handler stopped");
                    break;
                }
            }
            debug!("CDP event loop finished");
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a fresh page owned by this session.
    pub async fn open_page(&self) -> Result<CdpPagePort, CheckError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|err| CheckError::page(format!("new page failed: {err}")))?;
        Ok(CdpPagePort::new(page))
    }

    /// Shut the browser down and stop the event loop.
    pub async fn close(mut self) -> Result<(), CheckError> {
        self.browser
            .close()
            .await
            .map_err(|err| CheckError::page(format!("browser close failed: {err}")))?;
        self.handler_task.abort();
        info!("browser closed");
        Ok(())
    }
}
