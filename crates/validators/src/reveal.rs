//! Per-listing reveal check: open the gallery, read the image counter,
//! trigger the phone reveal and confirm it actually revealed.

use tracing::{debug, info, warn};

use listcheck_actions::{digits_only, PagePort, Waiter};
use listcheck_core_types::{CheckError, ElementHandle, ItemOutcome, Locator, StepReport};

/// Reveal progress for one listing.
///
/// ```text
/// Hidden --trigger--> AwaitingConfirmation --confirmation visible--> Revealed
///                     AwaitingConfirmation --timeout--------------> RevealTimeout
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    AwaitingConfirmation,
    Revealed,
    RevealTimeout,
}

/// Semantic element names the reveal check operates on.
#[derive(Clone, Debug)]
pub struct RevealLocators {
    /// One listing card per grouping.
    pub listing: Locator,
    /// Element inside the card that opens the detail overlay.
    pub opener: Locator,
    /// Overlay element showing the gallery image count.
    pub counter: Locator,
    /// The reveal action (phone button).
    pub trigger: Locator,
    /// Element that must become visible once revealed.
    pub confirmation: Locator,
    /// Overlay close control; falling back to history navigation when absent.
    pub modal_close: Locator,
}

/// What the reveal loop produced: one verdict per listing, plus the gallery
/// counts it read along the way (consumed by the count-ceiling validator).
#[derive(Clone, Debug)]
pub struct RevealOutcome {
    pub report: StepReport,
    pub counts: Vec<(String, i64)>,
}

/// Walk every listing (up to `max_items`) through the reveal state machine.
///
/// Each item's check is isolated: a failure or error on one listing is
/// recorded in that listing's slot and the loop moves on. Only the absence
/// of any listing at all is fatal, because the scenario cannot continue.
pub async fn check_reveal(
    port: &dyn PagePort,
    waiter: &Waiter,
    locators: &RevealLocators,
    max_items: Option<usize>,
) -> Result<RevealOutcome, CheckError> {
    let listings = waiter.all_present(port, &locators.listing).await?;
    let cap = max_items.unwrap_or(listings.len());
    info!(total = listings.len(), cap, "checking listings");

    let mut report = StepReport::new("phone reveal");
    let mut counts = Vec::new();

    for (index, listing) in listings.iter().take(cap).enumerate() {
        let label = format!("listing[{index}]");
        match reveal_one(port, waiter, locators, listing).await {
            Ok((state, count)) => {
                if let Some(count) = count {
                    counts.push((label.clone(), count));
                }
                match state {
                    RevealState::Revealed => {
                        info!(item = %label, "phone revealed");
                        report.push(ItemOutcome::pass(label));
                    }
                    RevealState::RevealTimeout => {
                        warn!(item = %label, "confirmation never became visible");
                        report.push(ItemOutcome::fail(
                            label,
                            "confirmation element did not become visible within the wait budget",
                        ));
                    }
                    RevealState::Hidden | RevealState::AwaitingConfirmation => {
                        unreachable!("reveal_one only returns terminal states")
                    }
                }
            }
            Err(err) => {
                warn!(item = %label, error = %err, "listing check failed");
                report.push(ItemOutcome::fail(label, err.to_string()));
            }
        }
        close_overlay(port, waiter, locators).await;
    }

    Ok(RevealOutcome { report, counts })
}

async fn reveal_one(
    port: &dyn PagePort,
    waiter: &Waiter,
    locators: &RevealLocators,
    listing: &ElementHandle,
) -> Result<(RevealState, Option<i64>), CheckError> {
    let opener = waiter
        .visible_within(port, listing, &locators.opener)
        .await?;
    click_handle(port, &opener).await?;

    // The counter is informational input for the ceiling check; a listing
    // without one is a recoverable skip.
    let count = match waiter.first_visible(port, &locators.counter).await {
        Ok(handle) => {
            let text = port.read_text(&handle).await.unwrap_or_default();
            let value = digits_only(&text);
            if value.is_none() {
                warn!(text = %text, "gallery counter had no usable number");
            }
            value
        }
        Err(err) => {
            warn!(error = %err, "gallery counter not found");
            None
        }
    };

    let mut state = RevealState::Hidden;
    debug!(?state, "locating reveal trigger");
    let trigger = waiter
        .first_interactable(port, &locators.trigger)
        .await?;
    click_handle(port, &trigger).await?;
    state = RevealState::AwaitingConfirmation;
    debug!(?state, "reveal triggered");

    state = match waiter.first_visible(port, &locators.confirmation).await {
        Ok(_) => RevealState::Revealed,
        Err(err) if err.is_timeout() => RevealState::RevealTimeout,
        Err(err) => return Err(err),
    };
    Ok((state, count))
}

/// Handle-scoped variant of the click fallback: simulated first, script
/// second.
async fn click_handle(port: &dyn PagePort, handle: &ElementHandle) -> Result<(), CheckError> {
    if let Err(err) = port.click(handle).await {
        warn!(%handle, error = %err, "simulated click failed, trying script click");
        port.eval_on(handle, "function() { this.click(); }").await?;
    }
    Ok(())
}

/// Always runs between listings so one item's leftover overlay cannot
/// contaminate the next. Best effort only.
async fn close_overlay(port: &dyn PagePort, waiter: &Waiter, locators: &RevealLocators) {
    match waiter
        .first_interactable(port, &locators.modal_close)
        .await
    {
        Ok(handle) => {
            if let Err(err) = click_handle(port, &handle).await {
                warn!(error = %err, "overlay close failed, navigating back");
                if let Err(err) = port.back().await {
                    warn!(error = %err, "history navigation failed");
                }
            }
        }
        Err(_) => {
            debug!("no overlay close control, navigating back");
            if let Err(err) = port.back().await {
                warn!(error = %err, "history navigation failed");
            }
        }
    }
}
