//! The top-level scenario: search an area, apply price/size filters, then
//! run the validators over the result list.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use listcheck_actions::{click, extract_numbers, type_text, ElementGate, PagePort, Waiter};
use listcheck_core_types::{CheckError, ScenarioReport};
use listcheck_validators::{
    check_count_ceiling, check_descending, check_range, check_reveal, RevealLocators,
};

use crate::config::ScenarioConfig;

pub struct ScenarioDriver {
    port: Arc<dyn PagePort>,
    waiter: Waiter,
    config: ScenarioConfig,
}

impl ScenarioDriver {
    pub fn new(port: Arc<dyn PagePort>, config: ScenarioConfig) -> Self {
        let waiter = config.waiter();
        Self {
            port,
            waiter,
            config,
        }
    }

    /// Run the whole scenario. Errors abort the run (the page never reached
    /// a checkable state); assertion failures land in the report instead.
    pub async fn run(&self) -> Result<ScenarioReport, CheckError> {
        self.configure_search().await?;
        self.apply_filters().await?;
        self.load_all_results().await?;

        let mut report = ScenarioReport::default();
        let locators = &self.config.locators;

        let prices = extract_numbers(
            self.port.as_ref(),
            &self.waiter,
            &locators.price_display,
            ElementGate::Visible,
        )
        .await?;
        report.record(check_range(
            "price range",
            &prices,
            self.config.price.min,
            self.config.price.max,
        ));

        let sizes = extract_numbers(
            self.port.as_ref(),
            &self.waiter,
            &locators.title_display,
            ElementGate::Present,
        )
        .await?;
        report.record(check_range(
            "size range",
            &sizes,
            self.config.size.min,
            self.config.size.max,
        ));

        self.sort_by_price_descending().await?;
        let sorted_prices = extract_numbers(
            self.port.as_ref(),
            &self.waiter,
            &locators.price_display,
            ElementGate::Present,
        )
        .await?;
        report.record(check_descending("price order", &sorted_prices));

        let reveal_locators = RevealLocators {
            listing: locators.listing_card.clone(),
            opener: locators.listing_image.clone(),
            counter: locators.gallery_counter.clone(),
            trigger: locators.reveal_trigger.clone(),
            confirmation: locators.reveal_confirmation.clone(),
            modal_close: locators.modal_close.clone(),
        };
        let outcome = check_reveal(
            self.port.as_ref(),
            &self.waiter,
            &reveal_locators,
            self.config.max_listings,
        )
        .await?;
        report.record(check_count_ceiling(
            "gallery image count",
            &outcome.counts,
            self.config.image_ceiling,
        ));
        report.record(outcome.report);

        info!(passed = report.all_passed(), "scenario finished");
        Ok(report)
    }

    /// Open the portal, clear the consent banner and drive the area
    /// autocomplete through every suggestion it offers for the seed term.
    async fn configure_search(&self) -> Result<(), CheckError> {
        let port = self.port.as_ref();
        let locators = &self.config.locators;

        port.goto(&self.config.base_url).await?;
        // The consent banner does not always show up (returning session,
        // regional variants); its absence is not a finding.
        if let Err(err) = click(port, &self.waiter, &locators.cookie_accept).await {
            warn!(error = %err, "no consent banner accepted");
        }

        type_text(
            port,
            &self.waiter,
            &locators.search_input,
            &self.config.search_term,
        )
        .await?;
        self.waiter
            .all_visible(port, &locators.suggestion_panel)
            .await?;
        let options = self
            .waiter
            .all_present(port, &locators.suggestion_option)
            .await?;

        let mut suggestions = Vec::new();
        for option in &options {
            match port.read_text(option).await {
                Ok(text) if !text.trim().is_empty() => suggestions.push(text.trim().to_string()),
                Ok(_) => {}
                Err(err) => warn!(error = %err, "unreadable suggestion entry"),
            }
        }
        if suggestions.is_empty() {
            return Err(CheckError::aborted(format!(
                "autocomplete offered no suggestions for \"{}\"",
                self.config.search_term
            )));
        }
        info!(count = suggestions.len(), "autocomplete suggestions");

        // Select every suggested area: re-type the suggestion, wait for the
        // panel to come back, pick the first entry.
        for suggestion in &suggestions {
            debug!(area = %suggestion, "selecting area");
            type_text(port, &self.waiter, &locators.search_input, suggestion).await?;
            self.waiter
                .all_visible(port, &locators.suggestion_panel)
                .await?;
            click(port, &self.waiter, &locators.suggestion_option).await?;
        }

        click(port, &self.waiter, &locators.area_confirm).await?;
        click(port, &self.waiter, &locators.search_submit).await?;
        Ok(())
    }

    /// Fill price and size bounds into the filter panel, then dismiss it.
    async fn apply_filters(&self) -> Result<(), CheckError> {
        let port = self.port.as_ref();
        let locators = &self.config.locators;
        let price = self.config.price;
        let size = self.config.size;

        click(port, &self.waiter, &locators.filter_menu).await?;
        type_text(
            port,
            &self.waiter,
            &locators.price_min_input,
            &price.min.to_string(),
        )
        .await?;
        type_text(
            port,
            &self.waiter,
            &locators.price_max_input,
            &price.max.to_string(),
        )
        .await?;

        click(port, &self.waiter, &locators.size_tab).await?;
        type_text(
            port,
            &self.waiter,
            &locators.size_min_input,
            &size.min.to_string(),
        )
        .await?;
        type_text(
            port,
            &self.waiter,
            &locators.size_max_input,
            &size.max.to_string(),
        )
        .await?;

        click(port, &self.waiter, &locators.filter_dismiss).await?;
        Ok(())
    }

    /// Scroll in steps until the document height stops growing, so lazily
    /// loaded listings are all in the DOM before extraction.
    async fn load_all_results(&self) -> Result<(), CheckError> {
        let settle = Duration::from_millis(self.config.scroll_settle_ms);
        let mut height = self.page_height().await?;
        loop {
            self.port
                .eval("window.scrollBy(0, document.documentElement.clientHeight)")
                .await?;
            tokio::time::sleep(settle).await;
            let next = self.page_height().await?;
            if next == height {
                break;
            }
            height = next;
        }
        debug!(height, "results fully loaded");
        Ok(())
    }

    async fn page_height(&self) -> Result<i64, CheckError> {
        let value = self.port.eval("document.body.scrollHeight").await?;
        value
            .as_i64()
            .ok_or_else(|| CheckError::page(format!("scrollHeight was not a number: {value}")))
    }

    async fn sort_by_price_descending(&self) -> Result<(), CheckError> {
        let port = self.port.as_ref();
        let locators = &self.config.locators;
        click(port, &self.waiter, &locators.sort_menu).await?;
        click(port, &self.waiter, &locators.sort_descending).await?;
        // Give the list a refresh cycle before re-reading prices.
        self.waiter
            .all_visible(port, &locators.price_display)
            .await?;
        Ok(())
    }
}
