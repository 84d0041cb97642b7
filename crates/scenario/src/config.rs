//! Run configuration: bounds, budgets and the locator profile. Every field
//! has a built-in default aimed at the xe.gr property portal; a YAML file
//! overrides any subset of them.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use listcheck_actions::Waiter;
use listcheck_core_types::Locator;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Inclusive numeric bounds for a filter field.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub base_url: String,
    /// Seed text typed into the area search box.
    pub search_term: String,
    pub price: Bounds,
    pub size: Bounds,
    /// Upper bound on gallery image counters per listing.
    pub image_ceiling: i64,
    /// Wait budget per condition.
    pub timeout_ms: u64,
    /// Polling cadence inside a wait.
    pub poll_ms: u64,
    /// Pause between scroll steps while loading lazy results.
    pub scroll_settle_ms: u64,
    /// Cap on how many listings the reveal pass visits; `None` visits all.
    pub max_listings: Option<usize>,
    pub locators: LocatorMap,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.xe.gr/".into(),
            search_term: "Παγκράτι".into(),
            price: Bounds { min: 200, max: 700 },
            size: Bounds { min: 75, max: 150 },
            image_ceiling: 30,
            timeout_ms: 10_000,
            poll_ms: 500,
            scroll_settle_ms: 1_500,
            max_listings: None,
            locators: LocatorMap::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn waiter(&self) -> Waiter {
        Waiter::new(
            Duration::from_millis(self.timeout_ms),
            Duration::from_millis(self.poll_ms),
        )
    }
}

/// Semantic names for every element the scenario touches. Keeping these in
/// one place means a portal redesign is a config edit, not a code change.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorMap {
    pub cookie_accept: Locator,
    pub search_input: Locator,
    pub suggestion_panel: Locator,
    pub suggestion_option: Locator,
    pub area_confirm: Locator,
    pub search_submit: Locator,
    pub filter_menu: Locator,
    pub price_min_input: Locator,
    pub price_max_input: Locator,
    pub size_tab: Locator,
    pub size_min_input: Locator,
    pub size_max_input: Locator,
    pub filter_dismiss: Locator,
    pub price_display: Locator,
    pub title_display: Locator,
    pub sort_menu: Locator,
    pub sort_descending: Locator,
    pub listing_card: Locator,
    pub listing_image: Locator,
    pub gallery_counter: Locator,
    pub reveal_trigger: Locator,
    pub reveal_confirmation: Locator,
    pub modal_close: Locator,
}

impl Default for LocatorMap {
    fn default() -> Self {
        Self {
            cookie_accept: Locator::css("#qc-cmp2-ui div:nth-of-type(2) > div > button:nth-of-type(3)"),
            search_input: Locator::field("geo_place_id"),
            suggestion_panel: Locator::css("div[data-testid=\"geo_place_id_dropdown_panel\"]"),
            suggestion_option: Locator::css("div[data-testid=\"geo_place_id_dropdown_panel\"] button"),
            area_confirm: Locator::css("button.area-tag-button"),
            search_submit: Locator::css("input[value=\"Αναζήτηση\"]"),
            filter_menu: Locator::css("main > div > div > div > div:nth-of-type(2) button"),
            price_min_input: Locator::field("minimum_price"),
            price_max_input: Locator::field("maximum_price"),
            size_tab: Locator::text_contains("Τετραγωνικά"),
            size_min_input: Locator::field("minimum_size"),
            size_max_input: Locator::field("maximum_size"),
            filter_dismiss: Locator::css("main > div > div > div > div:nth-of-type(2)"),
            price_display: Locator::css("span.property-ad-price[data-testid=\"property-ad-price\"]"),
            title_display: Locator::css("h3[data-testid*=\"property-ad-title\"]"),
            sort_menu: Locator::css("main > div > div > div > div:nth-of-type(3) button"),
            sort_descending: Locator::text_contains("Τιμή (φθίνουσα)"),
            listing_card: Locator::css("div.lazyload-wrapper.cell"),
            listing_image: Locator::css("img"),
            gallery_counter: Locator::css("section .image-gallery button span"),
            reveal_trigger: Locator::text_contains("Προβολή τηλεφώνου"),
            reveal_confirmation: Locator::text_contains("+30"),
            modal_close: Locator::css("button.close-button"),
        }
    }
}
