//! Search scenarios against the customer-facing site.

use tracing::info;

use crate::config::types::UiConfig;
use crate::error::{QaError, Result};
use crate::ports::browser::{BrowserPage, Viewport};
use crate::ui::UiTimings;
use crate::ui::home_page::{HomePage, SuggestionMode};
use crate::ui::results_page::SearchOutcome;
use crate::ui::wait;

pub const VALID_CITY: &str = "Paris";
pub const INVALID_CITY: &str = "InvalidCity123";

/// Marker in the URL of the results view.
pub const RESULTS_URL_MARKER: &str = "hotels?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub url: String,
    pub results: usize,
}

/// Select a suggested destination, submit, and expect hotels listed.
pub async fn search_valid_city<P>(page: &P, config: &UiConfig, city: &str) -> Result<SearchReport>
where
    P: BrowserPage + ?Sized,
{
    let timings = UiTimings::from_config(config);
    let home = HomePage::new(page, config);
    home.navigate().await?;
    home.search_hotel(city, SuggestionMode::Select).await?;
    home.click_search().await?;

    let url = wait::until_url(page, RESULTS_URL_MARKER, timings.results).await?;
    match home.results().wait_for_outcome(timings.results).await? {
        SearchOutcome::Results(results) => {
            info!(city, results, "Search found hotels");
            Ok(SearchReport { url, results })
        }
        SearchOutcome::NoResults => Err(QaError::Expectation {
            reason: format!("search for {city} showed the no-results heading"),
        }),
    }
}

/// Submit free text with Enter and expect the no-results heading, alone.
pub async fn search_invalid_city<P>(page: &P, config: &UiConfig, city: &str) -> Result<()>
where
    P: BrowserPage + ?Sized,
{
    let timings = UiTimings::from_config(config);
    let home = HomePage::new(page, config);
    home.navigate().await?;
    home.search_hotel(city, SuggestionMode::SubmitWithEnter).await?;

    match home.results().wait_for_outcome(timings.no_results).await? {
        SearchOutcome::NoResults => {
            info!(city, "No-results heading shown");
            Ok(())
        }
        SearchOutcome::Results(n) => Err(QaError::Expectation {
            reason: format!("search for {city} listed {n} hotels"),
        }),
    }
}

/// Search controls stay usable on a phone-sized viewport.
pub async fn mobile_layout<P>(page: &P, config: &UiConfig) -> Result<()>
where
    P: BrowserPage + ?Sized,
{
    let viewport = Viewport {
        width: config.mobile_viewport.width,
        height: config.mobile_viewport.height,
        mobile: true,
    };
    page.set_viewport(viewport).await?;

    let home = HomePage::new(page, config);
    home.navigate().await?;
    home.verify_mobile_layout().await?;
    info!(width = viewport.width, height = viewport.height, "Mobile layout verified");
    Ok(())
}

/// From a successful search, open the first hotel and find its book control.
pub async fn open_first_hotel<P>(page: &P, config: &UiConfig, city: &str) -> Result<String>
where
    P: BrowserPage + ?Sized,
{
    search_valid_city(page, config, city).await?;

    let results = HomePage::new(page, config).results();
    let listed = results.count_results().await?;
    info!(city, listed, "Opening first of the listed hotels");
    let details = results.open_hotel(0).await?;
    let url = details.verify_loaded().await?;
    let button = details.expect_book_button().await?;
    info!(url = %url, button = %button.name, "Hotel details ready to book");
    Ok(url)
}
