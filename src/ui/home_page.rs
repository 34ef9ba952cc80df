use tracing::{info, warn};
use url::Url;

use crate::config::types::UiConfig;
use crate::error::{QaError, Result};
use crate::ports::browser::{BrowserPage, ElementInfo};
use crate::ui::UiTimings;
use crate::ui::locator::Locator;
use crate::ui::results_page::ResultsPage;
use crate::ui::wait;

/// How a typed destination is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionMode {
    /// Wait for a matching suggestion and click it.
    Select,
    /// Press Enter in the input without waiting for suggestions.
    SubmitWithEnter,
}

/// Result of the best-effort cookie banner dismissal. Never fails navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerOutcome {
    Dismissed,
    NotShown,
    Failed(String),
}

pub fn search_input() -> Locator {
    Locator::role("combobox").name("Enter a destination")
}

pub fn search_button() -> Locator {
    Locator::role("button").name("Search")
}

pub fn accept_cookies_button() -> Locator {
    Locator::role("button").name("Accept")
}

pub fn no_results_heading() -> Locator {
    Locator::role("heading").name("No results found")
}

pub fn suggestion(city: &str) -> Locator {
    Locator::role("option").has_text(city).first()
}

pub struct HomePage<'a, P: BrowserPage + ?Sized> {
    page: &'a P,
    base_url: String,
    timings: UiTimings,
}

impl<'a, P: BrowserPage + ?Sized> HomePage<'a, P> {
    pub fn new(page: &'a P, config: &UiConfig) -> Self {
        Self {
            page,
            base_url: config.base_url.clone(),
            timings: UiTimings::from_config(config),
        }
    }

    /// Open the site, check we landed on its host, then clear the cookie banner.
    pub async fn navigate(&self) -> Result<BannerOutcome> {
        let base = Url::parse(&self.base_url)?;
        let host = base.host_str().ok_or_else(|| QaError::InvalidInput {
            reason: format!("UI base URL '{}' has no host", self.base_url),
        })?;

        self.page.goto(base.as_str()).await?;
        let landed = wait::until_url(self.page, host, self.timings.action).await?;
        info!(url = %landed, "Home page opened");

        Ok(self.dismiss_cookie_banner().await)
    }

    pub async fn dismiss_cookie_banner(&self) -> BannerOutcome {
        let accept = accept_cookies_button();
        let shown = wait::visible_within(self.page, &accept, self.timings.cookie_banner).await;
        let outcome = match shown {
            Ok(None) => BannerOutcome::NotShown,
            Ok(Some(button)) => match self.accept_cookies(&button, &accept).await {
                Ok(()) => BannerOutcome::Dismissed,
                Err(e) => BannerOutcome::Failed(e.to_string()),
            },
            Err(e) => BannerOutcome::Failed(e.to_string()),
        };

        match outcome {
            BannerOutcome::Failed(ref reason) => {
                warn!(reason = %reason, "Cookie banner could not be dismissed");
            }
            BannerOutcome::NotShown => info!("Cookie banner not shown"),
            BannerOutcome::Dismissed => info!("Cookie banner dismissed"),
        }
        outcome
    }

    async fn accept_cookies(&self, button: &ElementInfo, accept: &Locator) -> Result<()> {
        self.page.click(button).await?;
        wait::until_hidden(self.page, accept, self.timings.action).await
    }

    /// Focus the destination input, type `city` slowly and submit it.
    pub async fn search_hotel(&self, city: &str, mode: SuggestionMode) -> Result<()> {
        let input = search_input();
        wait::click(self.page, &input, self.timings.action).await?;

        let focused = wait::until_visible(self.page, &input, self.timings.action).await?;
        self.page
            .type_text(&focused, city, self.timings.typing_delay)
            .await?;

        match mode {
            SuggestionMode::Select => {
                let option =
                    wait::until_visible(self.page, &suggestion(city), self.timings.suggestion)
                        .await?;
                info!(suggestion = %option.name, "Selecting destination suggestion");
                self.page.click(&option).await
            }
            SuggestionMode::SubmitWithEnter => {
                let focused = wait::until_visible(self.page, &input, self.timings.action).await?;
                info!(city, "Submitting destination with Enter");
                self.page.press_key(&focused, "Enter").await
            }
        }
    }

    pub async fn click_search(&self) -> Result<()> {
        wait::click(self.page, &search_button(), self.timings.action).await
    }

    /// Search input and button must both be visible.
    pub async fn verify_mobile_layout(&self) -> Result<()> {
        for locator in [search_input(), search_button()] {
            wait::until_visible(self.page, &locator, self.timings.action)
                .await
                .map_err(|e| match e {
                    QaError::Timeout { .. } => QaError::Expectation {
                        reason: format!("{locator} not visible on mobile layout"),
                    },
                    other => other,
                })?;
        }
        Ok(())
    }

    pub fn results(&self) -> ResultsPage<'a, P> {
        ResultsPage::new(self.page, self.timings)
    }
}
