use tracing::info;

use crate::error::Result;
use crate::ports::browser::{BrowserPage, ElementInfo};
use crate::ui::UiTimings;
use crate::ui::locator::Locator;
use crate::ui::wait;

/// First control that starts a reservation, whatever the site calls it.
pub fn book_button() -> Locator {
    Locator::role("button")
        .name_any_of(&["Reserve", "Book", "Select"])
        .first()
}

pub struct HotelDetailsPage<'a, P: BrowserPage + ?Sized> {
    page: &'a P,
    timings: UiTimings,
}

impl<'a, P: BrowserPage + ?Sized> HotelDetailsPage<'a, P> {
    pub fn new(page: &'a P, timings: UiTimings) -> Self {
        Self { page, timings }
    }

    /// The URL must move to a `hotels/<id>` path. Returns it.
    pub async fn verify_loaded(&self) -> Result<String> {
        let url = wait::until_url(self.page, "hotels/", self.timings.details).await?;
        info!(url = %url, "Hotel details page loaded");
        Ok(url)
    }

    pub async fn expect_book_button(&self) -> Result<ElementInfo> {
        wait::until_visible(self.page, &book_button(), self.timings.action).await
    }
}
