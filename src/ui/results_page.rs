use tracing::{debug, info};

use crate::error::{QaError, Result};
use crate::ports::browser::{BrowserPage, ElementInfo};
use crate::ui::UiTimings;
use crate::ui::home_page::no_results_heading;
use crate::ui::hotel_details_page::HotelDetailsPage;
use crate::ui::locator::Locator;
use crate::ui::wait::{self, WaitPolicy};

/// What the results view settled on after a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Number of hotel results shown.
    Results(usize),
    NoResults,
}

/// Hotel names are level-3 headings. Only those with a link of the same
/// name count as results; see [`hotel_results`].
pub fn result_headings() -> Locator {
    Locator::role("heading").level(3)
}

pub fn hotel_link(name: &str) -> Locator {
    Locator::role("link").exact_name(name).first()
}

/// Visible level-3 headings that link to a hotel of the same name.
pub fn hotel_results(snapshot: &[ElementInfo]) -> Vec<&ElementInfo> {
    result_headings()
        .select(snapshot)
        .into_iter()
        .filter(|heading| {
            heading.visible
                && hotel_link(&heading.name)
                    .select(snapshot)
                    .iter()
                    .any(|link| link.visible)
        })
        .collect()
}

pub struct ResultsPage<'a, P: BrowserPage + ?Sized> {
    page: &'a P,
    timings: UiTimings,
}

impl<'a, P: BrowserPage + ?Sized> ResultsPage<'a, P> {
    pub fn new(page: &'a P, timings: UiTimings) -> Self {
        Self { page, timings }
    }

    /// Wait until either results or the no-results heading are visible.
    /// Seeing both at once is an error.
    pub async fn wait_for_outcome(&self, policy: WaitPolicy) -> Result<SearchOutcome> {
        let page = self.page;
        let outcome = wait::poll_until(
            policy,
            "search results or no-results heading",
            || async move {
                let snapshot = page.snapshot().await?;
                classify(&snapshot)
            },
        )
        .await?;

        info!(?outcome, "Search settled");
        Ok(outcome)
    }

    /// Hotel results shown right now.
    pub async fn count_results(&self) -> Result<usize> {
        let snapshot = self.page.snapshot().await?;
        Ok(hotel_results(&snapshot).len())
    }

    /// Follow the link of the `n`th hotel result (zero-based).
    pub async fn open_hotel(&self, n: usize) -> Result<HotelDetailsPage<'a, P>> {
        let page = self.page;
        let what = format!("hotel result #{n}");
        let heading = wait::poll_until(self.timings.results, &what, || async move {
            let snapshot = page.snapshot().await?;
            Ok::<_, QaError>(hotel_results(&snapshot).get(n).map(|h| (*h).clone()))
        })
        .await
        .map_err(|e| match e {
            QaError::Timeout { .. } => QaError::ElementNotFound {
                locator: what.clone(),
            },
            other => other,
        })?;

        info!(hotel = %heading.name, position = n, "Opening hotel from results");
        wait::click(self.page, &hotel_link(&heading.name), self.timings.action).await?;
        Ok(HotelDetailsPage::new(self.page, self.timings))
    }
}

fn classify(snapshot: &[ElementInfo]) -> Result<Option<SearchOutcome>> {
    let shown = hotel_results(snapshot).len();
    let empty = no_results_heading()
        .select(snapshot)
        .iter()
        .any(|e| e.visible);
    debug!(shown, empty, "Results view poll");
    match (shown, empty) {
        (0, false) => Ok(None),
        (0, true) => Ok(Some(SearchOutcome::NoResults)),
        (n, false) => Ok(Some(SearchOutcome::Results(n))),
        (n, true) => Err(QaError::Expectation {
            reason: format!(
                "results view shows {n} result headings and the no-results heading at once"
            ),
        }),
    }
}
