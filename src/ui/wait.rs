//! Bounded polling over page snapshots.
//!
//! Every wait re-reads the page at `poll` intervals until its condition holds
//! or `timeout` passes. An expired wait is [`QaError::Timeout`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::error::{QaError, Result};
use crate::ports::browser::{BrowserPage, ElementInfo};
use crate::ui::locator::Locator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll: Duration) -> Self {
        Self { timeout, poll }
    }

    pub fn from_millis(timeout_ms: u64, poll_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(poll_ms.max(1)),
        )
    }
}

/// Run `probe` until it yields a value. Errors from `probe` end the wait.
pub async fn poll_until<T, F, Fut>(policy: WaitPolicy, what: &str, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = Instant::now() + policy.timeout;
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(QaError::Timeout {
                what: what.to_string(),
                waited: policy.timeout,
            });
        }
        trace!(what, "Condition not met yet");
        tokio::time::sleep(policy.poll.min(deadline - now)).await;
    }
}

/// The locator's element if it is visible right now.
pub async fn visible_now<P>(page: &P, locator: &Locator) -> Result<Option<ElementInfo>>
where
    P: BrowserPage + ?Sized,
{
    let snapshot = page.snapshot().await?;
    Ok(locator
        .resolve(&snapshot)?
        .filter(|e| e.visible)
        .cloned())
}

pub async fn until_visible<P>(
    page: &P,
    locator: &Locator,
    policy: WaitPolicy,
) -> Result<ElementInfo>
where
    P: BrowserPage + ?Sized,
{
    let what = format!("{locator} to be visible");
    poll_until(policy, &what, || visible_now(page, locator)).await
}

pub async fn until_hidden<P>(page: &P, locator: &Locator, policy: WaitPolicy) -> Result<()>
where
    P: BrowserPage + ?Sized,
{
    let what = format!("{locator} to be hidden");
    poll_until(policy, &what, || async move {
        Ok::<_, QaError>(visible_now(page, locator).await?.is_none().then_some(()))
    })
    .await
}

/// Like [`until_visible`], but an expired wait is `Ok(None)`.
pub async fn visible_within<P>(
    page: &P,
    locator: &Locator,
    policy: WaitPolicy,
) -> Result<Option<ElementInfo>>
where
    P: BrowserPage + ?Sized,
{
    match until_visible(page, locator, policy).await {
        Ok(element) => Ok(Some(element)),
        Err(QaError::Timeout { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Wait until the current URL contains `needle`; returns that URL.
pub async fn until_url<P>(page: &P, needle: &str, policy: WaitPolicy) -> Result<String>
where
    P: BrowserPage + ?Sized,
{
    let what = format!("URL to contain \"{needle}\"");
    poll_until(policy, &what, || async move {
        let url = page.current_url().await?;
        Ok::<_, QaError>(url.contains(needle).then_some(url))
    })
    .await
}

pub async fn click<P>(page: &P, locator: &Locator, policy: WaitPolicy) -> Result<()>
where
    P: BrowserPage + ?Sized,
{
    let element = until_visible(page, locator, policy).await?;
    page.click(&element).await
}
