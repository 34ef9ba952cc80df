pub mod home_page;
pub mod hotel_details_page;
pub mod locator;
pub mod results_page;
pub mod wait;

use std::time::Duration;

use crate::config::types::UiConfig;
use crate::ui::wait::WaitPolicy;

/// Per-wait bounds derived from [`UiConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    pub typing_delay: Duration,
    pub cookie_banner: WaitPolicy,
    pub suggestion: WaitPolicy,
    pub results: WaitPolicy,
    pub no_results: WaitPolicy,
    pub details: WaitPolicy,
    pub action: WaitPolicy,
}

impl UiTimings {
    pub fn from_config(config: &UiConfig) -> Self {
        let poll = config.poll_interval_ms;
        Self {
            typing_delay: Duration::from_millis(config.typing_delay_ms),
            cookie_banner: WaitPolicy::from_millis(config.cookie_banner_timeout_ms, poll),
            suggestion: WaitPolicy::from_millis(config.suggestion_timeout_ms, poll),
            results: WaitPolicy::from_millis(config.results_timeout_ms, poll),
            no_results: WaitPolicy::from_millis(config.no_results_timeout_ms, poll),
            details: WaitPolicy::from_millis(config.details_timeout_ms, poll),
            action: WaitPolicy::from_millis(config.action_timeout_ms, poll),
        }
    }
}
