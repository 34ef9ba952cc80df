use serde::{Deserialize, Serialize};

use crate::domain::booking::Holder;
use crate::domain::rates::Occupancy;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub expectations: ExpectationsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Host for prebook/book/cancel. Falls back to `base_url` when unset.
    #[serde(default)]
    pub booking_base_url: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_nationality")]
    pub guest_nationality: String,
    #[serde(default = "default_occupancy")]
    pub occupancy: Occupancy,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default)]
    pub holder: Holder,
}

impl ApiConfig {
    pub fn booking_base_url(&self) -> &str {
        self.booking_base_url.as_deref().unwrap_or(&self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            booking_base_url: None,
            api_key: String::new(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
            search_limit: default_search_limit(),
            currency: default_currency(),
            guest_nationality: default_nationality(),
            occupancy: default_occupancy(),
            payment_method: default_payment_method(),
            holder: Holder::default(),
        }
    }
}

/// Browser session settings and the per-element wait bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_ui_base_url")]
    pub base_url: String,
    #[serde(default = "default_true")]
    pub headless: bool,
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_cookie_banner_timeout_ms")]
    pub cookie_banner_timeout_ms: u64,
    #[serde(default = "default_suggestion_timeout_ms")]
    pub suggestion_timeout_ms: u64,
    #[serde(default = "default_results_timeout_ms")]
    pub results_timeout_ms: u64,
    #[serde(default = "default_no_results_timeout_ms")]
    pub no_results_timeout_ms: u64,
    #[serde(default = "default_details_timeout_ms")]
    pub details_timeout_ms: u64,
    #[serde(default = "default_action_timeout_ms")]
    pub action_timeout_ms: u64,
    #[serde(default = "default_mobile_viewport")]
    pub mobile_viewport: ViewportConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ui_base_url(),
            headless: true,
            typing_delay_ms: default_typing_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            cookie_banner_timeout_ms: default_cookie_banner_timeout_ms(),
            suggestion_timeout_ms: default_suggestion_timeout_ms(),
            results_timeout_ms: default_results_timeout_ms(),
            no_results_timeout_ms: default_no_results_timeout_ms(),
            details_timeout_ms: default_details_timeout_ms(),
            action_timeout_ms: default_action_timeout_ms(),
            mobile_viewport: default_mobile_viewport(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ExpectationsConfig {
    #[serde(default)]
    pub past_date_rates: PastDatePolicy,
}

/// What a rates request with a check-in date in the past should yield.
///
/// Sandboxes have been seen answering 200 where production answers 400, so
/// the expectation is per environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PastDatePolicy {
    Accept,
    Reject,
    #[default]
    Either,
}

fn default_api_base_url() -> String {
    "https://api.liteapi.travel/v3.0".into()
}

fn default_user_agent() -> String {
    concat!("liteapi-qa/", env!("CARGO_PKG_VERSION")).into()
}

fn default_timeout() -> u64 {
    30
}

fn default_search_limit() -> u32 {
    10
}

fn default_currency() -> String {
    "USD".into()
}

fn default_nationality() -> String {
    "US".into()
}

fn default_occupancy() -> Occupancy {
    Occupancy {
        adults: 2,
        children: Vec::new(),
    }
}

fn default_payment_method() -> String {
    "ACC_CREDIT_CARD".into()
}

fn default_ui_base_url() -> String {
    "https://v3.nuitee.link/".into()
}

fn default_true() -> bool {
    true
}

fn default_typing_delay_ms() -> u64 {
    100
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_cookie_banner_timeout_ms() -> u64 {
    5_000
}

fn default_suggestion_timeout_ms() -> u64 {
    10_000
}

fn default_results_timeout_ms() -> u64 {
    20_000
}

fn default_no_results_timeout_ms() -> u64 {
    10_000
}

fn default_details_timeout_ms() -> u64 {
    15_000
}

fn default_action_timeout_ms() -> u64 {
    5_000
}

fn default_mobile_viewport() -> ViewportConfig {
    // iPhone 12 Pro
    ViewportConfig {
        width: 390,
        height: 844,
    }
}
