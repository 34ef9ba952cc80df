use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing_subscriber::EnvFilter;

use liteapi_qa::adapters::chromium::page::ChromiumPage;
use liteapi_qa::adapters::chromium::session::ChromiumSession;
use liteapi_qa::adapters::liteapi::client::LiteApiClient;
use liteapi_qa::config::load_config;
use liteapi_qa::config::types::Config;
use liteapi_qa::domain::rates::StayDates;
use liteapi_qa::error::QaError;
use liteapi_qa::scenarios::api_suite::{ApiSuite, run_api_suite};
use liteapi_qa::scenarios::booking_lifecycle::LifecyclePlan;
use liteapi_qa::scenarios::ui_search;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Api,
    Ui,
    All,
}

impl Mode {
    fn parse(arg: Option<&str>) -> Result<Self> {
        match arg {
            None | Some("api") => Ok(Self::Api),
            Some("ui") => Ok(Self::Ui),
            Some("all") => Ok(Self::All),
            Some(other) => bail!("unknown mode '{other}', expected api | ui | all"),
        }
    }
}

fn find_config_path() -> PathBuf {
    let candidates = [
        PathBuf::from("config.yaml"),
        binary_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn run_api(config: &Config) -> Result<()> {
    let client = LiteApiClient::new(&config.api).context("failed to build HTTP client")?;
    let today = Local::now().date_naive();

    let without_key = client.with_api_key("");
    let with_invalid_key = client.with_api_key("invalid-key");
    let stay = StayDates::from_today(today, 1, 1)?;

    let suite = ApiSuite {
        api: &client,
        without_key: &without_key,
        with_invalid_key: &with_invalid_key,
        plan: LifecyclePlan::from_config(&config.api, "US", "New York", stay),
        past_stay: StayDates::in_past(today, 30, 1)?,
        past_date_policy: config.expectations.past_date_rates,
    };
    let report = run_api_suite(&suite).await;

    let failed: Vec<&str> = report.failures().map(|(name, _)| name).collect();
    if !failed.is_empty() {
        bail!("{} API check(s) failed: {}", failed.len(), failed.join(", "));
    }
    tracing::info!(checks = report.checks.len(), "API checks passed");
    Ok(())
}

async fn close_page(page: ChromiumPage) {
    if let Err(e) = page.close().await {
        tracing::warn!(error = %e, "Failed to close page");
    }
}

async fn run_ui(config: &Config) -> Result<()> {
    let session = ChromiumSession::launch(&config.ui)
        .await
        .context("failed to launch browser")?;

    let result = async {
        let page = session.new_page().await?;
        let outcome = ui_search::search_valid_city(&page, &config.ui, ui_search::VALID_CITY).await;
        close_page(page).await;
        outcome?;

        let page = session.new_page().await?;
        let outcome =
            ui_search::search_invalid_city(&page, &config.ui, ui_search::INVALID_CITY).await;
        close_page(page).await;
        outcome?;

        let page = session.new_page().await?;
        let outcome = ui_search::mobile_layout(&page, &config.ui).await;
        close_page(page).await;
        outcome?;

        let page = session.new_page().await?;
        let outcome =
            ui_search::open_first_hotel(&page, &config.ui, ui_search::VALID_CITY).await;
        close_page(page).await;
        outcome?;
        Ok::<_, QaError>(())
    }
    .await;

    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Failed to close browser");
    }
    result.context("UI scenario failed")?;
    tracing::info!("UI scenarios passed");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mode = Mode::parse(std::env::args().nth(1).as_deref())?;
    tracing::info!(?mode, "Starting liteapi-qa");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    if matches!(mode, Mode::Api | Mode::All) {
        run_api(&config).await?;
    }
    if matches!(mode, Mode::Ui | Mode::All) {
        run_ui(&config).await?;
    }

    Ok(())
}
