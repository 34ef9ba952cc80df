use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapters::chromium::page::ChromiumPage;
use crate::config::types::UiConfig;
use crate::error::{QaError, Result};

/// A launched Chrome plus the task pumping its CDP connection.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromiumSession {
    pub async fn launch(config: &UiConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder().window_size(1366, 900);
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(QaError::Config)?;

        let (browser, mut events) = Browser::launch(browser_config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    warn!(error = %e, "Browser event stream error");
                }
            }
            debug!("Browser event stream closed");
        });

        info!(headless = config.headless, "Browser launched");
        Ok(Self { browser, handler })
    }

    pub async fn new_page(&self) -> Result<ChromiumPage> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(ChromiumPage::new(page))
    }

    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Browser process did not exit cleanly");
        }
        self.handler.abort();
        info!("Browser closed");
        Ok(())
    }
}
