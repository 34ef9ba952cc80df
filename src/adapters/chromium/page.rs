use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::element::Element;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, trace};

use crate::error::{QaError, Result};
use crate::ports::browser::{BrowserPage, ElementInfo, Viewport};

const DOM_SCRIPT: &str = include_str!("dom.js");

#[derive(Deserialize)]
struct Marked {
    element: Option<ElementInfo>,
}

/// [`BrowserPage`] over a Chrome tab.
///
/// Snapshots enumerate role-bearing elements in document order. Actions
/// re-find the element by that index, tag it with a one-off attribute and
/// hand the tagged node to CDP.
pub struct ChromiumPage {
    page: Page,
    marks: AtomicU64,
}

impl ChromiumPage {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            marks: AtomicU64::new(0),
        }
    }

    /// Close the tab.
    pub async fn close(self) -> Result<()> {
        self.page.close().await?;
        debug!("Page closed");
        Ok(())
    }

    async fn run<T: DeserializeOwned>(&self, command: &str, arg: serde_json::Value) -> Result<T> {
        let expression = format!("({DOM_SCRIPT})({}, {arg})", json!(command));
        let result = self.page.evaluate_expression(expression).await?;
        Ok(result.into_value()?)
    }

    /// Locate `element` in the live DOM, failing if it moved or vanished.
    async fn target(&self, element: &ElementInfo) -> Result<Element> {
        let token = format!("qa-{}", self.marks.fetch_add(1, Ordering::Relaxed));
        let marked: Marked = self
            .run("mark", json!({ "index": element.index, "token": token }))
            .await?;

        let describe = || format!("{} \"{}\" #{}", element.role, element.name, element.index);
        match marked.element {
            None => Err(QaError::ElementNotFound {
                locator: describe(),
            }),
            Some(c) if c.role != element.role || c.name != element.name => {
                Err(QaError::StaleElement {
                    locator: describe(),
                })
            }
            Some(_) => {
                trace!(token, "Element marked");
                Ok(self
                    .page
                    .find_element(format!("[data-qa-target=\"{token}\"]"))
                    .await?)
            }
        }
    }
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!(url, "Navigating");
        self.page.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            if viewport.mobile { 3.0 } else { 1.0 },
            viewport.mobile,
        );
        self.page.execute(params).await?;
        debug!(width = viewport.width, height = viewport.height, "Viewport set");
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<ElementInfo>> {
        let elements: Vec<ElementInfo> = self.run("snapshot", serde_json::Value::Null).await?;
        trace!(count = elements.len(), "Snapshot taken");
        Ok(elements)
    }

    async fn click(&self, element: &ElementInfo) -> Result<()> {
        self.target(element).await?.click().await?;
        Ok(())
    }

    async fn type_text(&self, element: &ElementInfo, text: &str, delay: Duration) -> Result<()> {
        let input = self.target(element).await?;
        input.focus().await?;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            input.type_str(ch.encode_utf8(&mut buf)).await?;
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn press_key(&self, element: &ElementInfo, key: &str) -> Result<()> {
        self.target(element).await?.press_key(key).await?;
        Ok(())
    }
}
