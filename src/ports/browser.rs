use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One element of the page's accessibility view.
///
/// `index` is the element's position in document order at snapshot time and
/// is what actions use to find it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub index: usize,
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub level: Option<u8>,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub mobile: bool,
}

/// A single browser tab.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;
    async fn current_url(&self) -> Result<String>;
    async fn set_viewport(&self, viewport: Viewport) -> Result<()>;
    /// Every element with an ARIA role, in document order.
    async fn snapshot(&self) -> Result<Vec<ElementInfo>>;
    async fn click(&self, element: &ElementInfo) -> Result<()>;
    /// Type `text` one character at a time, pausing `delay` after each.
    async fn type_text(&self, element: &ElementInfo, text: &str, delay: Duration) -> Result<()>;
    async fn press_key(&self, element: &ElementInfo, key: &str) -> Result<()>;
}
