pub mod chromium;
pub mod liteapi;
