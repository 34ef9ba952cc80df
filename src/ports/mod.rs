pub mod booking_api;
pub mod browser;
