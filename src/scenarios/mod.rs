pub mod api_checks;
pub mod api_suite;
pub mod booking_lifecycle;
pub mod ui_search;

use crate::config::types::ApiConfig;
use crate::domain::ids::HotelId;
use crate::domain::rates::{Occupancy, RatesRequest, StayDates};

/// Fixed part of every rates request: who is staying and how they pay.
#[derive(Debug, Clone)]
pub struct QuoteSettings {
    pub occupancy: Occupancy,
    pub currency: String,
    pub guest_nationality: String,
}

impl QuoteSettings {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            occupancy: config.occupancy.clone(),
            currency: config.currency.clone(),
            guest_nationality: config.guest_nationality.clone(),
        }
    }

    pub fn request(&self, hotel_ids: Vec<HotelId>, stay: StayDates) -> RatesRequest {
        RatesRequest::new(
            hotel_ids,
            stay,
            self.occupancy.clone(),
            &self.currency,
            &self.guest_nationality,
        )
    }
}
