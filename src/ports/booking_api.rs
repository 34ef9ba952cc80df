use async_trait::async_trait;

use crate::domain::booking::{BookingConfirmation, Cancellation, Holder, PrebookSession};
use crate::domain::hotel::{HotelQuery, HotelSummary};
use crate::domain::ids::{BookingId, OfferId, PrebookId};
use crate::domain::rates::{HotelRates, RatesRequest};
use crate::error::Result;

/// The five calls of the booking lifecycle.
///
/// Implementations do not retry; any failure is returned as-is.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelSummary>>;
    async fn get_rates(&self, request: &RatesRequest) -> Result<Vec<HotelRates>>;
    async fn prebook(&self, offer_id: &OfferId) -> Result<PrebookSession>;
    async fn book(&self, prebook_id: &PrebookId, holder: &Holder) -> Result<BookingConfirmation>;
    async fn cancel_booking(&self, booking_id: &BookingId) -> Result<Cancellation>;
}
