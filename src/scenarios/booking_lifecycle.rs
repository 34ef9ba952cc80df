//! End-to-end booking lifecycle against a [`BookingApi`].
//!
//! Each step takes the previous stage's record and returns the next one.
//! The first failing step ends the run; nothing is retried or rolled back.

use tracing::info;

use crate::config::types::ApiConfig;
use crate::domain::booking::Holder;
use crate::domain::hotel::HotelQuery;
use crate::domain::lifecycle::{Booked, HotelSelected, LifecycleReport, OfferSelected, Prebooked};
use crate::domain::rates::StayDates;
use crate::error::Result;
use crate::ports::booking_api::BookingApi;
use crate::scenarios::QuoteSettings;

#[derive(Debug, Clone)]
pub struct LifecyclePlan {
    pub query: HotelQuery,
    pub stay: StayDates,
    pub quote: QuoteSettings,
    pub holder: Holder,
    pub cancel: bool,
}

impl LifecyclePlan {
    pub fn from_config(
        config: &ApiConfig,
        country_code: &str,
        city_name: &str,
        stay: StayDates,
    ) -> Self {
        Self {
            query: HotelQuery::new(country_code, city_name, config.search_limit),
            stay,
            quote: QuoteSettings::from_config(config),
            holder: config.holder.clone(),
            cancel: true,
        }
    }
}

pub async fn search_step(api: &dyn BookingApi, query: &HotelQuery) -> Result<HotelSelected> {
    let hotels = api.search_hotels(query).await?;
    let selected = HotelSelected::pick_first(hotels)?;
    info!(
        hotel_id = %selected.hotel_id(),
        candidates = selected.candidates,
        "1. Selected hotel from {} ({})",
        query.city_name,
        query.country_code
    );
    Ok(selected)
}

pub async fn quote_step(
    api: &dyn BookingApi,
    selected: HotelSelected,
    stay: StayDates,
    quote: &QuoteSettings,
) -> Result<OfferSelected> {
    let request = quote.request(vec![selected.hotel_id().clone()], stay);
    let rates = api.get_rates(&request).await?;
    let offer = selected.choose_offer(&rates)?;
    info!(
        checkin = %stay.checkin(),
        checkout = %stay.checkout(),
        "2. Found offer {}...",
        offer.offer_id().short()
    );
    Ok(offer)
}

pub async fn prebook_step(api: &dyn BookingApi, offer: OfferSelected) -> Result<Prebooked> {
    let session = api.prebook(offer.offer_id()).await?;
    let prebooked = offer.prebooked(session);
    info!(prebook_id = %prebooked.prebook_id(), "3. Pre-book session created");
    Ok(prebooked)
}

pub async fn book_step(
    api: &dyn BookingApi,
    prebooked: Prebooked,
    holder: &Holder,
) -> Result<Booked> {
    let confirmation = api.book(prebooked.prebook_id(), holder).await?;
    let booked = prebooked.booked(confirmation);
    info!(
        booking_id = %booked.booking_id(),
        status = booked.confirmation.status.as_deref().unwrap_or("unknown"),
        "4. Booking confirmed"
    );
    Ok(booked)
}

pub async fn cancel_step(api: &dyn BookingApi, booked: Booked) -> Result<LifecycleReport> {
    let cancellation = api.cancel_booking(booked.booking_id()).await?;
    info!(
        booking_id = %booked.booking_id(),
        status = cancellation.status.as_deref().unwrap_or("unknown"),
        "5. Booking cancelled"
    );
    Ok(booked.cancelled(cancellation))
}

pub async fn run_booking_lifecycle(
    api: &dyn BookingApi,
    plan: &LifecyclePlan,
) -> Result<LifecycleReport> {
    let selected = search_step(api, &plan.query).await?;
    let offer = quote_step(api, selected, plan.stay, &plan.quote).await?;
    let prebooked = prebook_step(api, offer).await?;
    let booked = book_step(api, prebooked, &plan.holder).await?;

    if plan.cancel {
        cancel_step(api, booked).await
    } else {
        Ok(booked.keep())
    }
}
