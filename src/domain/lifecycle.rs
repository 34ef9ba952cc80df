//! Booking-lifecycle context.
//!
//! search → quote → pre-book → book → (cancel). Each stage is its own type and
//! each transition consumes the previous one, so the identifier a stage needs
//! can only come from the stage before it.

use serde::Serialize;

use crate::domain::booking::{BookingConfirmation, Cancellation, PrebookSession};
use crate::domain::hotel::HotelSummary;
use crate::domain::ids::{BookingId, HotelId, OfferId, PrebookId};
use crate::domain::rates::{HotelRates, RoomType, first_offer};
use crate::error::{QaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Search,
    Quote,
    Prebook,
    Book,
    Cancel,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Quote => "quote",
            Self::Prebook => "prebook",
            Self::Book => "book",
            Self::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HotelSelected {
    pub hotel: HotelSummary,
    pub candidates: usize,
}

impl HotelSelected {
    /// Take the first hotel of a search result.
    pub fn pick_first(hotels: Vec<HotelSummary>) -> Result<Self> {
        let candidates = hotels.len();
        let hotel = hotels
            .into_iter()
            .next()
            .ok_or(QaError::NoCandidates {
                stage: Stage::Search.as_str(),
            })?;
        Ok(Self { hotel, candidates })
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel.id
    }

    pub fn choose_offer(self, rates: &[HotelRates]) -> Result<OfferSelected> {
        let (hotel_id, room) = first_offer(rates).ok_or(QaError::NoCandidates {
            stage: Stage::Quote.as_str(),
        })?;
        Ok(OfferSelected {
            hotel_id: hotel_id.clone(),
            room: room.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct OfferSelected {
    pub hotel_id: HotelId,
    pub room: RoomType,
}

impl OfferSelected {
    pub fn offer_id(&self) -> &OfferId {
        &self.room.offer_id
    }

    pub fn prebooked(self, session: PrebookSession) -> Prebooked {
        Prebooked {
            hotel_id: self.hotel_id,
            offer_id: self.room.offer_id,
            session,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prebooked {
    pub hotel_id: HotelId,
    pub offer_id: OfferId,
    pub session: PrebookSession,
}

impl Prebooked {
    pub fn prebook_id(&self) -> &PrebookId {
        &self.session.prebook_id
    }

    pub fn booked(self, confirmation: BookingConfirmation) -> Booked {
        Booked {
            hotel_id: self.hotel_id,
            offer_id: self.offer_id,
            prebook_id: self.session.prebook_id,
            confirmation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Booked {
    pub hotel_id: HotelId,
    pub offer_id: OfferId,
    pub prebook_id: PrebookId,
    pub confirmation: BookingConfirmation,
}

impl Booked {
    pub fn booking_id(&self) -> &BookingId {
        &self.confirmation.booking_id
    }

    pub fn cancelled(self, cancellation: Cancellation) -> LifecycleReport {
        self.into_report(Some(cancellation))
    }

    /// Close the lifecycle without cancelling; the reservation stays live.
    pub fn keep(self) -> LifecycleReport {
        self.into_report(None)
    }

    fn into_report(self, cancellation: Option<Cancellation>) -> LifecycleReport {
        LifecycleReport {
            hotel_id: self.hotel_id,
            offer_id: self.offer_id,
            prebook_id: self.prebook_id,
            booking_id: self.confirmation.booking_id,
            booking_status: self.confirmation.status,
            cancellation,
        }
    }
}

/// Every identifier the lifecycle produced, plus the terminal outcome.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleReport {
    pub hotel_id: HotelId,
    pub offer_id: OfferId,
    pub prebook_id: PrebookId,
    pub booking_id: BookingId,
    pub booking_status: Option<String>,
    pub cancellation: Option<Cancellation>,
}

impl LifecycleReport {
    pub fn last_stage(&self) -> Stage {
        if self.cancellation.is_some() {
            Stage::Cancel
        } else {
            Stage::Book
        }
    }
}
