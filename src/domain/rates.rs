use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{HotelId, OfferId};
use crate::error::{QaError, Result};

/// Check-in/check-out pair. Check-out is always after check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    checkin: NaiveDate,
    checkout: NaiveDate,
}

impl StayDates {
    pub fn new(checkin: NaiveDate, checkout: NaiveDate) -> Result<Self> {
        if checkout <= checkin {
            return Err(QaError::InvalidInput {
                reason: format!("checkout {checkout} must be after checkin {checkin}"),
            });
        }
        Ok(Self { checkin, checkout })
    }

    /// Stay of `nights` starting `days_ahead` days after `today`.
    /// `from_today(today, 1, 1)` is tomorrow to the day after.
    pub fn from_today(today: NaiveDate, days_ahead: u64, nights: u64) -> Result<Self> {
        let checkin = today
            .checked_add_days(Days::new(days_ahead))
            .ok_or_else(|| QaError::InvalidInput {
                reason: format!("checkin {days_ahead} days after {today} is out of range"),
            })?;
        let checkout = checkin
            .checked_add_days(Days::new(nights))
            .ok_or_else(|| QaError::InvalidInput {
                reason: format!("checkout {nights} nights after {checkin} is out of range"),
            })?;
        Self::new(checkin, checkout)
    }

    /// Stay that ended `days_ago` days before `today`.
    pub fn in_past(today: NaiveDate, days_ago: u64, nights: u64) -> Result<Self> {
        let checkout = today
            .checked_sub_days(Days::new(days_ago))
            .ok_or_else(|| QaError::InvalidInput {
                reason: format!("checkout {days_ago} days before {today} is out of range"),
            })?;
        let checkin = checkout
            .checked_sub_days(Days::new(nights))
            .ok_or_else(|| QaError::InvalidInput {
                reason: format!("checkin {nights} nights before {checkout} is out of range"),
            })?;
        Self::new(checkin, checkout)
    }

    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    pub fn checkout(&self) -> NaiveDate {
        self.checkout
    }

    pub fn nights(&self) -> i64 {
        (self.checkout - self.checkin).num_days()
    }

    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.checkin > today
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub adults: u32,
    /// Ages of the children in the room.
    #[serde(default)]
    pub children: Vec<u32>,
}

/// Body of `POST /hotels/rates`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesRequest {
    pub hotel_ids: Vec<HotelId>,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub occupancies: Vec<Occupancy>,
    pub currency: String,
    pub guest_nationality: String,
}

impl RatesRequest {
    pub fn new(
        hotel_ids: Vec<HotelId>,
        stay: StayDates,
        occupancy: Occupancy,
        currency: impl Into<String>,
        guest_nationality: impl Into<String>,
    ) -> Self {
        Self {
            hotel_ids,
            checkin: stay.checkin(),
            checkout: stay.checkout(),
            occupancies: vec![occupancy],
            currency: currency.into(),
            guest_nationality: guest_nationality.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hotel_ids.is_empty() {
            return Err(QaError::InvalidInput {
                reason: "at least one hotel id is required".into(),
            });
        }
        if self.occupancies.is_empty() || self.occupancies.iter().any(|o| o.adults == 0) {
            return Err(QaError::InvalidInput {
                reason: "every occupancy needs at least one adult".into(),
            });
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(QaError::InvalidInput {
                reason: format!("currency '{}' is not an ISO 4217 code", self.currency),
            });
        }
        if self.guest_nationality.len() != 2
            || !self.guest_nationality.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(QaError::InvalidInput {
                reason: format!(
                    "guest nationality '{}' is not an ISO 3166 alpha-2 code",
                    self.guest_nationality
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSummary {
    #[serde(default)]
    pub rate_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub board_name: Option<String>,
    #[serde(default)]
    pub max_occupancy: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub offer_id: OfferId,
    #[serde(default)]
    pub room_type_id: Option<String>,
    #[serde(default)]
    pub offer_retail_rate: Option<Money>,
    #[serde(default)]
    pub rates: Vec<RateSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRates {
    pub hotel_id: HotelId,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
}

/// First-available policy: the first room type of the first hotel that has one.
pub fn first_offer(hotels: &[HotelRates]) -> Option<(&HotelId, &RoomType)> {
    hotels
        .iter()
        .find_map(|h| h.room_types.first().map(|room| (&h.hotel_id, room)))
}
