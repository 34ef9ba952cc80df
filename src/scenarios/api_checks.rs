use tracing::info;

use crate::config::types::PastDatePolicy;
use crate::domain::hotel::HotelQuery;
use crate::domain::ids::HotelId;
use crate::domain::rates::StayDates;
use crate::error::{QaError, Result};
use crate::ports::booking_api::BookingApi;
use crate::scenarios::QuoteSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedEvidence {
    pub status: u16,
    pub body: String,
}

/// A call made with a missing or invalid key must come back unauthorized
/// with a non-empty error payload.
pub async fn check_unauthorized(
    api: &dyn BookingApi,
    query: &HotelQuery,
) -> Result<UnauthorizedEvidence> {
    match api.search_hotels(query).await {
        Err(QaError::Unauthorized { status, body, .. }) => {
            if body.trim().is_empty() {
                return Err(QaError::Expectation {
                    reason: format!("unauthorized response (HTTP {status}) had an empty body"),
                });
            }
            info!(status, "Unauthorized request rejected as expected");
            Ok(UnauthorizedEvidence { status, body })
        }
        Ok(hotels) => Err(QaError::Expectation {
            reason: format!(
                "request without a valid key succeeded with {} hotels",
                hotels.len()
            ),
        }),
        Err(other) => Err(other),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastDateOutcome {
    Accepted { offers: usize },
    /// `status` is absent when the API answered 2xx with an error object.
    Rejected { status: Option<u16>, detail: String },
}

/// Ask for rates on a stay in the past and compare what the environment
/// does with the configured policy.
pub async fn check_past_date_rates(
    api: &dyn BookingApi,
    hotel_id: HotelId,
    stay: StayDates,
    quote: &QuoteSettings,
    policy: PastDatePolicy,
) -> Result<PastDateOutcome> {
    let request = quote.request(vec![hotel_id], stay);
    let outcome = match api.get_rates(&request).await {
        Ok(rates) => PastDateOutcome::Accepted {
            offers: rates.iter().map(|h| h.room_types.len()).sum(),
        },
        Err(QaError::ApiStatus { status, body, .. }) if (400..500).contains(&status) => {
            PastDateOutcome::Rejected {
                status: Some(status),
                detail: body,
            }
        }
        Err(QaError::Api {
            code, description, ..
        }) => PastDateOutcome::Rejected {
            status: None,
            detail: format!("error {code}: {description}"),
        },
        Err(other) => return Err(other),
    };

    info!(?outcome, ?policy, checkin = %stay.checkin(), "Past-date rates request");

    match (policy, &outcome) {
        (PastDatePolicy::Accept, PastDateOutcome::Rejected { detail, .. }) => {
            Err(QaError::Expectation {
                reason: format!("past-date rates were rejected ({detail}) but policy is accept"),
            })
        }
        (PastDatePolicy::Reject, PastDateOutcome::Accepted { offers }) => {
            Err(QaError::Expectation {
                reason: format!(
                    "past-date rates were accepted ({offers} offers) but policy is reject"
                ),
            })
        }
        _ => Ok(outcome),
    }
}
