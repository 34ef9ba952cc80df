use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookingId, PrebookId};
use crate::error::{QaError, Result};

/// Guest contact record attached to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    #[serde(rename = "firstName", alias = "first_name")]
    pub first_name: String,
    #[serde(rename = "lastName", alias = "last_name")]
    pub last_name: String,
    pub email: String,
}

impl Default for Holder {
    fn default() -> Self {
        Self {
            first_name: "Test".into(),
            last_name: "QA".into(),
            email: "qa@example.com".into(),
        }
    }
}

impl Holder {
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(QaError::InvalidInput {
                reason: "holder needs a first and last name".into(),
            });
        }
        let valid_email = self
            .email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(QaError::InvalidInput {
                reason: format!("holder email '{}' is not an address", self.email),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub method: String,
}

/// Body of `POST /rates/book`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest<'a> {
    pub prebook_id: &'a PrebookId,
    pub holder: &'a Holder,
    pub payment: Payment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebookSession {
    pub prebook_id: PrebookId,
    #[serde(default)]
    pub offer_id: Option<String>,
    #[serde(default)]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub hotel_confirmation_code: Option<String>,
    #[serde(default)]
    pub checkin: Option<String>,
    #[serde(default)]
    pub checkout: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cancellation_fee: Option<f64>,
    #[serde(default)]
    pub refund_amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}
