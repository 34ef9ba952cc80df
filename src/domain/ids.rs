//! Identifiers handed from one booking stage to the next.
//!
//! Each one wraps the opaque string the API produced. Blank values are
//! rejected on construction and when decoding a response, so a malformed
//! payload fails where it is read rather than at the next call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QaError, Result};

macro_rules! stage_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(QaError::InvalidInput {
                        reason: concat!($label, " must be a non-empty string").into(),
                    });
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = QaError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

stage_id!(
    /// Hotel identifier from the search response.
    HotelId,
    "hotel id"
);
stage_id!(
    /// Opaque token for one priced room/rate combination of a hotel and stay.
    OfferId,
    "offer id"
);
stage_id!(
    /// Short-lived pre-book session token; single use.
    PrebookId,
    "prebook id"
);
stage_id!(
    /// Durable reservation identifier, valid until cancelled.
    BookingId,
    "booking id"
);

impl OfferId {
    /// Leading characters of the token, for log lines. Offer ids run to
    /// several hundred characters.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(20) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}
