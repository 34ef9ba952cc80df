use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{QaError, Result};

/// Code the rates endpoint uses for "no availability" on a 200 response.
pub const NO_AVAILABILITY_CODE: i64 = 2001;

/// Every endpoint wraps its payload as `{"data": ...}` or `{"error": {...}}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    error: Option<ApiFault>,
}

#[derive(Debug, Deserialize)]
struct ApiFault {
    #[serde(default)]
    code: i64,
    #[serde(default, alias = "message")]
    description: String,
}

/// Decode a success body into the endpoint's `data` type.
///
/// A body whose `data` does not match `T`, or that has neither `data` nor
/// `error`, is a schema error.
pub fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| QaError::Schema {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    match (envelope.data, envelope.error) {
        (Some(data), _) => Ok(data),
        (None, Some(fault)) => Err(QaError::Api {
            endpoint: endpoint.to_string(),
            code: fault.code,
            description: fault.description,
        }),
        (None, None) => Err(QaError::Schema {
            endpoint: endpoint.to_string(),
            reason: "body has neither `data` nor `error`".into(),
        }),
    }
}
