use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::adapters::liteapi::envelope::{self, NO_AVAILABILITY_CODE};
use crate::config::types::ApiConfig;
use crate::domain::booking::{
    BookRequest, BookingConfirmation, Cancellation, Holder, Payment, PrebookSession,
};
use crate::domain::hotel::{HotelQuery, HotelSummary};
use crate::domain::ids::{BookingId, OfferId, PrebookId};
use crate::domain::rates::{HotelRates, RatesRequest};
use crate::error::{QaError, Result};
use crate::ports::booking_api::BookingApi;

const API_KEY_HEADER: &str = "X-API-Key";

/// reqwest client for the booking API.
#[derive(Clone)]
pub struct LiteApiClient {
    http: Client,
    base_url: String,
    booking_base_url: String,
    api_key: String,
    payment_method: String,
}

impl LiteApiClient {
    pub fn new(config: &ApiConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        if config.api_key.is_empty() {
            warn!("No API key configured; every call will be unauthorized");
        }

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            booking_base_url: config.booking_base_url().to_string(),
            api_key: config.api_key.clone(),
            payment_method: config.payment_method.clone(),
        })
    }

    /// Same client, different credential. Used for the unauthorized checks.
    #[must_use]
    pub fn with_api_key(&self, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..self.clone()
        }
    }

    fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(base.trim_end_matches('/'))?;
        url.path_segments_mut()
            .map_err(|()| QaError::Config(format!("base URL '{base}' cannot carry a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// The key header, or the request untouched when no key is set so the
    /// call goes out without credentials.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.api_key.trim().is_empty() {
            request
        } else {
            request.header(API_KEY_HEADER, &self.api_key)
        }
    }

    /// Send with the API key attached and return the body of a 2xx response.
    ///
    /// Non-success responses are logged with their raw body before being
    /// turned into an error.
    async fn send(&self, label: &str, request: RequestBuilder) -> Result<String> {
        let response = self
            .authorize(request)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(QaError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(QaError::Http)?;
        debug!(
            endpoint = label,
            status = status.as_u16(),
            body_len = body.len(),
            "Response received"
        );
        trace!(endpoint = label, body = %body, "Raw response");

        if status.is_success() {
            return Ok(body);
        }

        warn!(endpoint = label, status = status.as_u16(), body = %body, "Request failed");
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(QaError::Unauthorized {
                endpoint: label.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Err(QaError::ApiStatus {
            endpoint: label.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl BookingApi for LiteApiClient {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelSummary>> {
        const LABEL: &str = "GET /data/hotels";
        query.validate()?;

        let mut url = Self::endpoint(&self.base_url, &["data", "hotels"])?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());

        let body = self.send(LABEL, self.http.get(url)).await?;
        let hotels: Vec<HotelSummary> = envelope::decode(LABEL, &body)?;
        debug!(
            country = %query.country_code,
            city = %query.city_name,
            count = hotels.len(),
            "Hotels fetched"
        );
        Ok(hotels)
    }

    async fn get_rates(&self, request: &RatesRequest) -> Result<Vec<HotelRates>> {
        const LABEL: &str = "POST /hotels/rates";
        request.validate()?;

        let url = Self::endpoint(&self.base_url, &["hotels", "rates"])?;
        let body = self.send(LABEL, self.http.post(url).json(request)).await?;

        match envelope::decode::<Vec<HotelRates>>(LABEL, &body) {
            Ok(rates) => Ok(rates),
            Err(QaError::Api {
                code: NO_AVAILABILITY_CODE,
                description,
                ..
            }) => {
                info!(%description, "No availability for the requested stay");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn prebook(&self, offer_id: &OfferId) -> Result<PrebookSession> {
        const LABEL: &str = "POST /rates/prebook";

        let url = Self::endpoint(&self.booking_base_url, &["rates", "prebook"])?;
        let payload = serde_json::json!({ "offerId": offer_id });
        let body = self.send(LABEL, self.http.post(url).json(&payload)).await?;
        envelope::decode(LABEL, &body)
    }

    async fn book(&self, prebook_id: &PrebookId, holder: &Holder) -> Result<BookingConfirmation> {
        const LABEL: &str = "POST /rates/book";
        holder.validate()?;

        let url = Self::endpoint(&self.booking_base_url, &["rates", "book"])?;
        let payload = BookRequest {
            prebook_id,
            holder,
            payment: Payment {
                method: self.payment_method.clone(),
            },
        };
        let body = self.send(LABEL, self.http.post(url).json(&payload)).await?;
        envelope::decode(LABEL, &body)
    }

    async fn cancel_booking(&self, booking_id: &BookingId) -> Result<Cancellation> {
        const LABEL: &str = "DELETE /bookings/{id}";

        let url = Self::endpoint(&self.booking_base_url, &["bookings", booking_id.as_str()])?;
        let body = self.send(LABEL, self.http.delete(url)).await?;
        envelope::decode(LABEL, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_segments_onto_versioned_base() {
        let url = LiteApiClient::endpoint("https://api.liteapi.travel/v3.0", &["data", "hotels"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.liteapi.travel/v3.0/data/hotels");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let url =
            LiteApiClient::endpoint("https://api.liteapi.travel/v3.0/", &["rates", "prebook"])
                .unwrap();
        assert_eq!(url.as_str(), "https://api.liteapi.travel/v3.0/rates/prebook");
    }

    #[test]
    fn endpoint_encodes_booking_id_segment() {
        let url = LiteApiClient::endpoint("http://localhost:1234", &["bookings", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/bookings/a%2Fb%20c");
    }

    #[test]
    fn endpoint_rejects_garbage_base() {
        assert!(LiteApiClient::endpoint("not a url", &["data"]).is_err());
    }

    #[test]
    fn blank_key_sends_no_key_header() {
        let client = LiteApiClient::new(&ApiConfig::default())
            .unwrap()
            .with_api_key("  ");
        let request = client
            .authorize(client.http.get("http://localhost/data/hotels"))
            .build()
            .unwrap();
        assert!(request.headers().get(API_KEY_HEADER).is_none());

        let keyed = client.with_api_key("k");
        let request = keyed
            .authorize(keyed.http.get("http://localhost/data/hotels"))
            .build()
            .unwrap();
        assert_eq!(request.headers()[API_KEY_HEADER], "k");
    }

    #[test]
    fn with_api_key_only_swaps_the_key() {
        let config = ApiConfig {
            api_key: "good".into(),
            ..Default::default()
        };
        let client = LiteApiClient::new(&config).unwrap();
        let other = client.with_api_key("bad");
        assert_eq!(other.api_key, "bad");
        assert_eq!(other.base_url, client.base_url);
        assert_eq!(client.api_key, "good");
    }
}
