use serde::{Deserialize, Serialize};

use crate::domain::ids::HotelId;
use crate::error::{QaError, Result};

/// Location query for `GET /data/hotels`.
#[derive(Debug, Clone)]
pub struct HotelQuery {
    pub country_code: String,
    pub city_name: String,
    pub limit: u32,
}

impl HotelQuery {
    pub fn new(country_code: impl Into<String>, city_name: impl Into<String>, limit: u32) -> Self {
        Self {
            country_code: country_code.into(),
            city_name: city_name.into(),
            limit,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.country_code.trim().is_empty() {
            return Err(QaError::InvalidInput {
                reason: "country code is required".into(),
            });
        }
        if self.city_name.trim().is_empty() {
            return Err(QaError::InvalidInput {
                reason: "city name is required".into(),
            });
        }
        if self.limit == 0 {
            return Err(QaError::InvalidInput {
                reason: "limit must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("countryCode", self.country_code.clone()),
            ("cityName", self.city_name.clone()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    pub id: HotelId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub stars: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl std::fmt::Display for HotelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("(unnamed hotel)"))?;
        if let Some(ref city) = self.city {
            write!(f, ", {city}")?;
        }
        write!(f, " [{}]", self.id)
    }
}
