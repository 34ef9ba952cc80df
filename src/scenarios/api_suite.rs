//! Every API check in one run.
//!
//! The checks are independent: a failing booking lifecycle does not skip the
//! credential checks, and the past-date check finds its own hotel when the
//! lifecycle never got one.

use tracing::{error, info};

use crate::config::types::PastDatePolicy;
use crate::domain::ids::HotelId;
use crate::domain::rates::StayDates;
use crate::error::{QaError, Result};
use crate::ports::booking_api::BookingApi;
use crate::scenarios::api_checks::{check_past_date_rates, check_unauthorized};
use crate::scenarios::booking_lifecycle::{LifecyclePlan, run_booking_lifecycle, search_step};

pub struct ApiSuite<'a> {
    pub api: &'a dyn BookingApi,
    /// Same API, no credential sent.
    pub without_key: &'a dyn BookingApi,
    /// Same API, a credential the server does not know.
    pub with_invalid_key: &'a dyn BookingApi,
    pub plan: LifecyclePlan,
    pub past_stay: StayDates,
    pub past_date_policy: PastDatePolicy,
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub checks: Vec<(&'static str, Result<()>)>,
}

impl SuiteReport {
    fn record(&mut self, name: &'static str, result: Result<()>) {
        match &result {
            Ok(()) => info!(check = name, "Check passed"),
            Err(e) => error!(check = name, error = %e, "Check failed"),
        }
        self.checks.push((name, result));
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &QaError)> {
        self.checks
            .iter()
            .filter_map(|(name, result)| result.as_ref().err().map(|e| (*name, e)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub async fn run_api_suite(suite: &ApiSuite<'_>) -> SuiteReport {
    let mut report = SuiteReport::default();

    let lifecycle = run_booking_lifecycle(suite.api, &suite.plan).await;
    let hotel_id = lifecycle.as_ref().ok().map(|r| r.hotel_id.clone());
    report.record(
        "booking lifecycle",
        lifecycle.map(|r| {
            info!(
                booking_id = %r.booking_id,
                last_stage = %r.last_stage(),
                "Booking lifecycle finished"
            );
        }),
    );

    report.record(
        "missing key",
        check_unauthorized(suite.without_key, &suite.plan.query)
            .await
            .map(drop),
    );
    report.record(
        "invalid key",
        check_unauthorized(suite.with_invalid_key, &suite.plan.query)
            .await
            .map(drop),
    );

    report.record("past-date rates", past_date_check(suite, hotel_id).await);
    report
}

async fn past_date_check(suite: &ApiSuite<'_>, hotel_id: Option<HotelId>) -> Result<()> {
    let hotel_id = match hotel_id {
        Some(id) => id,
        None => search_step(suite.api, &suite.plan.query)
            .await?
            .hotel_id()
            .clone(),
    };
    check_past_date_rates(
        suite.api,
        hotel_id,
        suite.past_stay,
        &suite.plan.quote,
        suite.past_date_policy,
    )
    .await
    .map(drop)
}
