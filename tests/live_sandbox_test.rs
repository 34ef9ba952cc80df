//! Runs against the real sandbox. Needs `API_KEY` (and optionally `BASE_URL`).
//!
//! `cargo test --test live_sandbox_test -- --ignored`

use chrono::Local;

use liteapi_qa::adapters::liteapi::client::LiteApiClient;
use liteapi_qa::config::load_config;
use liteapi_qa::config::types::Config;
use liteapi_qa::domain::lifecycle::Stage;
use liteapi_qa::domain::rates::StayDates;
use liteapi_qa::scenarios::QuoteSettings;
use liteapi_qa::scenarios::api_checks::{check_past_date_rates, check_unauthorized};
use liteapi_qa::scenarios::booking_lifecycle::{LifecyclePlan, run_booking_lifecycle};

fn sandbox_config() -> Config {
    let config = load_config(std::path::Path::new("config.yaml")).unwrap();
    assert!(
        !config.api.api_key.is_empty(),
        "set API_KEY to run the live sandbox tests"
    );
    config
}

#[tokio::test]
#[ignore = "hits the live sandbox"]
async fn live_booking_lifecycle() {
    let config = sandbox_config();
    let client = LiteApiClient::new(&config.api).unwrap();
    let stay = StayDates::from_today(Local::now().date_naive(), 1, 1).unwrap();

    let report = run_booking_lifecycle(
        &client,
        &LifecyclePlan::from_config(&config.api, "US", "New York", stay),
    )
    .await
    .unwrap();

    assert_eq!(report.last_stage(), Stage::Cancel);
}

#[tokio::test]
#[ignore = "hits the live sandbox"]
async fn live_unauthorized_request() {
    let config = sandbox_config();
    let client = LiteApiClient::new(&config.api)
        .unwrap()
        .with_api_key("invalid-key");
    let plan = LifecyclePlan::from_config(
        &config.api,
        "US",
        "New York",
        StayDates::from_today(Local::now().date_naive(), 1, 1).unwrap(),
    );

    let evidence = check_unauthorized(&client, &plan.query).await.unwrap();
    assert!(evidence.status == 401 || evidence.status == 403);
}

#[tokio::test]
#[ignore = "hits the live sandbox"]
async fn live_past_date_rates_follow_policy() {
    let config = sandbox_config();
    let client = LiteApiClient::new(&config.api).unwrap();
    let today = Local::now().date_naive();
    let plan = LifecyclePlan::from_config(
        &config.api,
        "US",
        "New York",
        StayDates::from_today(today, 1, 1).unwrap(),
    );
    let hotel = liteapi_qa::scenarios::booking_lifecycle::search_step(&client, &plan.query)
        .await
        .unwrap();

    check_past_date_rates(
        &client,
        hotel.hotel_id().clone(),
        StayDates::in_past(today, 30, 1).unwrap(),
        &QuoteSettings::from_config(&config.api),
        config.expectations.past_date_rates,
    )
    .await
    .unwrap();
}
