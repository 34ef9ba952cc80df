#![no_main]
use libfuzzer_sys::fuzz_target;

use liteapi_qa::domain::hotel::HotelSummary;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        let _ = liteapi_qa::adapters::liteapi::envelope::decode::<Vec<HotelSummary>>(
            "GET /data/hotels",
            body,
        );
    }
});
