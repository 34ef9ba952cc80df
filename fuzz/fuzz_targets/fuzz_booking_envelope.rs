#![no_main]
use libfuzzer_sys::fuzz_target;

use liteapi_qa::adapters::liteapi::envelope::decode;
use liteapi_qa::domain::booking::{BookingConfirmation, Cancellation, PrebookSession};

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        let _ = decode::<PrebookSession>("POST /rates/prebook", body);
        let _ = decode::<BookingConfirmation>("POST /rates/book", body);
        let _ = decode::<Cancellation>("DELETE /bookings/{id}", body);
    }
});
