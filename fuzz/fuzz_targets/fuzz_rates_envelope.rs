#![no_main]
use libfuzzer_sys::fuzz_target;

use liteapi_qa::domain::rates::{HotelRates, first_offer};

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        if let Ok(rates) = liteapi_qa::adapters::liteapi::envelope::decode::<Vec<HotelRates>>(
            "POST /hotels/rates",
            body,
        ) {
            let _ = first_offer(&rates);
        }
    }
});
