#![no_main]
use libfuzzer_sys::fuzz_target;

use liteapi_qa::ports::browser::ElementInfo;
use liteapi_qa::ui::locator::Locator;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(elements) = serde_json::from_str::<Vec<ElementInfo>>(text) {
            let _ = Locator::role("heading").level(3).select(&elements);
            let _ = Locator::role("option").has_text("Paris").first().resolve(&elements);
            let _ = Locator::role("button").name_any_of(&["Reserve", "Book"]).resolve(&elements);
        }
    }
});
