use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::types::UiConfig;
use crate::domain::booking::{BookingConfirmation, Cancellation, Holder, PrebookSession};
use crate::domain::hotel::{HotelQuery, HotelSummary};
use crate::domain::ids::{BookingId, HotelId, OfferId, PrebookId};
use crate::domain::rates::{HotelRates, RatesRequest, RoomType};
use crate::error::{QaError, Result};
use crate::ports::booking_api::BookingApi;
use crate::ports::browser::{BrowserPage, ElementInfo, Viewport};

// ---------------------------------------------------------------------------
// Booking API double
// ---------------------------------------------------------------------------

type SearchFn = Box<dyn Fn(&HotelQuery) -> Result<Vec<HotelSummary>> + Send + Sync>;
type RatesFn = Box<dyn Fn(&RatesRequest) -> Result<Vec<HotelRates>> + Send + Sync>;
type PrebookFn = Box<dyn Fn(&OfferId) -> Result<PrebookSession> + Send + Sync>;
type BookFn = Box<dyn Fn(&PrebookId, &Holder) -> Result<BookingConfirmation> + Send + Sync>;
type CancelFn = Box<dyn Fn(&BookingId) -> Result<Cancellation> + Send + Sync>;

/// Each stage answers with an id derived from its input unless overridden.
#[allow(clippy::struct_field_names)]
pub struct MockBookingApi {
    search_fn: Mutex<SearchFn>,
    rates_fn: Mutex<RatesFn>,
    prebook_fn: Mutex<PrebookFn>,
    book_fn: Mutex<BookFn>,
    cancel_fn: Mutex<CancelFn>,
}

impl Default for MockBookingApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBookingApi {
    pub fn new() -> Self {
        Self {
            search_fn: Mutex::new(Box::new(|_| Ok(vec![]))),
            rates_fn: Mutex::new(Box::new(|_| Ok(vec![]))),
            prebook_fn: Mutex::new(Box::new(|offer| {
                Ok(make_prebook(&format!("prebook-for-{offer}")))
            })),
            book_fn: Mutex::new(Box::new(|prebook, _| {
                Ok(make_confirmation(&format!("booking-for-{prebook}")))
            })),
            cancel_fn: Mutex::new(Box::new(|id| Ok(make_cancellation(id.as_str())))),
        }
    }

    #[must_use]
    pub fn with_search(
        self,
        f: impl Fn(&HotelQuery) -> Result<Vec<HotelSummary>> + Send + Sync + 'static,
    ) -> Self {
        *self.search_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_rates(
        self,
        f: impl Fn(&RatesRequest) -> Result<Vec<HotelRates>> + Send + Sync + 'static,
    ) -> Self {
        *self.rates_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_prebook(
        self,
        f: impl Fn(&OfferId) -> Result<PrebookSession> + Send + Sync + 'static,
    ) -> Self {
        *self.prebook_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_book(
        self,
        f: impl Fn(&PrebookId, &Holder) -> Result<BookingConfirmation> + Send + Sync + 'static,
    ) -> Self {
        *self.book_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_cancel(
        self,
        f: impl Fn(&BookingId) -> Result<Cancellation> + Send + Sync + 'static,
    ) -> Self {
        *self.cancel_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<HotelSummary>> {
        (self.search_fn.lock().unwrap())(query)
    }

    async fn get_rates(&self, request: &RatesRequest) -> Result<Vec<HotelRates>> {
        (self.rates_fn.lock().unwrap())(request)
    }

    async fn prebook(&self, offer_id: &OfferId) -> Result<PrebookSession> {
        (self.prebook_fn.lock().unwrap())(offer_id)
    }

    async fn book(&self, prebook_id: &PrebookId, holder: &Holder) -> Result<BookingConfirmation> {
        (self.book_fn.lock().unwrap())(prebook_id, holder)
    }

    async fn cancel_booking(&self, booking_id: &BookingId) -> Result<Cancellation> {
        (self.cancel_fn.lock().unwrap())(booking_id)
    }
}

// ---------------------------------------------------------------------------
// Domain factories
// ---------------------------------------------------------------------------

pub fn make_hotel(id: &str) -> HotelSummary {
    HotelSummary {
        id: HotelId::new(id).unwrap(),
        name: Some(format!("Hotel {id}")),
        country: Some("us".into()),
        city: Some("New York".into()),
        address: None,
        stars: Some(4.0),
        rating: None,
    }
}

pub fn make_hotel_rates(hotel_id: &str, offers: &[&str]) -> HotelRates {
    HotelRates {
        hotel_id: HotelId::new(hotel_id).unwrap(),
        room_types: offers
            .iter()
            .map(|offer| RoomType {
                offer_id: OfferId::new(*offer).unwrap(),
                room_type_id: None,
                offer_retail_rate: None,
                rates: Vec::new(),
            })
            .collect(),
    }
}

pub fn make_prebook(prebook_id: &str) -> PrebookSession {
    PrebookSession {
        prebook_id: PrebookId::new(prebook_id).unwrap(),
        offer_id: None,
        hotel_id: None,
        price: Some(199.0),
        currency: Some("USD".into()),
        transaction_id: None,
    }
}

pub fn make_confirmation(booking_id: &str) -> BookingConfirmation {
    BookingConfirmation {
        booking_id: BookingId::new(booking_id).unwrap(),
        status: Some("CONFIRMED".into()),
        hotel_confirmation_code: None,
        checkin: None,
        checkout: None,
        price: Some(199.0),
        currency: Some("USD".into()),
    }
}

pub fn make_cancellation(booking_id: &str) -> Cancellation {
    Cancellation {
        booking_id: Some(booking_id.into()),
        status: Some("CANCELLED".into()),
        cancellation_fee: Some(0.0),
        refund_amount: Some(199.0),
        currency: Some("USD".into()),
    }
}

// ---------------------------------------------------------------------------
// Scripted browser page
// ---------------------------------------------------------------------------

pub fn element(role: &str, name: &str) -> ElementInfo {
    ElementInfo {
        index: 0,
        role: role.into(),
        name: name.into(),
        text: name.into(),
        level: None,
        visible: true,
    }
}

pub fn heading(level: u8, name: &str) -> ElementInfo {
    ElementInfo {
        level: Some(level),
        ..element("heading", name)
    }
}

#[derive(Debug, Default)]
pub struct PageState {
    pub url: String,
    pub elements: Vec<ElementInfo>,
    pub viewport: Option<Viewport>,
    pub clicks: Vec<String>,
    pub typed: Vec<(String, String)>,
    pub keys: Vec<(String, String)>,
}

impl PageState {
    /// Replace the page contents, numbering elements in document order.
    pub fn set_elements(&mut self, elements: Vec<ElementInfo>) {
        self.elements = elements;
        self.reindex();
    }

    pub fn push(&mut self, element: ElementInfo) {
        self.elements.push(element);
        self.reindex();
    }

    pub fn remove_named(&mut self, name: &str) {
        self.elements.retain(|e| e.name != name);
        self.reindex();
    }

    fn reindex(&mut self) {
        for (i, e) in self.elements.iter_mut().enumerate() {
            e.index = i;
        }
    }
}

enum Trigger {
    Goto,
    Click(String),
    Typed,
    Key(String),
}

type Reaction = Box<dyn Fn(&mut PageState) + Send + Sync>;

/// In-memory page whose DOM changes in response to scripted triggers.
#[derive(Default)]
pub struct ScriptedPage {
    state: Mutex<PageState>,
    reactions: Vec<(Trigger, Reaction)>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(elements: Vec<ElementInfo>) -> Self {
        let page = Self::new();
        page.state().set_elements(elements);
        page
    }

    #[must_use]
    pub fn on_goto(mut self, f: impl Fn(&mut PageState) + Send + Sync + 'static) -> Self {
        self.reactions.push((Trigger::Goto, Box::new(f)));
        self
    }

    #[must_use]
    pub fn on_click(
        mut self,
        name: &str,
        f: impl Fn(&mut PageState) + Send + Sync + 'static,
    ) -> Self {
        self.reactions
            .push((Trigger::Click(name.to_string()), Box::new(f)));
        self
    }

    #[must_use]
    pub fn on_type(mut self, f: impl Fn(&mut PageState) + Send + Sync + 'static) -> Self {
        self.reactions.push((Trigger::Typed, Box::new(f)));
        self
    }

    #[must_use]
    pub fn on_key(mut self, key: &str, f: impl Fn(&mut PageState) + Send + Sync + 'static) -> Self {
        self.reactions
            .push((Trigger::Key(key.to_string()), Box::new(f)));
        self
    }

    pub fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap()
    }

    fn fire(&self, state: &mut PageState, fired: impl Fn(&Trigger) -> bool) {
        for (trigger, reaction) in &self.reactions {
            if fired(trigger) {
                reaction(state);
            }
        }
    }

    fn check_current(state: &PageState, element: &ElementInfo) -> Result<()> {
        let current = state.elements.get(element.index);
        match current {
            Some(e) if e.role == element.role && e.name == element.name => Ok(()),
            _ => Err(QaError::StaleElement {
                locator: format!("{} \"{}\"", element.role, element.name),
            }),
        }
    }
}

#[async_trait]
impl BrowserPage for ScriptedPage {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state();
        state.url = url.to_string();
        self.fire(&mut state, |t| matches!(t, Trigger::Goto));
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.state().url.clone())
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        self.state().viewport = Some(viewport);
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<ElementInfo>> {
        Ok(self.state().elements.clone())
    }

    async fn click(&self, element: &ElementInfo) -> Result<()> {
        let mut state = self.state();
        Self::check_current(&state, element)?;
        state.clicks.push(element.name.clone());
        self.fire(&mut state, |t| matches!(t, Trigger::Click(n) if *n == element.name));
        Ok(())
    }

    async fn type_text(&self, element: &ElementInfo, text: &str, _delay: Duration) -> Result<()> {
        let mut state = self.state();
        Self::check_current(&state, element)?;
        state.typed.push((element.name.clone(), text.to_string()));
        self.fire(&mut state, |t| matches!(t, Trigger::Typed));
        Ok(())
    }

    async fn press_key(&self, element: &ElementInfo, key: &str) -> Result<()> {
        let mut state = self.state();
        Self::check_current(&state, element)?;
        state.keys.push((element.name.clone(), key.to_string()));
        self.fire(&mut state, |t| matches!(t, Trigger::Key(k) if k == key));
        Ok(())
    }
}

/// UI settings with waits short enough for in-memory pages.
pub fn fast_ui_config() -> UiConfig {
    UiConfig {
        typing_delay_ms: 0,
        poll_interval_ms: 2,
        cookie_banner_timeout_ms: 20,
        suggestion_timeout_ms: 20,
        results_timeout_ms: 40,
        no_results_timeout_ms: 40,
        details_timeout_ms: 20,
        action_timeout_ms: 20,
        ..UiConfig::default()
    }
}

/// The travel site as the UI scenarios expect it: cookie banner, search
/// form with suggestions for Paris, results for a selected suggestion and a
/// no-results page for free text submitted with Enter.
pub fn travel_site() -> ScriptedPage {
    ScriptedPage::new()
        .on_goto(|s| {
            s.set_elements(vec![
                element("button", "Accept"),
                element("combobox", "Enter a destination"),
                element("button", "Search"),
            ]);
        })
        .on_click("Accept", |s| s.remove_named("Accept"))
        .on_type(|s| {
            let typed = s.typed.last().map(|(_, t)| t.clone()).unwrap_or_default();
            if typed.contains("Paris") {
                s.push(element("option", "Paris, France"));
                s.push(element("option", "Paris Orly Airport"));
            }
        })
        .on_click("Paris, France", |s| {
            s.elements.retain(|e| e.role != "option");
            s.reindex();
        })
        .on_click("Search", |s| {
            s.url = "https://v3.nuitee.link/hotels?placeId=ChIJD7fiBh9u5kcRYJSMaMOCCwQ".into();
            s.set_elements(vec![
                element("combobox", "Enter a destination"),
                element("button", "Search"),
                heading(3, "Hotel Lutetia"),
                element("link", "Hotel Lutetia"),
                heading(3, "Le Meurice"),
                element("link", "Le Meurice"),
                heading(3, "Subscribe to our newsletter"),
            ]);
        })
        .on_click("Hotel Lutetia", |s| {
            s.url = "https://v3.nuitee.link/hotels/lp1897?checkin=2026-10-17".into();
            s.set_elements(vec![
                heading(1, "Hotel Lutetia"),
                element("button", "Select room"),
                element("button", "Reserve"),
            ]);
        })
        .on_key("Enter", |s| {
            let typed = s.typed.last().map(|(_, t)| t.clone()).unwrap_or_default();
            s.url = format!("https://v3.nuitee.link/hotels?query={typed}");
            s.set_elements(vec![
                element("combobox", "Enter a destination"),
                element("button", "Search"),
                heading(2, "No results found"),
            ]);
        })
}
