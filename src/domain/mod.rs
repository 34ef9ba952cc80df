pub mod booking;
pub mod hotel;
pub mod ids;
pub mod lifecycle;
pub mod rates;
