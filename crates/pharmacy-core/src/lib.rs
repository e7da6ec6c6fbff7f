//! Behavioral core of the pharmacy frontend.
//!
//! Everything here is platform-free; browser adapters plug in through
//! the traits in [`ports`].

pub mod ports;
pub mod cancel;
pub mod event_bus;
pub mod cart;
pub mod router;
pub mod upload;
pub mod pharmacist;
pub mod chat;

#[cfg(test)]
mod tests;
