//! Booking core for the StayDesk hotel app.
//!
//! [`state::BookingSystem`] owns the session, the catalog cache, the
//! booking wizard and the ledger. Persistence lives in `staydesk-db`, the
//! hotel backend client in `staydesk-provider`.

pub mod account;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod session;
pub mod state;
pub mod wizard;
