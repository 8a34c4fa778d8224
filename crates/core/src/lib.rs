//! Domain rules for the StayDesk booking core.
//!
//! Everything in this crate is pure: catalog queries, the booking wizard
//! step machine, price summaries, ledger partitioning and account form
//! validation. Persistence and network access live in the sibling crates.

pub mod booking;
pub mod catalog;
pub mod draft;
pub mod error;
pub mod types;
pub mod user;
pub mod wizard;
