//! # clash-engine
//!
//! Detect medication clashes: calendar days, within a trailing window, on
//! which every requested medicine was simultaneously supplied.
//!
//! A prescription dispensed on day `d` with `n` days of supply is active on
//! `d ..= d + n - 1`. The engine clips each active interval to the window
//! `[today - days_back, today]`, tallies active prescriptions per day, and
//! reports the days whose tally reaches the number of requested medicines.
//!
//! ## Modules
//!
//! - [`roster`] — Patients, medicines, prescriptions, and the `Roster` view
//! - [`window`] — Inclusive day spans and the trailing look-back window
//! - [`clock`] — Injectable source of "today"
//! - [`clash`] — The clash detector and its counting policies
//! - [`error`] — Error types

pub mod clash;
pub mod clock;
pub mod error;
pub mod roster;
pub mod window;

pub use clash::{
    find_clashes, ClashConfig, ClashDetector, ClashQuery, CountingPolicy, DEFAULT_DAYS_BACK,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ClashError;
pub use roster::{Medicine, Patient, Prescription, Roster, DEFAULT_DAYS_SUPPLY};
pub use window::{DateSpan, Window};
