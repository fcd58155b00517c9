//! Patient roster: medicines and their dispensed prescriptions.
//!
//! These are plain records. The clash detector reads them through the
//! [`Roster`] trait and never mutates them; everything here is built up by the
//! caller before a query runs.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ClashError, Result};
use crate::window::DateSpan;

/// Supply length assumed when a prescription is recorded with a dispense date only.
pub const DEFAULT_DAYS_SUPPLY: i64 = 30;

fn default_days_supply() -> i64 {
    DEFAULT_DAYS_SUPPLY
}

/// A single dispensing event.
///
/// The supply count includes the dispense day itself, so a prescription
/// dispensed on the 1st with `days_supply = 3` is active on the 1st, 2nd and 3rd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prescription {
    dispense_date: NaiveDate,
    #[serde(default = "default_days_supply")]
    days_supply: i64,
}

impl Prescription {
    /// Record a prescription. `days_supply` is not validated; a value below 1
    /// yields a prescription that is never active.
    pub const fn new(dispense_date: NaiveDate, days_supply: i64) -> Self {
        Self {
            dispense_date,
            days_supply,
        }
    }

    /// Record a prescription with the [`DEFAULT_DAYS_SUPPLY`].
    pub const fn dispensed(dispense_date: NaiveDate) -> Self {
        Self::new(dispense_date, DEFAULT_DAYS_SUPPLY)
    }

    pub const fn dispense_date(&self) -> NaiveDate {
        self.dispense_date
    }

    pub const fn days_supply(&self) -> i64 {
        self.days_supply
    }

    /// Last day the supply covers, or `None` when `days_supply < 1`.
    ///
    /// Saturates at [`NaiveDate::MAX`] for supplies running past the calendar.
    pub fn last_active_day(&self) -> Option<NaiveDate> {
        let extra = u64::try_from(self.days_supply.checked_sub(1)?).ok()?;
        Some(
            self.dispense_date
                .checked_add_days(Days::new(extra))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// The inclusive active interval `[dispense_date, dispense_date + days_supply - 1]`.
    pub fn active_span(&self) -> Option<DateSpan> {
        DateSpan::new(self.dispense_date, self.last_active_day()?)
    }

    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.active_span().is_some_and(|span| span.contains(day))
    }
}

/// A named medicine and every prescription dispensed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    name: String,
    #[serde(default)]
    prescriptions: Vec<Prescription>,
}

impl Medicine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prescriptions: Vec::new(),
        }
    }

    /// Builder-style variant of [`Medicine::add_prescription`].
    pub fn with_prescription(mut self, prescription: Prescription) -> Self {
        self.prescriptions.push(prescription);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_prescription(&mut self, prescription: Prescription) {
        self.prescriptions.push(prescription);
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    pub fn has_prescriptions(&self) -> bool {
        !self.prescriptions.is_empty()
    }
}

/// Read-only view of a patient's medicines, as consumed by the clash detector.
pub trait Roster {
    /// Every medicine on the roster, in insertion order.
    fn medicines(&self) -> &[Medicine];

    /// Medicines whose name matches `name` exactly.
    ///
    /// Medicines are distinct by roster entry, not by name: two entries that
    /// share a name are both returned.
    fn medicines_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Medicine> + 'a {
        self.medicines().iter().filter(move |m| m.name() == name)
    }
}

/// A patient and the medicines they hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default)]
    medicines: Vec<Medicine>,
}

impl Patient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_medicine(&mut self, medicine: Medicine) {
        self.medicines.push(medicine);
    }

    /// Load a roster from its JSON form.
    ///
    /// # Errors
    /// Returns `ClashError::InvalidRoster` if the JSON is malformed or a date
    /// is not `YYYY-MM-DD`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ClashError::InvalidRoster(e.to_string()))
    }

    /// Serialize the roster to JSON.
    ///
    /// # Errors
    /// Returns `ClashError::InvalidRoster` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ClashError::InvalidRoster(e.to_string()))
    }
}

impl Roster for Patient {
    fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }
}
