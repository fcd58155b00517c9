//! Detect days on which requested medicines are simultaneously active.
//!
//! Each prescription's active interval is clipped to the trailing window and
//! tallied per day. A day is a clash when its tally reaches the number of
//! requested medicines found on the roster.
//!
//! The tally threshold is the size of the filtered medicine set, even when
//! some of those medicines have no prescription inside the window; dropping
//! them would lower the threshold. Under [`CountingPolicy::PerMedicine`] such
//! a query is always empty. Under [`CountingPolicy::PerPrescription`] the
//! overlapping refills of the remaining medicines can still reach it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{ClashError, Result};
use crate::roster::{Medicine, Patient, Roster};
use crate::window::{DateSpan, Window};

/// Look-back used when the caller does not supply one.
pub const DEFAULT_DAYS_BACK: i64 = 90;

/// How a day's tally is incremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingPolicy {
    /// Every prescription covering a day adds one. A medicine with two
    /// overlapping prescriptions counts twice on the shared days.
    #[default]
    PerPrescription,
    /// A medicine adds at most one to any given day, however many of its
    /// prescriptions cover it.
    PerMedicine,
}

/// Detector settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClashConfig {
    /// Default look-back in days for queries that do not specify one.
    pub days_back: i64,
    pub policy: CountingPolicy,
}

impl Default for ClashConfig {
    fn default() -> Self {
        Self {
            days_back: DEFAULT_DAYS_BACK,
            policy: CountingPolicy::default(),
        }
    }
}

/// An untyped clash query, as received from JSON.
///
/// Both the name list and its entries may be absent; [`ClashDetector::evaluate`]
/// rejects those cases with a dedicated error each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashQuery {
    pub medicine_names: Option<Vec<Option<String>>>,
    pub days_back: Option<i64>,
}

impl ClashQuery {
    pub fn new(names: &[&str]) -> Self {
        Self {
            medicine_names: Some(names.iter().map(|n| Some((*n).to_string())).collect()),
            days_back: None,
        }
    }

    pub fn days_back(mut self, days_back: i64) -> Self {
        self.days_back = Some(days_back);
        self
    }

    /// # Errors
    /// Returns `ClashError::InvalidRoster` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ClashError::InvalidRoster(e.to_string()))
    }
}

/// Clash detection bound to a clock and a configuration.
#[derive(Debug, Clone)]
pub struct ClashDetector<C = SystemClock> {
    clock: C,
    config: ClashConfig,
}

impl Default for ClashDetector<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> ClashDetector<C> {
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, ClashConfig::default())
    }

    pub fn with_config(clock: C, config: ClashConfig) -> Self {
        Self { clock, config }
    }

    pub fn config(&self) -> &ClashConfig {
        &self.config
    }

    /// Clash days for `names` over the configured look-back.
    ///
    /// # Errors
    /// See [`find_clashes`].
    pub fn detect<R: Roster>(&self, roster: &R, names: &[&str]) -> Result<BTreeSet<NaiveDate>> {
        self.detect_within(roster, names, self.config.days_back)
    }

    /// Clash days for `names` over the last `days_back` days.
    ///
    /// # Errors
    /// See [`find_clashes`].
    pub fn detect_within<R: Roster>(
        &self,
        roster: &R,
        names: &[&str],
        days_back: i64,
    ) -> Result<BTreeSet<NaiveDate>> {
        find_clashes(roster, names, days_back, self.clock.today(), self.config.policy)
    }

    /// Run a query whose fields may be absent.
    ///
    /// Preconditions are checked in order: negative window, absent name list,
    /// empty name, absent name.
    ///
    /// # Errors
    /// Returns the `ClashError` for the first violated precondition.
    pub fn evaluate<R: Roster>(
        &self,
        roster: &R,
        query: &ClashQuery,
    ) -> Result<BTreeSet<NaiveDate>> {
        let days_back = query.days_back.unwrap_or(self.config.days_back);
        if days_back < 0 {
            return Err(ClashError::NegativeWindow(days_back));
        }
        let names = present_names(query.medicine_names.as_deref())?;
        self.detect_within(roster, &names, days_back)
    }
}

fn present_names(names: Option<&[Option<String>]>) -> Result<Vec<&str>> {
    let names = names.ok_or(ClashError::NullMedicineNameSet)?;
    if names.iter().any(|n| n.as_deref() == Some("")) {
        return Err(ClashError::EmptyStringInNameSet);
    }
    names
        .iter()
        .map(|n| n.as_deref().ok_or(ClashError::NullEntryInNameSet))
        .collect()
}

/// Find every day in `[today - days_back, today]` on which the requested
/// medicines clash.
///
/// Requested names are treated as a set; duplicates are ignored. An empty set
/// is returned without error when the roster holds at most one medicine, fewer
/// than two distinct names are requested, `days_back` is zero, no requested
/// name is on the roster, or a matched medicine has no prescriptions.
/// Requested names missing from the roster are skipped and do not count
/// toward the threshold.
///
/// # Errors
/// Returns `ClashError::NegativeWindow` if `days_back < 0`.
/// Returns `ClashError::EmptyStringInNameSet` if any name is `""`.
pub fn find_clashes<R: Roster>(
    roster: &R,
    names: &[&str],
    days_back: i64,
    today: NaiveDate,
    policy: CountingPolicy,
) -> Result<BTreeSet<NaiveDate>> {
    let days_back = u64::try_from(days_back).map_err(|_| ClashError::NegativeWindow(days_back))?;
    if names.iter().any(|n| n.is_empty()) {
        return Err(ClashError::EmptyStringInNameSet);
    }

    let requested: BTreeSet<&str> = names.iter().copied().collect();

    if roster.medicines().len() <= 1 {
        debug!(medicines = roster.medicines().len(), "roster too small to clash");
        return Ok(BTreeSet::new());
    }
    if requested.len() < 2 {
        debug!(requested = requested.len(), "fewer than two medicines requested");
        return Ok(BTreeSet::new());
    }
    if days_back == 0 {
        debug!("empty look-back window");
        return Ok(BTreeSet::new());
    }

    let Some(matched) = matched_medicines(roster, &requested) else {
        return Ok(BTreeSet::new());
    };

    let window = Window::trailing(today, days_back);
    let threshold = matched.len();
    let tally = tally_days(&matched, &window, policy);

    let clashes: BTreeSet<NaiveDate> = tally
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .map(|(day, _)| day)
        .collect();

    debug!(
        window_start = %window.start(),
        window_end = %window.end(),
        threshold,
        ?policy,
        clashes = clashes.len(),
        "clash detection complete"
    );

    Ok(clashes)
}

/// Every roster medicine named in `requested`, or `None` when nothing matches
/// or a matched medicine has no prescriptions.
fn matched_medicines<'a, R: Roster>(
    roster: &'a R,
    requested: &BTreeSet<&'a str>,
) -> Option<Vec<&'a Medicine>> {
    let matched: Vec<&Medicine> = requested
        .iter()
        .flat_map(|&name| roster.medicines_named(name))
        .collect();

    if matched.is_empty() {
        debug!(requested = requested.len(), "no requested medicine on roster");
        return None;
    }

    if let Some(empty) = matched.iter().find(|m| !m.has_prescriptions()) {
        debug!(medicine = empty.name(), "requested medicine has no prescriptions");
        return None;
    }

    Some(matched)
}

/// Per-day counts of active prescriptions (or medicines) inside the window.
fn tally_days(
    medicines: &[&Medicine],
    window: &Window,
    policy: CountingPolicy,
) -> BTreeMap<NaiveDate, usize> {
    let mut tally: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for medicine in medicines {
        match policy {
            CountingPolicy::PerPrescription => {
                for day in clipped_spans(medicine, window).flat_map(|span| span.days()) {
                    *tally.entry(day).or_default() += 1;
                }
            }
            CountingPolicy::PerMedicine => {
                let covered: BTreeSet<NaiveDate> = clipped_spans(medicine, window)
                    .flat_map(|span| span.days())
                    .collect();
                for day in covered {
                    *tally.entry(day).or_default() += 1;
                }
            }
        }
    }

    tally
}

/// Active intervals of `medicine`'s prescriptions, clipped to `window`.
fn clipped_spans<'a>(
    medicine: &'a Medicine,
    window: &'a Window,
) -> impl Iterator<Item = DateSpan> + 'a {
    medicine
        .prescriptions()
        .iter()
        .filter_map(|p| p.active_span())
        .filter_map(move |span| window.clip(&span))
}

impl Patient {
    /// Clash days for `names` over the last [`DEFAULT_DAYS_BACK`] days, using
    /// the system clock.
    ///
    /// # Errors
    /// See [`find_clashes`].
    pub fn clash(&self, names: &[&str]) -> Result<BTreeSet<NaiveDate>> {
        self.clash_within(names, DEFAULT_DAYS_BACK)
    }

    /// Clash days for `names` over the last `days_back` days, using the
    /// system clock.
    ///
    /// # Errors
    /// See [`find_clashes`].
    pub fn clash_within(&self, names: &[&str], days_back: i64) -> Result<BTreeSet<NaiveDate>> {
        ClashDetector::default().detect_within(self, names, days_back)
    }
}
