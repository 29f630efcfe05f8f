//! Frequency advancement — the single source of date arithmetic.
//!
//! Every scheduling path advances dates through [`advance`]; there are
//! deliberately no other frequency-to-date conversions in the workspace.

use chrono::{DateTime, Days, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::frequency::Frequency;

/// Advance `date` by one frequency step.
///
/// Daily/weekly/bi-weekly add calendar days; monthly adds one calendar
/// month with the day-of-month clamped to the target month's length
/// (Jan 31 → Feb 28/29). Pure and deterministic.
///
/// The timezone is an explicit type parameter so callers that need
/// wall-clock-stable sends can thread a zone through; service call
/// sites use `Utc`.
pub fn advance<Tz: TimeZone>(date: DateTime<Tz>, frequency: Frequency) -> DateTime<Tz> {
    match frequency {
        Frequency::Daily => date + Days::new(1),
        Frequency::Weekly => date + Days::new(7),
        Frequency::BiWeekly => date + Days::new(14),
        Frequency::Monthly => date + Months::new(1),
    }
}

/// A concrete occurrence of a recurring schedule: when it is due, and
/// when the following occurrence becomes due.
///
/// Stored timestamps are UTC throughout the service; zone-aware
/// scheduling, if it ever becomes a requirement, goes through the
/// generic [`advance`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub send_date: DateTime<Utc>,
    pub next_date: DateTime<Utc>,
}

impl Occurrence {
    /// Build the occurrence due at `anchor`, with its successor one
    /// frequency step later.
    pub fn from_anchor(anchor: DateTime<Utc>, frequency: Frequency) -> Self {
        Self {
            send_date: anchor,
            next_date: advance(anchor, frequency),
        }
    }

    /// The occurrence that follows this one after a successful send:
    /// yesterday's `next_date` becomes the new `send_date`.
    pub fn roll(self, frequency: Frequency) -> Self {
        Self::from_anchor(self.next_date, frequency)
    }
}
