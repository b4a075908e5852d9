//! Streak tracking
//!
//! Tracks consecutive calendar days with at least one recorded activity.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// What a single streak update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// First activity ever
    Started,
    /// Activity on the day after the last one
    Extended,
    /// Another activity on the same day
    Unchanged,
    /// Gap of two or more days
    Reset,
}

/// Daily streak state, persisted as `streaks` in the progress blob
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    #[serde(rename = "current", default)]
    pub current_streak: u32,
    #[serde(rename = "longest", default)]
    pub longest_streak: u32,
    #[serde(rename = "lastActivity", default, with = "activity_date")]
    pub last_activity_date: Option<NaiveDate>,
}

/// `lastActivity` is written as `YYYY-MM-DD` and read in that form or the
/// browser's `Date.toDateString()` form (`Fri Mar 01 2024`)
mod activity_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const ISO: &str = "%Y-%m-%d";
    const BROWSER: &str = "%a %b %d %Y";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        date.map(|d| d.format(ISO).to_string()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, ISO)
            .or_else(|_| NaiveDate::parse_from_str(raw, BROWSER))
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid lastActivity {raw:?}: {e}")))
    }
}

impl StreakState {
    /// Apply an activity happening on `today`.
    ///
    /// Branch order matters: "yesterday" and "today" are tested before
    /// falling through to a reset.
    pub fn record(&mut self, today: NaiveDate) -> StreakChange {
        let change = match self.last_activity_date {
            None => {
                self.current_streak = 1;
                StreakChange::Started
            }
            Some(last) if Some(last) == today.checked_sub_days(Days::new(1)) => {
                self.current_streak += 1;
                StreakChange::Extended
            }
            Some(last) if last == today => StreakChange::Unchanged,
            Some(_) => {
                self.current_streak = 1;
                StreakChange::Reset
            }
        };

        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_activity_date = Some(today);
        change
    }

    /// Restore `longest >= current` after loading foreign data
    pub(crate) fn normalize(&mut self) -> bool {
        if self.longest_streak < self.current_streak {
            self.longest_streak = self.current_streak;
            return true;
        }
        false
    }
}
