//! Reporting periods and date ranges
//!
//! A [`PeriodSelector`] names the interval a user wants to look at (this
//! week, this month, this year or a custom range). Resolving it against a
//! reference date yields a concrete inclusive [`DateRange`].

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of calendar dates with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, swapping the bounds if they are reversed
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// A range covering a single day
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the range, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// The period a user selects for viewing expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeriodSelector {
    /// Monday through Sunday of the current ISO week
    Week,
    /// Calendar month
    #[default]
    Month,
    /// Calendar year
    Year,
    /// Caller-supplied bounds; either may be missing
    Custom {
        #[serde(default)]
        start: Option<NaiveDate>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
}

impl PeriodSelector {
    /// A custom range with both bounds present
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Custom {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Resolve the selector into a concrete range around `today`
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        resolve_period(*self, today)
    }

    /// Parse a period from text
    ///
    /// Formats:
    /// - "week", "month", "year"
    /// - "custom" (no bounds: resolves to today)
    /// - "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once("..") {
            let start = parse_date(start)
                .ok_or_else(|| PeriodParseError::InvalidDate(start.trim().to_string()))?;
            let end = parse_date(end)
                .ok_or_else(|| PeriodParseError::InvalidDate(end.trim().to_string()))?;
            return Ok(Self::custom(start, end));
        }

        match s.to_lowercase().as_str() {
            "week" | "weekly" | "w" => Ok(Self::Week),
            "month" | "monthly" | "m" => Ok(Self::Month),
            "year" | "yearly" | "y" => Ok(Self::Year),
            "custom" => Ok(Self::Custom {
                start: None,
                end: None,
            }),
            _ => Err(PeriodParseError::InvalidFormat(s.to_string())),
        }
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::Custom { .. } => "Custom",
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom {
                start: Some(start),
                end: Some(end),
            } => write!(f, "{}..{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
            other => write!(f, "{}", other.label().to_lowercase()),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Map a period selector onto an inclusive date range
///
/// Never fails: a custom selector missing either bound falls back to
/// `today..today`, and reversed custom bounds are swapped.
pub fn resolve_period(selector: PeriodSelector, today: NaiveDate) -> DateRange {
    match selector {
        PeriodSelector::Week => {
            let offset = today.weekday().num_days_from_monday() as i64;
            let start = today
                .checked_sub_signed(Duration::days(offset))
                .unwrap_or(NaiveDate::MIN);
            let end = start
                .checked_add_signed(Duration::days(6))
                .unwrap_or(NaiveDate::MAX);
            DateRange::new(start, end)
        }
        PeriodSelector::Month => {
            let start = today.with_day(1).unwrap_or(today);
            let next_month = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
            };
            let end = next_month
                .and_then(|d| d.pred_opt())
                .unwrap_or(NaiveDate::MAX);
            DateRange::new(start, end)
        }
        PeriodSelector::Year => {
            let start = today.with_ordinal(1).unwrap_or(today);
            let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
            DateRange::new(start, end)
        }
        PeriodSelector::Custom {
            start: Some(start),
            end: Some(end),
        } => DateRange::new(start, end),
        PeriodSelector::Custom { .. } => DateRange::single_day(today),
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidDate(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(
                f,
                "Invalid period '{}': expected week, month, year, custom or YYYY-MM-DD..YYYY-MM-DD",
                s
            ),
            PeriodParseError::InvalidDate(s) => write!(f, "Invalid date '{}': expected YYYY-MM-DD", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}
