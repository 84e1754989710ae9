//! Reporting period service
//!
//! Turns command-line period arguments and user settings into concrete date
//! ranges.

use chrono::{Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{DateRange, PeriodSelector};

/// Service for reporting period selection
pub struct PeriodService<'a> {
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a> PeriodService<'a> {
    /// Create a period service anchored at the local date
    pub fn new(settings: &'a Settings) -> Self {
        Self::with_today(settings, Local::now().date_naive())
    }

    /// Create a period service anchored at a fixed date
    pub fn with_today(settings: &'a Settings, today: NaiveDate) -> Self {
        Self { settings, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Choose the selector for expense lists and reports
    ///
    /// `--start`/`--end` win over `--period`; with neither, the configured
    /// default period applies.
    pub fn select(
        &self,
        period: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BudgetResult<PeriodSelector> {
        self.select_with_default(period, start, end, self.settings.default_period)
    }

    /// Choose the selector goals are evaluated over
    pub fn select_for_goals(&self, period: Option<&str>) -> BudgetResult<PeriodSelector> {
        self.select_with_default(period, None, None, self.settings.goal_period)
    }

    fn select_with_default(
        &self,
        period: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        default: PeriodSelector,
    ) -> BudgetResult<PeriodSelector> {
        if start.is_some() || end.is_some() {
            return Ok(PeriodSelector::Custom { start, end });
        }

        match period {
            Some(text) => self.parse(text),
            None => Ok(default),
        }
    }

    /// Parse a period from text
    pub fn parse(&self, s: &str) -> BudgetResult<PeriodSelector> {
        PeriodSelector::parse(s).map_err(|e| BudgetError::Validation(e.to_string()))
    }

    /// Resolve a selector against today
    pub fn resolve(&self, selector: PeriodSelector) -> DateRange {
        selector.resolve(self.today)
    }

    /// Human-friendly description, e.g. "This month (2025-03-01..2025-03-31)"
    pub fn describe(&self, selector: PeriodSelector) -> String {
        let range = self.resolve(selector);
        match selector {
            PeriodSelector::Custom { .. } => format!("Custom ({})", range),
            _ => format!("This {} ({})", selector.label().to_lowercase(), range),
        }
    }
}
