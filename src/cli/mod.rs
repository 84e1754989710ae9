//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print
//! their results and return errors for `main` to report.

pub mod category;
pub mod expense;
pub mod goal;
pub mod report;
pub mod user;

pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use user::{handle_user_command, UserCommands};

use chrono::{NaiveDate, NaiveTime};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Color, Money, Session};
use crate::services::UserService;
use crate::storage::Storage;

/// The logged-in session, or `NotLoggedIn`
pub(crate) fn require_session(storage: &Storage) -> BudgetResult<Session> {
    UserService::new(storage).require_session()
}

pub(crate) fn parse_amount(s: &str) -> BudgetResult<Money> {
    Money::parse(s).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_date(s: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
    })
}

pub(crate) fn parse_time(s: &str) -> BudgetResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| BudgetError::Validation(format!("Invalid time '{}'. Use HH:MM", s)))
}

pub(crate) fn parse_color(s: &str) -> BudgetResult<Color> {
    s.parse::<Color>()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Parse an optional argument with `parse`
pub(crate) fn parse_opt<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> BudgetResult<T>,
) -> BudgetResult<Option<T>> {
    value.map(parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("abc").unwrap_err().is_validation());

        assert_eq!(
            parse_date("2025-03-05").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
        );
        assert!(parse_date("05/03/2025").is_err());

        assert_eq!(parse_time("09:15").unwrap(), NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert!(parse_time("25:00").is_err());

        assert_eq!(parse_color("#00ff00").unwrap(), Color::from_rgb(0x00FF00));
        assert!(parse_color("green").is_err());

        assert_eq!(parse_opt(None, parse_amount).unwrap(), None);
    }
}
