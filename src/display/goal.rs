//! Budget goal display formatting

use crate::models::GoalStatus;
use crate::services::GoalProgress;

const BAR_WIDTH: usize = 20;

/// Render a ratio in `0.0..=1.0` as a fixed-width bar
pub fn format_progress_bar(ratio: f64) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn status_marker(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::UnderMin => "▼",
        GoalStatus::OnTrack => "✓",
        GoalStatus::OverMax => "▲",
    }
}

/// Format the goal list with spend and progress for the period
pub fn format_goal_progress(progress: &[GoalProgress], currency_symbol: &str) -> String {
    if progress.is_empty() {
        return "No budget goals set.\n\nRun 'budgetiq goal add <category> --min <amount> --max <amount>' to create one.\n"
            .to_string();
    }

    let name_width = progress
        .iter()
        .map(|p| p.category_name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!("Budget goals for {}\n\n", progress[0].range));
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>10}  {:>10}  {:>10}  {:<22}  {:>4}  {}\n",
        "ID",
        "Category",
        "Min",
        "Max",
        "Spent",
        "Progress",
        "%",
        "Status",
        name_width = name_width
    ));

    for p in progress {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>10}  {:>10}  {:>10}  {:<22}  {:>3}%  {} {}\n",
            p.goal.id.to_string(),
            p.category_name,
            p.goal.min_amount.format_with_symbol(currency_symbol),
            p.goal.max_amount.format_with_symbol(currency_symbol),
            p.spent.format_with_symbol(currency_symbol),
            format_progress_bar(p.evaluation.progress_ratio),
            p.evaluation.progress_percent(),
            status_marker(p.evaluation.status),
            p.evaluation.status,
            name_width = name_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetGoal, CategoryId, Color, DateRange, Money, UserId};
    use chrono::NaiveDate;

    fn progress(spent_units: i64) -> GoalProgress {
        let goal = BudgetGoal::new(
            UserId::new(),
            CategoryId::new(),
            Money::from_units(100),
            Money::from_units(200),
        );
        let spent = Money::from_units(spent_units);
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        GoalProgress {
            evaluation: goal.evaluate(spent),
            goal,
            category_name: "Food".into(),
            color: Color::GRAY,
            range: DateRange::new(day, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()),
            spent,
        }
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(format_progress_bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(format_progress_bar(0.25), format!("[{}{}]", "#".repeat(5), "-".repeat(15)));
        assert_eq!(format_progress_bar(3.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_format_goal_progress() {
        let output = format_goal_progress(&[progress(150), progress(250)], "$");

        assert!(output.starts_with("Budget goals for 2025-03-01..2025-03-31"));
        assert!(output.contains("$150.00"));
        assert!(output.contains(" 75%"));
        assert!(output.contains("On track"));
        assert!(output.contains("Over maximum"));
    }

    #[test]
    fn test_empty() {
        assert!(format_goal_progress(&[], "$").contains("No budget goals set"));
    }
}
