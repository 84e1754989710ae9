//! Expense display formatting
//!
//! Expense lists are rendered as `tabled` tables; the period summary adds the
//! per-category totals underneath.

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Category, CategoryId, Expense};
use crate::reports::spending::{SpendingBreakdown, UNKNOWN_CATEGORY};
use crate::services::ExpenseSummary;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn time_window(expense: &Expense) -> String {
    if expense.start_time == expense.end_time {
        expense.start_time.format("%H:%M").to_string()
    } else {
        format!(
            "{}-{}",
            expense.start_time.format("%H:%M"),
            expense.end_time.format("%H:%M")
        )
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Format expenses as a table
pub fn format_expense_table(
    expenses: &[Expense],
    categories: &[Category],
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format(date_format).to_string(),
        time: time_window(e),
        category: names
            .get(&e.category_id)
            .copied()
            .unwrap_or(UNKNOWN_CATEGORY)
            .to_string(),
        description: truncate(&e.description, 40),
        amount: e.amount.format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format per-category totals with their share of the whole
pub fn format_category_totals(breakdown: &SpendingBreakdown, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total spent: {}\n",
        breakdown.total_amount.format_with_symbol(currency_symbol)
    ));

    if breakdown.is_empty() {
        return output;
    }

    let name_width = breakdown
        .category_totals
        .iter()
        .map(|t| t.category_name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    for total in &breakdown.category_totals {
        output.push_str(&format!(
            "  {:<name_width$}  {:>12}  {:>3}%  {}\n",
            total.category_name,
            total.total.format_with_symbol(currency_symbol),
            total.percentage,
            share_bar(total.percentage),
            name_width = name_width
        ));
    }

    output
}

fn share_bar(percentage: u32) -> String {
    let filled = (percentage.min(100) / 5) as usize;
    "█".repeat(filled)
}

/// Format a period summary: heading, expense table and category totals
pub fn format_expense_summary(
    summary: &ExpenseSummary,
    categories: &[Category],
    heading: &str,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", heading));
    output.push_str(&format_expense_table(
        &summary.expenses,
        categories,
        currency_symbol,
        date_format,
    ));
    output.push('\n');
    output.push_str(&format_category_totals(&summary.breakdown, currency_symbol));

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, category_name: Option<&str>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("  Amount:      {}\n", expense.amount));
    output.push_str(&format!("  Description: {}\n", expense.description));
    output.push_str(&format!(
        "  Category:    {}\n",
        category_name.unwrap_or(UNKNOWN_CATEGORY)
    ));
    output.push_str(&format!("  Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Time:        {}\n", time_window(expense)));

    if let Some(photo) = &expense.photo_path {
        output.push_str(&format!("  Photo:       {}\n", photo));
    }

    output
}
