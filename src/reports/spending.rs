//! Spending Report
//!
//! Aggregates a user's expenses by category for a date range.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, Color, DateRange, Expense, Money, Session};
use crate::storage::Storage;

/// Name shown for expenses whose category has been deleted
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Spend filed under one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub category_name: String,
    pub color: Color,
    pub total: Money,
    pub expense_count: usize,
    /// Whole-number share of the overall total
    pub percentage: u32,
}

/// Overall and per-category spend
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpendingBreakdown {
    pub total_amount: Money,
    /// Largest first; equal totals by category id
    pub category_totals: Vec<CategoryTotal>,
}

impl SpendingBreakdown {
    pub fn is_empty(&self) -> bool {
        self.category_totals.is_empty()
    }

    pub fn get(&self, category_id: CategoryId) -> Option<&CategoryTotal> {
        self.category_totals
            .iter()
            .find(|t| t.category_id == category_id)
    }
}

/// Sum expenses overall and per category
///
/// `expenses` are expected to be filtered to one user and range already;
/// `categories` only supplies names and colors.
pub fn aggregate_spending(expenses: &[Expense], categories: &[Category]) -> SpendingBreakdown {
    let mut sums: HashMap<CategoryId, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let entry = sums
            .entry(expense.category_id)
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let total_amount: Money = expenses.iter().map(|e| e.amount).sum();
    let lookup: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut category_totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category_id, (total, expense_count))| {
            let (category_name, color) = match lookup.get(&category_id) {
                Some(category) => (category.name.clone(), category.color),
                None => (UNKNOWN_CATEGORY.to_string(), Color::GRAY),
            };
            CategoryTotal {
                category_id,
                category_name,
                color,
                total,
                expense_count,
                percentage: percentage_of(total, total_amount),
            }
        })
        .collect();

    category_totals.sort_by(|a, b| match b.total.cmp(&a.total) {
        Ordering::Equal => a.category_id.cmp(&b.category_id),
        other => other,
    });

    SpendingBreakdown {
        total_amount,
        category_totals,
    }
}

fn percentage_of(part: Money, whole: Money) -> u32 {
    if whole.is_zero() {
        return 0;
    }
    let ratio = part.cents() as f64 / whole.cents() as f64 * 100.0;
    ratio.round().max(0.0) as u32
}

/// Spending report for one user over a date range
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub range: DateRange,
    pub breakdown: SpendingBreakdown,
    pub expense_count: usize,
}

impl SpendingReport {
    /// Generate a spending report for the session user
    pub fn generate(storage: &Storage, session: &Session, range: DateRange) -> BudgetResult<Self> {
        let categories = storage.categories.get_for_user(session.user_id)?;
        let expenses = storage
            .expenses
            .get_for_user_in_range(session.user_id, range)?;

        Ok(Self::from_expenses(range, &expenses, &categories))
    }

    pub fn from_expenses(range: DateRange, expenses: &[Expense], categories: &[Category]) -> Self {
        Self {
            range,
            breakdown: aggregate_spending(expenses, categories),
            expense_count: expenses.len(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report: {} to {}\n",
            self.range.start(),
            self.range.end()
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.breakdown.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>12} {:>7} {:>6}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for total in &self.breakdown.category_totals {
            output.push_str(&format!(
                "{:<30} {:>12} {:>7} {:>5}%\n",
                total.category_name,
                total.total.format_with_symbol(currency_symbol),
                total.expense_count,
                total.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} {:>7}\n",
            "TOTAL",
            self.breakdown.total_amount.format_with_symbol(currency_symbol),
            self.expense_count
        ));

        output
    }

    /// Export the report rows as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let start = self.range.start().to_string();
        let end = self.range.end().to_string();

        csv.write_record([
            "Start Date",
            "End Date",
            "Category",
            "Amount",
            "Expense Count",
            "Percentage",
        ])
        .map_err(csv_error)?;

        for total in &self.breakdown.category_totals {
            let amount = format!("{:.2}", total.total.as_f64());
            let count = total.expense_count.to_string();
            let share = total.percentage.to_string();
            csv.write_record([
                start.as_str(),
                end.as_str(),
                total.category_name.as_str(),
                amount.as_str(),
                count.as_str(),
                share.as_str(),
            ])
            .map_err(csv_error)?;
        }

        let amount = format!("{:.2}", self.breakdown.total_amount.as_f64());
        let count = self.expense_count.to_string();
        let share = if self.breakdown.total_amount.is_zero() { "0" } else { "100" };
        csv.write_record([
            start.as_str(),
            end.as_str(),
            "TOTAL",
            amount.as_str(),
            count.as_str(),
            share,
        ])
        .map_err(csv_error)?;

        csv.flush()
            .map_err(|e| BudgetError::Io(format!("Failed to write CSV: {}", e)))
    }

    /// The `limit` largest category totals
    pub fn top_categories(&self, limit: usize) -> &[CategoryTotal] {
        let end = limit.min(self.breakdown.category_totals.len());
        &self.breakdown.category_totals[..end]
    }
}

fn csv_error(err: csv::Error) -> BudgetError {
    BudgetError::Io(format!("Failed to write CSV: {}", err))
}
