//! Display formatting for terminal output
//!
//! Formats categories, expenses and goal progress as plain strings for the
//! CLI to print.

pub mod category;
pub mod expense;
pub mod goal;

pub use category::{format_category_details, format_category_list};
pub use expense::{
    format_category_totals, format_expense_details, format_expense_summary, format_expense_table,
};
pub use goal::{format_goal_progress, format_progress_bar};
