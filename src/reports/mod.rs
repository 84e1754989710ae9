//! Reports module for BudgetIQ
//!
//! Spend aggregation by category and the spending report built on it.

pub mod spending;

pub use spending::{aggregate_spending, CategoryTotal, SpendingBreakdown, SpendingReport};
