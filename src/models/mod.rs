//! Core data models for BudgetIQ
//!
//! This module contains the data structures of the expense-tracking domain:
//! users, categories, expenses, budget goals and reporting periods.

pub mod budget_goal;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod user;

pub use budget_goal::{evaluate_goal, BudgetGoal, GoalEvaluation, GoalStatus};
pub use category::{Category, Color};
pub use expense::Expense;
pub use ids::{BudgetGoalId, CategoryId, ExpenseId, UserId};
pub use money::Money;
pub use period::{resolve_period, DateRange, PeriodSelector};
pub use user::{Session, User};
