//! Service layer for BudgetIQ
//!
//! Business logic on top of the storage layer: validation, ownership checks,
//! audit logging and the period summaries the CLI renders. Every operation
//! that acts for a user takes an explicit [`Session`](crate::models::Session).

pub mod category;
pub mod expense;
pub mod goal;
pub mod period;
pub mod user;

pub use category::CategoryService;
pub use expense::{ExpenseService, ExpenseSummary, ExpenseUpdate, NewExpense};
pub use goal::{GoalProgress, GoalService};
pub use period::PeriodService;
pub use user::UserService;
