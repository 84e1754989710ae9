//! BudgetIQ - command-line personal expense tracker
//!
//! Users record expenses against colored categories, review spending for a
//! week, month, year or custom range, and set minimum/maximum budget goals
//! per category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, categories, expenses, goals, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Spending aggregation and export
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetiq::config::{paths::BudgetPaths, settings::Settings};
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
