//! Configuration module for BudgetIQ
//!
//! - Path resolution for data, settings, session and audit files
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
