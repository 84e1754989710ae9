//! Audit logging for BudgetIQ
//!
//! Every create, update and delete of a user, category, expense or budget
//! goal is appended to `audit.log` with before/after snapshots, as are
//! logins and logouts.
//!
//! - `AuditEntry`: one log record
//! - `AuditLogger`: JSONL writer and reader
//! - `generate_diff`: short summary of what an update changed

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
