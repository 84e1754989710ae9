//! Storage layer for BudgetIQ
//!
//! JSON file repositories with atomic writes, the saved login session, and
//! the audit log every mutation is recorded in.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod users;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::initialize_storage;
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Session;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    audit: AuditLogger,
    pub users: UserRepository,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
    pub goals: GoalRepository,
}

impl Storage {
    /// Create a Storage rooted at `paths`, creating its directories
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            users: UserRepository::new(paths.users_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            goals: GoalRepository::new(paths.goals_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BudgetError> {
        self.users.load()?;
        self.categories.load()?;
        self.expenses.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.users.save()?;
        self.categories.save()?;
        self.expenses.save()?;
        self.goals.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    // === Session ===

    /// The saved login session, if any
    pub fn load_session(&self) -> BudgetResult<Option<Session>> {
        read_json(self.paths.session_file())
    }

    pub fn save_session(&self, session: &Session) -> BudgetResult<()> {
        write_json_atomic(self.paths.session_file(), session)
    }

    pub fn clear_session(&self) -> BudgetResult<()> {
        file_io::remove_if_exists(self.paths.session_file())
    }

    // === Audit ===

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update; the diff summary is computed when not supplied
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> BudgetResult<()> {
        let diff_summary = match diff_summary {
            Some(summary) => Some(summary),
            None => generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(after)?),
        };

        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_session(&self, operation: Operation, session: &Session) -> BudgetResult<()> {
        self.audit.log(&AuditEntry::session(
            operation,
            session.user_id.to_string(),
            &session.username,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Color, User};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_session_round_trip() {
        let (_temp_dir, storage) = create_test_storage();
        assert!(storage.load_session().unwrap().is_none());

        let user = User::new("alice", "secret").unwrap();
        let session = Session::for_user(&user);
        storage.save_session(&session).unwrap();
        assert_eq!(storage.load_session().unwrap(), Some(session));

        storage.clear_session().unwrap();
        assert!(storage.load_session().unwrap().is_none());
    }

    #[test]
    fn test_log_update_computes_diff() {
        let (_temp_dir, storage) = create_test_storage();
        let before = Category::new(crate::models::UserId::new(), "Food", Color::GRAY);
        let mut after = before.clone();
        after.rename("Groceries");

        storage
            .log_update(
                EntityType::Category,
                after.id.to_string(),
                Some(after.name.clone()),
                &before,
                &after,
                None,
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        let diff = entries[0].diff_summary.as_deref().unwrap();
        assert!(diff.contains("name: \"Food\" -> \"Groceries\""));
        assert!(!diff.contains("updated_at"));
    }
}
