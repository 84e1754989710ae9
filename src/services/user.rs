//! User and session service
//!
//! Registration, login and logout. The logged-in user is represented by an
//! explicit [`Session`] that callers pass to every other service.

use crate::audit::{EntityType, Operation};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Session, User};
use crate::storage::Storage;

use super::category::CategoryService;

/// Service for user accounts and sessions
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user and seed their default categories
    pub fn register(&self, username: &str, password: &str) -> BudgetResult<(User, Vec<Category>)> {
        if self.storage.users.get_by_username(username)?.is_some() {
            return Err(BudgetError::Duplicate {
                entity_type: "User",
                identifier: username.trim().to_string(),
            });
        }

        let user =
            User::new(username, password).map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        // The password hash stays out of the audit log
        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            &serde_json::json!({ "username": user.username, "created_at": user.created_at }),
        )?;

        let categories = CategoryService::new(self.storage).seed_defaults(user.id)?;

        Ok((user, categories))
    }

    /// Check credentials and start a session
    ///
    /// Unknown usernames and wrong passwords fail the same way.
    pub fn login(&self, username: &str, password: &str) -> BudgetResult<Session> {
        let user = self
            .storage
            .users
            .get_by_username(username)?
            .ok_or(BudgetError::Authentication)?;

        if !user.verify_password(password) {
            return Err(BudgetError::Authentication);
        }

        let session = Session::for_user(&user);
        self.storage.save_session(&session)?;
        self.storage.log_session(Operation::Login, &session)?;

        Ok(session)
    }

    /// End the current session, returning it if there was one
    pub fn logout(&self) -> BudgetResult<Option<Session>> {
        let session = self.storage.load_session()?;

        if let Some(session) = &session {
            self.storage.clear_session()?;
            self.storage.log_session(Operation::Logout, session)?;
        }

        Ok(session)
    }

    /// The saved session, if its user still exists
    pub fn current_session(&self) -> BudgetResult<Option<Session>> {
        match self.storage.load_session()? {
            Some(session) if self.storage.users.get(session.user_id)?.is_some() => Ok(Some(session)),
            _ => Ok(None),
        }
    }

    /// The saved session, or `NotLoggedIn`
    pub fn require_session(&self) -> BudgetResult<Session> {
        self.current_session()?.ok_or(BudgetError::NotLoggedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_register_seeds_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let (user, categories) = service.register("alice", "secret").unwrap();

        assert_eq!(user.username, "alice");
        assert!(!categories.is_empty());
        assert_eq!(
            storage.categories.count_for_user(user.id).unwrap(),
            categories.len()
        );
    }

    #[test]
    fn test_register_rejects_duplicate_username() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.register("alice", "secret").unwrap();

        let err = service.register("ALICE", "other").unwrap_err();
        assert!(matches!(err, BudgetError::Duplicate { .. }));
    }

    #[test]
    fn test_register_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        assert!(service.register("  ", "secret").unwrap_err().is_validation());
        assert!(service.register("bob", "no").unwrap_err().is_validation());
    }

    #[test]
    fn test_audit_omits_password_hash() {
        let (_temp_dir, storage) = create_test_storage();
        UserService::new(&storage).register("alice", "secret").unwrap();

        let entries = storage.audit().read_all().unwrap();
        let user_entry = entries
            .iter()
            .find(|e| e.entity_type == EntityType::User)
            .unwrap();
        let after = user_entry.after.as_ref().unwrap();
        assert!(after.get("password_hash").is_none());
    }

    #[test]
    fn test_login_and_logout() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        let (user, _) = service.register("alice", "secret").unwrap();

        assert!(matches!(
            service.require_session().unwrap_err(),
            BudgetError::NotLoggedIn
        ));

        let session = service.login("Alice", "secret").unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(service.require_session().unwrap().user_id, user.id);

        let ended = service.logout().unwrap().unwrap();
        assert_eq!(ended.user_id, user.id);
        assert!(service.current_session().unwrap().is_none());
        assert!(service.logout().unwrap().is_none());
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.register("alice", "secret").unwrap();

        assert!(matches!(
            service.login("alice", "wrong").unwrap_err(),
            BudgetError::Authentication
        ));
        assert!(matches!(
            service.login("nobody", "secret").unwrap_err(),
            BudgetError::Authentication
        ));
        assert!(service.current_session().unwrap().is_none());
    }
}
