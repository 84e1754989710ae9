//! Storage initialization
//!
//! First-run setup: directories, settings file and empty data files.

use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::BudgetError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running it twice is harmless.
pub fn initialize_storage(paths: &BudgetPaths) -> Result<(), BudgetError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    let empty_files = [
        (paths.users_file(), "users"),
        (paths.categories_file(), "categories"),
        (paths.expenses_file(), "expenses"),
        (paths.goals_file(), "goals"),
    ];

    for (path, key) in empty_files {
        if !path.exists() {
            write_json_atomic(&path, &serde_json::json!({ key: [] }))?;
        }
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BudgetPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Color, UserId};
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.users_file().exists());
        assert!(paths.goals_file().exists());

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.users.count().unwrap(), 0);
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let user = UserId::new();
        let storage = Storage::new(paths.clone()).unwrap();
        storage
            .categories
            .upsert(Category::new(user, "Custom", Color::GRAY))
            .unwrap();
        storage.categories.save().unwrap();

        initialize_storage(&paths).unwrap();

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.categories.count_for_user(user).unwrap(), 1);
    }
}
