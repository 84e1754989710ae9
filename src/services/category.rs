//! Category service
//!
//! Business logic for a user's categories: CRUD, lookup by name or id, and
//! default-category seeding.

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::category::default_categories;
use crate::models::{Category, CategoryId, Color, Session, UserId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All of the session user's categories, sorted by name
    pub fn list(&self, session: &Session) -> BudgetResult<Vec<Category>> {
        self.storage.categories.get_for_user(session.user_id)
    }

    /// Get one of the session user's categories by id
    pub fn get(&self, session: &Session, id: CategoryId) -> BudgetResult<Category> {
        self.storage
            .categories
            .get(id)?
            .filter(|c| c.user_id == session.user_id)
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }

    /// Find a category by name (case-insensitive) or by id
    pub fn find(&self, session: &Session, identifier: &str) -> BudgetResult<Category> {
        if let Some(category) = self
            .storage
            .categories
            .get_by_name(session.user_id, identifier)?
        {
            return Ok(category);
        }

        let mut matches = self
            .list(session)?
            .into_iter()
            .filter(|c| c.id.matches(identifier));

        match (matches.next(), matches.next()) {
            (Some(category), None) => Ok(category),
            (Some(_), Some(_)) => Err(BudgetError::Validation(format!(
                "Category id '{}' is ambiguous; use more characters",
                identifier
            ))),
            _ => Err(BudgetError::category_not_found(identifier)),
        }
    }

    /// Create a new category
    pub fn create(
        &self,
        session: &Session,
        name: &str,
        color: Option<Color>,
    ) -> BudgetResult<Category> {
        let name = name.trim();
        self.ensure_name_free(session.user_id, name, None)?;

        let category = Category::new(session.user_id, name, color.unwrap_or_default());
        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Rename and/or recolor a category
    pub fn update(
        &self,
        session: &Session,
        id: CategoryId,
        name: Option<&str>,
        color: Option<Color>,
    ) -> BudgetResult<Category> {
        let mut category = self.get(session, id)?;
        let before = category.clone();

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            self.ensure_name_free(session.user_id, new_name, Some(id))?;
            category.rename(new_name);
        }

        if let Some(color) = color {
            category.set_color(color);
        }

        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
            None,
        )?;

        Ok(category)
    }

    /// Delete a category
    ///
    /// Expenses and goals referencing it are kept; reports show them under
    /// "Unknown Category".
    pub fn delete(&self, session: &Session, id: CategoryId) -> BudgetResult<Category> {
        let category = self.get(session, id)?;

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Create the default categories for a user who has none
    ///
    /// Returns the categories created, which is empty when the user already
    /// had categories.
    pub fn seed_defaults(&self, user_id: UserId) -> BudgetResult<Vec<Category>> {
        if self.storage.categories.count_for_user(user_id)? > 0 {
            return Ok(Vec::new());
        }

        let categories = default_categories(user_id);
        for category in &categories {
            self.storage.categories.upsert(category.clone())?;
        }
        self.storage.categories.save()?;

        for category in &categories {
            self.storage.log_create(
                EntityType::Category,
                category.id.to_string(),
                Some(category.name.clone()),
                category,
            )?;
        }

        Ok(categories)
    }

    fn ensure_name_free(
        &self,
        user_id: UserId,
        name: &str,
        exclude: Option<CategoryId>,
    ) -> BudgetResult<()> {
        match self.storage.categories.get_by_name(user_id, name)? {
            Some(existing) if Some(existing.id) != exclude => Err(BudgetError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
