//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with an index from
//! category to expense ids for per-category sums.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{CategoryId, DateRange, Expense, ExpenseId, Money, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a category index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: category_id -> expense_ids
    by_category: RwLock<HashMap<CategoryId, Vec<ExpenseId>>>,
}

/// Newest first, by date then by start time
fn sort_newest_first(list: &mut [Expense]) {
    list.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.start_time.cmp(&a.start_time))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the category index
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_category.clear();

        for expense in file_data.expenses {
            by_category
                .entry(expense.category_id)
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk, oldest first
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All expenses of one user, newest first
    pub fn get_for_user(&self, user_id: UserId) -> Result<Vec<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut list);
        Ok(list)
    }

    /// Expenses of one user dated inside `range` (inclusive), newest first
    pub fn get_for_user_in_range(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data
            .values()
            .filter(|e| e.user_id == user_id && range.contains(e.date))
            .cloned()
            .collect();
        sort_newest_first(&mut list);
        Ok(list)
    }

    /// Lifetime spend filed under a category
    pub fn total_for_category(&self, category_id: CategoryId) -> Result<Money, BudgetError> {
        self.sum_category(category_id, None)
    }

    /// Spend filed under a category within `range`
    pub fn total_for_category_in_range(
        &self,
        category_id: CategoryId,
        range: DateRange,
    ) -> Result<Money, BudgetError> {
        self.sum_category(category_id, Some(range))
    }

    fn sum_category(
        &self,
        category_id: CategoryId,
        range: Option<DateRange>,
    ) -> Result<Money, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let total = by_category
            .get(&category_id)
            .into_iter()
            .flatten()
            .filter_map(|id| data.get(id))
            .filter(|e| range.map_or(true, |r| r.contains(e.date)))
            .map(|e| e.amount)
            .sum();

        Ok(total)
    }

    /// Insert or update an expense, keeping the category index current
    pub fn upsert(&self, expense: Expense) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_category
            .entry(expense.category_id)
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);

        Ok(())
    }

    /// Delete an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(ids) = by_category.get_mut(&expense.category_id) {
                    ids.retain(|&eid| eid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
