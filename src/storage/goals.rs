//! Budget goal repository for JSON storage
//!
//! Manages loading and saving budget goals to goals.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{BudgetGoal, BudgetGoalId, CategoryId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    goals: Vec<BudgetGoal>,
}

/// Repository for budget goal persistence
pub struct GoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetGoalId, BudgetGoal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for goal in file_data.goals {
            data.insert(goal.id, goal);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by_key(|g| g.created_at);

        write_json_atomic(&self.path, &GoalData { goals })
    }

    pub fn get(&self, id: BudgetGoalId) -> Result<Option<BudgetGoal>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All goals of one user, oldest first
    pub fn get_for_user(&self, user_id: UserId) -> Result<Vec<BudgetGoal>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by_key(|g| g.created_at);
        Ok(list)
    }

    /// The user's goal for a category, if one exists
    pub fn get_for_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<Option<BudgetGoal>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|g| g.user_id == user_id && g.category_id == category_id)
            .cloned())
    }

    pub fn upsert(&self, goal: BudgetGoal) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(goal.id, goal);
        Ok(())
    }

    /// Delete a goal, returning whether it existed
    pub fn delete(&self, id: BudgetGoalId) -> Result<bool, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }
}
