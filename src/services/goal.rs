//! Budget goal service
//!
//! Creates, edits and deletes per-category spending goals, and evaluates each
//! goal against what was spent in a period.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    BudgetGoal, BudgetGoalId, CategoryId, Color, DateRange, GoalEvaluation, Money,
    PeriodSelector, Session,
};
use crate::reports::spending::UNKNOWN_CATEGORY;
use crate::storage::Storage;

use super::category::CategoryService;

/// A goal evaluated against one period's spending
#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub goal: BudgetGoal,
    pub category_name: String,
    pub color: Color,
    pub range: DateRange,
    pub spent: Money,
    pub evaluation: GoalEvaluation,
}

/// Service for budget goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All of the session user's goals, oldest first
    pub fn list(&self, session: &Session) -> BudgetResult<Vec<BudgetGoal>> {
        self.storage.goals.get_for_user(session.user_id)
    }

    pub fn get(&self, session: &Session, id: BudgetGoalId) -> BudgetResult<BudgetGoal> {
        self.storage
            .goals
            .get(id)?
            .filter(|g| g.user_id == session.user_id)
            .ok_or_else(|| BudgetError::goal_not_found(id.to_string()))
    }

    /// Find a goal by its id or by the name or id of its category
    pub fn find(&self, session: &Session, identifier: &str) -> BudgetResult<BudgetGoal> {
        let goals = self.list(session)?;

        let mut matches = goals.iter().filter(|g| g.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(goal), None) => return Ok(goal.clone()),
            (Some(_), Some(_)) => {
                return Err(BudgetError::Validation(format!(
                    "Goal id '{}' is ambiguous; use more characters",
                    identifier
                )))
            }
            _ => {}
        }

        let category = CategoryService::new(self.storage)
            .find(session, identifier)
            .map_err(|_| BudgetError::goal_not_found(identifier))?;

        goals
            .into_iter()
            .find(|g| g.category_id == category.id)
            .ok_or_else(|| BudgetError::goal_not_found(identifier))
    }

    /// Create a goal for one of the session user's categories
    pub fn create_budget_goal(
        &self,
        session: &Session,
        category_id: CategoryId,
        min_amount: Money,
        max_amount: Money,
    ) -> BudgetResult<BudgetGoal> {
        let category = CategoryService::new(self.storage).get(session, category_id)?;

        let goal = BudgetGoal::new(session.user_id, category_id, min_amount, max_amount);
        goal.validate()?;

        if self
            .storage
            .goals
            .get_for_category(session.user_id, category_id)?
            .is_some()
        {
            return Err(BudgetError::Duplicate {
                entity_type: "Budget goal",
                identifier: category.name,
            });
        }

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_create(
            EntityType::BudgetGoal,
            goal.id.to_string(),
            Some(category.name),
            &goal,
        )?;

        Ok(goal)
    }

    /// Change a goal's bounds; a missing bound keeps its current value
    pub fn update_budget_goal(
        &self,
        session: &Session,
        id: BudgetGoalId,
        min_amount: Option<Money>,
        max_amount: Option<Money>,
    ) -> BudgetResult<BudgetGoal> {
        let mut goal = self.get(session, id)?;
        let before = goal.clone();

        goal.set_range(
            min_amount.unwrap_or(goal.min_amount),
            max_amount.unwrap_or(goal.max_amount),
        );
        goal.validate()?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_update(
            EntityType::BudgetGoal,
            goal.id.to_string(),
            self.category_name(goal.category_id)?,
            &before,
            &goal,
            None,
        )?;

        Ok(goal)
    }

    pub fn delete_budget_goal(&self, session: &Session, id: BudgetGoalId) -> BudgetResult<BudgetGoal> {
        let goal = self.get(session, id)?;

        self.storage.goals.delete(id)?;
        self.storage.goals.save()?;

        self.storage.log_delete(
            EntityType::BudgetGoal,
            goal.id.to_string(),
            self.category_name(goal.category_id)?,
            &goal,
        )?;

        Ok(goal)
    }

    /// Evaluate every goal against spending in the period around `today`
    pub fn list_goal_progress(
        &self,
        session: &Session,
        selector: PeriodSelector,
        today: NaiveDate,
    ) -> BudgetResult<Vec<GoalProgress>> {
        let range = selector.resolve(today);
        let goals = self.list(session)?;
        let mut progress = Vec::with_capacity(goals.len());

        for goal in goals {
            let spent = self
                .storage
                .expenses
                .total_for_category_in_range(goal.category_id, range)?;
            let (category_name, color) = match self.storage.categories.get(goal.category_id)? {
                Some(category) => (category.name, category.color),
                None => (UNKNOWN_CATEGORY.to_string(), Color::GRAY),
            };

            progress.push(GoalProgress {
                evaluation: goal.evaluate(spent),
                goal,
                category_name,
                color,
                range,
                spent,
            });
        }

        progress.sort_by(|a, b| a.category_name.to_lowercase().cmp(&b.category_name.to_lowercase()));
        Ok(progress)
    }

    fn category_name(&self, category_id: CategoryId) -> BudgetResult<Option<String>> {
        Ok(self.storage.categories.get(category_id)?.map(|c| c.name))
    }
}
