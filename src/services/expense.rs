//! Expense service
//!
//! Recording, editing and listing expenses, and the period summary shown on
//! the expense list.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    CategoryId, DateRange, Expense, ExpenseId, Money, PeriodSelector, Session,
};
use crate::reports::spending::{aggregate_spending, SpendingBreakdown};
use crate::storage::Storage;

use super::category::CategoryService;

/// Input for recording an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub category_id: CategoryId,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub photo_path: Option<String>,
}

/// Fields to change on an existing expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// `Some(None)` removes the photo
    pub photo_path: Option<Option<String>>,
}

/// Expenses in a period together with their totals
#[derive(Debug, Clone)]
pub struct ExpenseSummary {
    pub selector: PeriodSelector,
    pub range: DateRange,
    /// Newest first
    pub expenses: Vec<Expense>,
    pub breakdown: SpendingBreakdown,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn add(&self, session: &Session, input: NewExpense) -> BudgetResult<Expense> {
        // The category must belong to the session user
        CategoryService::new(self.storage).get(session, input.category_id)?;

        let mut expense = Expense::new(
            session.user_id,
            input.category_id,
            input.amount,
            input.description.trim(),
            input.date,
        );
        expense.start_time = input.start_time.unwrap_or(expense.start_time);
        expense.end_time = input.end_time.unwrap_or(expense.start_time);
        expense.photo_path = input.photo_path;

        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Get one of the session user's expenses
    pub fn get(&self, session: &Session, id: ExpenseId) -> BudgetResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .filter(|e| e.user_id == session.user_id)
            .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))
    }

    /// Find an expense by full or short id
    pub fn find(&self, session: &Session, identifier: &str) -> BudgetResult<Expense> {
        let mut matches = self
            .storage
            .expenses
            .get_for_user(session.user_id)?
            .into_iter()
            .filter(|e| e.id.matches(identifier));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense),
            (Some(_), Some(_)) => Err(BudgetError::Validation(format!(
                "Expense id '{}' is ambiguous; use more characters",
                identifier
            ))),
            _ => Err(BudgetError::expense_not_found(identifier)),
        }
    }

    /// Apply changes to an expense
    pub fn update(
        &self,
        session: &Session,
        id: ExpenseId,
        changes: ExpenseUpdate,
    ) -> BudgetResult<Expense> {
        let mut expense = self.get(session, id)?;
        let before = expense.clone();

        if let Some(category_id) = changes.category_id {
            CategoryService::new(self.storage).get(session, category_id)?;
            expense.category_id = category_id;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(description) = changes.description {
            expense.description = description.trim().to_string();
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(start_time) = changes.start_time {
            expense.start_time = start_time;
        }
        if let Some(end_time) = changes.end_time {
            expense.end_time = end_time;
        }
        if let Some(photo_path) = changes.photo_path {
            expense.photo_path = photo_path;
        }

        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        expense.updated_at = Utc::now();

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
            None,
        )?;

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, session: &Session, id: ExpenseId) -> BudgetResult<Expense> {
        let expense = self.get(session, id)?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// The session user's expenses dated inside `range`, newest first
    pub fn list(&self, session: &Session, range: DateRange) -> BudgetResult<Vec<Expense>> {
        self.storage
            .expenses
            .get_for_user_in_range(session.user_id, range)
    }

    /// Expenses and category totals for a period around `today`
    pub fn summary(
        &self,
        session: &Session,
        selector: PeriodSelector,
        today: NaiveDate,
    ) -> BudgetResult<ExpenseSummary> {
        let range = selector.resolve(today);
        let expenses = self.list(session, range)?;
        let categories = self.storage.categories.get_for_user(session.user_id)?;
        let breakdown = aggregate_spending(&expenses, &categories);

        Ok(ExpenseSummary {
            selector,
            range,
            expenses,
            breakdown,
        })
    }

    /// Lifetime spend in one of the session user's categories
    pub fn total_for_category(&self, session: &Session, category_id: CategoryId) -> BudgetResult<Money> {
        CategoryService::new(self.storage).get(session, category_id)?;
        self.storage.expenses.total_for_category(category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::{Category, Color, User};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, Session, Category) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let session = Session::for_user(&User::new("alice", "secret").unwrap());
        let food = CategoryService::new(&storage)
            .create(&session, "Food", Some(Color::from_rgb(0xF44336)))
            .unwrap();
        (temp_dir, storage, session, food)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn new_expense(category_id: CategoryId, units: i64, on: NaiveDate) -> NewExpense {
        NewExpense {
            category_id,
            amount: Money::from_units(units),
            description: "Lunch".into(),
            date: on,
            start_time: None,
            end_time: None,
            photo_path: None,
        }
    }

    #[test]
    fn test_add_expense() {
        let (_temp_dir, storage, session, food) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let mut input = new_expense(food.id, 12, date(3, 5));
        input.start_time = NaiveTime::from_hms_opt(12, 30, 0);
        input.photo_path = Some("receipts/lunch.jpg".into());
        let expense = service.add(&session, input).unwrap();

        assert_eq!(expense.user_id, session.user_id);
        assert_eq!(expense.end_time, expense.start_time);
        assert_eq!(expense.photo_path.as_deref(), Some("receipts/lunch.jpg"));
        assert_eq!(
            service.total_for_category(&session, food.id).unwrap(),
            Money::from_units(12)
        );
    }

    #[test]
    fn test_add_rejects_invalid_expenses() {
        let (_temp_dir, storage, session, food) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert!(service
            .add(&session, new_expense(food.id, 0, date(3, 5)))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(&session, new_expense(food.id, -5, date(3, 5)))
            .unwrap_err()
            .is_validation());

        let mut blank = new_expense(food.id, 5, date(3, 5));
        blank.description = "   ".into();
        assert!(service.add(&session, blank).unwrap_err().is_validation());

        assert!(service
            .add(&session, new_expense(CategoryId::new(), 5, date(3, 5)))
            .unwrap_err()
            .is_not_found());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_cannot_file_under_another_users_category() {
        let (_temp_dir, storage, _alice, food) = create_test_storage();
        let bob = Session::for_user(&User::new("bob", "secret").unwrap());

        let err = ExpenseService::new(&storage)
            .add(&bob, new_expense(food.id, 5, date(3, 5)))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, storage, session, food) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.add(&session, new_expense(food.id, 12, date(3, 5))).unwrap();

        let updated = service
            .update(
                &session,
                expense.id,
                ExpenseUpdate {
                    amount: Some(Money::from_units(20)),
                    description: Some("Dinner".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, Money::from_units(20));
        assert_eq!(updated.description, "Dinner");

        let bad = ExpenseUpdate {
            amount: Some(Money::zero()),
            ..Default::default()
        };
        assert!(service.update(&session, expense.id, bad).unwrap_err().is_validation());
        assert_eq!(service.get(&session, expense.id).unwrap().amount, Money::from_units(20));

        service.delete(&session, expense.id).unwrap();
        assert!(service.get(&session, expense.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage, session, food) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.add(&session, new_expense(food.id, 12, date(3, 5))).unwrap();

        let found = service.find(&session, &expense.id.to_string()).unwrap();
        assert_eq!(found.id, expense.id);
        assert!(service.find(&session, "exp-zzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_summary_for_month() {
        let (_temp_dir, storage, session, food) = create_test_storage();
        let rent = CategoryService::new(&storage)
            .create(&session, "Rent", None)
            .unwrap();
        let service = ExpenseService::new(&storage);

        service.add(&session, new_expense(food.id, 30, date(3, 2))).unwrap();
        service.add(&session, new_expense(rent.id, 10, date(3, 20))).unwrap();
        service.add(&session, new_expense(food.id, 20, date(3, 31))).unwrap();
        service.add(&session, new_expense(food.id, 99, date(4, 1))).unwrap();

        let summary = service
            .summary(&session, PeriodSelector::Month, date(3, 15))
            .unwrap();

        assert_eq!(summary.range, DateRange::new(date(3, 1), date(3, 31)));
        assert_eq!(summary.expenses.len(), 3);
        assert_eq!(summary.expenses[0].date, date(3, 31));
        assert_eq!(summary.breakdown.total_amount, Money::from_units(60));
        assert_eq!(summary.breakdown.category_totals[0].category_name, "Food");
        assert_eq!(summary.breakdown.category_totals[0].total, Money::from_units(50));
        assert_eq!(summary.breakdown.category_totals[1].category_name, "Rent");
    }

    #[test]
    fn test_each_mutation_is_audited() {
        let (_temp_dir, storage, session, food) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let setup_entries = storage.audit().read_all().unwrap().len();

        let expense = service
            .add(&session, new_expense(food.id, 12, date(3, 1)))
            .unwrap();
        service
            .update(
                &session,
                expense.id,
                ExpenseUpdate {
                    amount: Some(Money::from_units(15)),
                    ..Default::default()
                },
            )
            .unwrap();
        service.delete(&session, expense.id).unwrap();

        let entries = storage.audit().read_all().unwrap();
        let entries = &entries[setup_entries..];
        let operations: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            operations,
            vec![
                crate::audit::Operation::Create,
                crate::audit::Operation::Update,
                crate::audit::Operation::Delete
            ]
        );
        assert!(entries.iter().all(|e| e.entity_type == EntityType::Expense));
        assert!(entries.iter().all(|e| e.entity_id == expense.id.to_string()));
        assert_eq!(entries[1].diff_summary.as_deref(), Some("amount: 1200 -> 1500"));
    }
}
