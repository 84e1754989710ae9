//! Expense model
//!
//! An expense records money spent by one user in one category on a given
//! date, with the time-of-day window it covered and an optional photo of the
//! receipt.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub user_id: UserId,

    pub category_id: CategoryId,

    /// Amount spent, always positive
    pub amount: Money,

    pub description: String,

    pub date: NaiveDate,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,

    /// Path to a receipt photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense covering the whole day
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            user_id,
            category_id,
            amount,
            description: description.into(),
            date,
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            photo_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the time-of-day window
    pub fn with_times(mut self, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn with_photo(mut self, photo_path: impl Into<String>) -> Self {
        self.photo_path = Some(photo_path.into());
        self
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge);
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if let Some(photo) = &self.photo_path {
            if photo.trim().is_empty() {
                return Err(ExpenseValidationError::EmptyPhotoPath);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.description
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    EmptyDescription,
    EmptyPhotoPath,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
            Self::AmountTooLarge => write!(f, "Amount cannot exceed {}", Money::MAX_AMOUNT),
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::EmptyPhotoPath => write!(f, "Photo path cannot be blank"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
