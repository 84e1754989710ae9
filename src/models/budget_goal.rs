//! Budget goal model and evaluation
//!
//! A budget goal sets the minimum and maximum a user intends to spend in one
//! category per month. Evaluating a goal against actual spending classifies
//! it as under the minimum, on track, or over the maximum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetGoalId, CategoryId, UserId};
use super::money::Money;

/// A per-category spending goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub id: BudgetGoalId,

    pub user_id: UserId,

    pub category_id: CategoryId,

    pub min_amount: Money,

    pub max_amount: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetGoal {
    pub fn new(user_id: UserId, category_id: CategoryId, min_amount: Money, max_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetGoalId::new(),
            user_id,
            category_id,
            min_amount,
            max_amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace both bounds
    pub fn set_range(&mut self, min_amount: Money, max_amount: Money) {
        self.min_amount = min_amount;
        self.max_amount = max_amount;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        validate_goal_range(self.min_amount, self.max_amount)
    }

    /// Evaluate this goal against an amount spent
    pub fn evaluate(&self, spent: Money) -> GoalEvaluation {
        evaluate_goal(self.min_amount, self.max_amount, spent)
    }
}

impl fmt::Display for BudgetGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min_amount, self.max_amount)
    }
}

/// Where actual spending sits relative to a goal's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Spent less than the minimum
    UnderMin,
    /// Between the minimum and maximum, inclusive
    OnTrack,
    /// Spent more than the maximum
    OverMax,
}

impl GoalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderMin => "Under minimum",
            Self::OnTrack => "On track",
            Self::OverMax => "Over maximum",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of evaluating a goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalEvaluation {
    pub status: GoalStatus,
    /// `spent / max`, clamped to `0.0..=1.0`; 0.0 for a zero maximum
    pub progress_ratio: f64,
    /// `max - spent`; negative once over the maximum
    pub remaining: Money,
}

impl GoalEvaluation {
    /// Progress as a whole percentage
    pub fn progress_percent(&self) -> u32 {
        (self.progress_ratio * 100.0).round() as u32
    }
}

/// Classify spending against a `(min, max)` goal
pub fn evaluate_goal(min_amount: Money, max_amount: Money, spent: Money) -> GoalEvaluation {
    let status = if spent < min_amount {
        GoalStatus::UnderMin
    } else if spent > max_amount {
        GoalStatus::OverMax
    } else {
        GoalStatus::OnTrack
    };

    let progress_ratio = if max_amount.is_positive() {
        (spent.cents() as f64 / max_amount.cents() as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    GoalEvaluation {
        status,
        progress_ratio,
        remaining: max_amount - spent,
    }
}

/// Check goal bounds before a goal is created or updated
pub fn validate_goal_range(min_amount: Money, max_amount: Money) -> Result<(), GoalValidationError> {
    if min_amount.is_negative() || max_amount.is_negative() {
        return Err(GoalValidationError::NegativeAmount);
    }

    if !min_amount.is_within_limit() || !max_amount.is_within_limit() {
        return Err(GoalValidationError::AmountTooLarge);
    }

    if max_amount < min_amount {
        return Err(GoalValidationError::InvalidRange {
            min: min_amount,
            max: max_amount,
        });
    }

    Ok(())
}

/// Validation errors for budget goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    InvalidRange { min: Money, max: Money },
    NegativeAmount,
    AmountTooLarge,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { min, max } => write!(
                f,
                "Maximum amount ({}) must be greater than minimum amount ({})",
                max, min
            ),
            Self::NegativeAmount => write!(f, "Goal amounts cannot be negative"),
            Self::AmountTooLarge => {
                write!(f, "Goal amounts cannot exceed {}", Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}
