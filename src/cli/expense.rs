//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_summary};
use crate::error::BudgetResult;
use crate::services::{CategoryService, ExpenseService, ExpenseUpdate, NewExpense, PeriodService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_opt, parse_time, require_session};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g. "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// What it was for
        description: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// End time (HH:MM, default the start time)
        #[arg(long)]
        end: Option<String>,
        /// Path to a receipt photo
        #[arg(long)]
        photo: Option<String>,
    },

    /// List expenses for a period with category totals
    List {
        /// week, month, year, or START..END
        #[arg(short, long)]
        period: Option<String>,
        /// First day of a custom range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Last day of a custom range (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, conflicts_with = "clear_photo")]
        photo: Option<String>,
        /// Remove the receipt photo
        #[arg(long)]
        clear_photo: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let session = require_session(storage)?;
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);
    let periods = PeriodService::new(settings);

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
            start,
            end,
            photo,
        } => {
            let category = categories.find(&session, &category)?;
            let input = NewExpense {
                category_id: category.id,
                amount: parse_amount(&amount)?,
                description,
                date: parse_opt(date.as_deref(), parse_date)?.unwrap_or(periods.today()),
                start_time: parse_opt(start.as_deref(), parse_time)?,
                end_time: parse_opt(end.as_deref(), parse_time)?,
                photo_path: photo,
            };

            let expense = service.add(&session, input)?;
            println!(
                "Added expense: {} {} ({})",
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.description,
                category.name
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { period, start, end } => {
            let selector = periods.select(
                period.as_deref(),
                parse_opt(start.as_deref(), parse_date)?,
                parse_opt(end.as_deref(), parse_date)?,
            )?;
            let summary = service.summary(&session, selector, periods.today())?;
            let all_categories = categories.list(&session)?;

            print!(
                "{}",
                format_expense_summary(
                    &summary,
                    &all_categories,
                    &periods.describe(selector),
                    &settings.currency_symbol,
                    &settings.date_format,
                )
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&session, &id)?;
            let category = storage.categories.get(expense.category_id)?;
            print!(
                "{}",
                format_expense_details(&expense, category.as_ref().map(|c| c.name.as_str()))
            );
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            category,
            date,
            start,
            end,
            photo,
            clear_photo,
        } => {
            let expense = service.find(&session, &id)?;
            let category_id = match category {
                Some(name) => Some(categories.find(&session, &name)?.id),
                None => None,
            };
            let photo_path = if clear_photo { Some(None) } else { photo.map(Some) };

            let changes = ExpenseUpdate {
                category_id,
                amount: parse_opt(amount.as_deref(), parse_amount)?,
                description,
                date: parse_opt(date.as_deref(), parse_date)?,
                start_time: parse_opt(start.as_deref(), parse_time)?,
                end_time: parse_opt(end.as_deref(), parse_time)?,
                photo_path,
            };

            let updated = service.update(&session, expense.id, changes)?;
            println!("Updated expense: {}", updated.id);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.find(&session, &id)?;
            let deleted = service.delete(&session, expense.id)?;
            println!(
                "Deleted expense: {} {}",
                deleted.amount.format_with_symbol(&settings.currency_symbol),
                deleted.description
            );
        }
    }

    Ok(())
}
