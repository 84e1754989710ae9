//! Budget goal CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::goal::format_goal_progress;
use crate::error::BudgetResult;
use crate::services::{CategoryService, GoalService, PeriodService};
use crate::storage::Storage;

use super::{parse_amount, parse_opt, require_session};

/// Budget goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Show goals with spending for the period
    List {
        /// week, month, year, or START..END
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Set a spending range for a category
    Add {
        /// Category name or ID
        category: String,
        /// Minimum amount to spend
        #[arg(long, allow_hyphen_values = true)]
        min: String,
        /// Maximum amount to spend
        #[arg(long, allow_hyphen_values = true)]
        max: String,
    },

    /// Change a goal's bounds
    Edit {
        /// Goal ID or category name
        goal: String,
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,
    },

    /// Remove a goal
    Delete {
        /// Goal ID or category name
        goal: String,
    },
}

/// Handle a budget goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> BudgetResult<()> {
    let session = require_session(storage)?;
    let service = GoalService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::List { period } => {
            let periods = PeriodService::new(settings);
            let selector = periods.select_for_goals(period.as_deref())?;
            let progress = service.list_goal_progress(&session, selector, periods.today())?;
            print!("{}", format_goal_progress(&progress, currency));
        }

        GoalCommands::Add { category, min, max } => {
            let category = CategoryService::new(storage).find(&session, &category)?;
            let goal = service.create_budget_goal(
                &session,
                category.id,
                parse_amount(&min)?,
                parse_amount(&max)?,
            )?;

            println!(
                "Created goal for {}: {} to {}",
                category.name,
                goal.min_amount.format_with_symbol(currency),
                goal.max_amount.format_with_symbol(currency)
            );
            println!("  ID: {}", goal.id);
        }

        GoalCommands::Edit { goal, min, max } => {
            let min = parse_opt(min.as_deref(), parse_amount)?;
            let max = parse_opt(max.as_deref(), parse_amount)?;
            if min.is_none() && max.is_none() {
                println!("Nothing to change. Use --min or --max.");
                return Ok(());
            }

            let target = service.find(&session, &goal)?;
            let updated = service.update_budget_goal(&session, target.id, min, max)?;
            println!(
                "Updated goal {}: {} to {}",
                updated.id,
                updated.min_amount.format_with_symbol(currency),
                updated.max_amount.format_with_symbol(currency)
            );
        }

        GoalCommands::Delete { goal } => {
            let target = service.find(&session, &goal)?;
            let deleted = service.delete_budget_goal(&session, target.id)?;
            println!("Deleted goal: {}", deleted.id);
        }
    }

    Ok(())
}
