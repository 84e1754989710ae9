use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetiq::cli::{
    handle_category_command, handle_expense_command, handle_goal_command, handle_report_command,
    handle_user_command,
};
use budgetiq::config::{paths::BudgetPaths, settings::Settings};
use budgetiq::services::PeriodService;
use budgetiq::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetiq",
    version,
    about = "Personal expense tracker with category budgets",
    long_about = "BudgetIQ records your expenses by category, shows where the money \
                  went over a week, month, year or custom range, and tracks spending \
                  against minimum and maximum goals per category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Register, log in and log out
    #[command(subcommand)]
    User(budgetiq::cli::UserCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(budgetiq::cli::CategoryCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(budgetiq::cli::ExpenseCommands),

    /// Budget goal commands
    #[command(subcommand)]
    Goal(budgetiq::cli::GoalCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(budgetiq::cli::ReportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing BudgetIQ at: {}", paths.base_dir().display());
            budgetiq::storage::init::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'budgetiq user register <username>' to create your account.");
        }
        Some(Commands::Config) => {
            let periods = PeriodService::new(&settings);
            println!("BudgetIQ Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default period:  {}", periods.describe(settings.default_period));
            println!("  Goal period:     {}", periods.describe(settings.goal_period));
        }
        Some(Commands::User(cmd)) => handle_user_command(&storage, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("BudgetIQ - personal expense tracker");
            println!();
            println!("Run 'budgetiq --help' for usage information.");
        }
    }

    Ok(())
}
