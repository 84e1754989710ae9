//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::reports::SpendingReport;
use crate::services::PeriodService;
use crate::storage::Storage;

use super::{parse_date, parse_opt, require_session};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category for a period
    Spending {
        /// week, month, year, or START..END
        #[arg(short, long)]
        period: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Spending {
            period,
            start,
            end,
            output,
            top,
        } => {
            let session = require_session(storage)?;
            let periods = PeriodService::new(settings);
            let selector = periods.select(
                period.as_deref(),
                parse_opt(start.as_deref(), parse_date)?,
                parse_opt(end.as_deref(), parse_date)?,
            )?;
            let report = SpendingReport::generate(storage, &session, periods.resolve(selector))?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    BudgetError::Io(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("Spending report exported to: {}", path.display());
            } else if let Some(n) = top {
                println!(
                    "Top {} Spending Categories: {} to {}\n",
                    n,
                    report.range.start(),
                    report.range.end()
                );
                println!("{:<30} {:>12} {:>6}", "Category", "Amount", "%");
                println!("{}", "-".repeat(50));

                for total in report.top_categories(n) {
                    println!(
                        "{:<30} {:>12} {:>5}%",
                        total.category_name,
                        total.total.format_with_symbol(&settings.currency_symbol),
                        total.percentage
                    );
                }
            } else {
                print!("{}", report.format_terminal(&settings.currency_symbol));
            }
        }
    }

    Ok(())
}
