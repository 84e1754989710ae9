//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::BudgetResult;
use crate::services::CategoryService;
use crate::storage::Storage;

use super::{parse_color, parse_opt, require_session};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List your categories
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Display color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category (its expenses are kept)
    Delete {
        /// Category name or ID
        category: String,
    },

    /// Create the default categories if you have none
    Seed,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BudgetResult<()> {
    let session = require_session(storage)?;
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list(&session)?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create { name, color } => {
            let color = parse_opt(color.as_deref(), parse_color)?;
            let category = service.create(&session, &name, color)?;

            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
            println!("  Color: {}", category.color);
        }

        CategoryCommands::Show { category } => {
            let category = service.find(&session, &category)?;
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            let color = parse_opt(color.as_deref(), parse_color)?;
            if name.is_none() && color.is_none() {
                println!("Nothing to change. Use --name or --color.");
                return Ok(());
            }

            let target = service.find(&session, &category)?;
            let updated = service.update(&session, target.id, name.as_deref(), color)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let target = service.find(&session, &category)?;
            let deleted = service.delete(&session, target.id)?;
            println!("Deleted category: {}", deleted.name);
        }

        CategoryCommands::Seed => {
            let created = service.seed_defaults(session.user_id)?;
            if created.is_empty() {
                println!("You already have categories; nothing seeded.");
            } else {
                println!("Created {} default categories.", created.len());
            }
        }
    }

    Ok(())
}
