//! User CLI commands
//!
//! Registration, login and logout. Passwords not given on the command line
//! are prompted for without echo.

use clap::Subcommand;

use crate::error::{BudgetError, BudgetResult};
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new user and log in
    Register {
        username: String,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log in as an existing user
    Login {
        username: String,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out the current user
    Logout,

    /// Show the logged-in user
    Whoami,
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> BudgetResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Register { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_new_password()?,
            };

            let (user, categories) = service.register(&username, &password)?;
            let session = service.login(&user.username, &password)?;

            println!("Registered user: {}", user.username);
            println!("  ID: {}", user.id);
            if !categories.is_empty() {
                let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
                println!("  Default categories: {}", names.join(", "));
            }
            println!("Logged in as {}", session.username);
        }

        UserCommands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };

            let session = service.login(&username, &password)?;
            println!("Logged in as {}", session.username);
        }

        UserCommands::Logout => match service.logout()? {
            Some(session) => println!("Logged out {}", session.username),
            None => println!("No user logged in."),
        },

        UserCommands::Whoami => match service.current_session()? {
            Some(session) => {
                println!("{}", session.username);
                println!(
                    "  Logged in since {}",
                    session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            None => return Err(BudgetError::NotLoggedIn),
        },
    }

    Ok(())
}

fn prompt_new_password() -> BudgetResult<String> {
    let first = prompt_password("Choose a password: ")?;
    let second = prompt_password("Confirm password: ")?;

    if first != second {
        return Err(BudgetError::Validation("Passwords do not match".into()));
    }

    Ok(first)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> BudgetResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| BudgetError::Io(format!("Failed to read password: {}", e)))
}
