//! Session CLI commands
//!
//! Sign-up, sign-in, sign-out and the current principal.

use clap::Subcommand;

use crate::auth::{Credentials, FederatedProvider};
use crate::display::format_principal;
use crate::error::{CashlyError, CashlyResult};
use crate::services::SessionService;

/// Environment variable consulted before prompting for a password
pub const PASSWORD_ENV: &str = "CASHLY_PASSWORD";

/// Session subcommands
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Create an account and sign in
    Signup {
        /// Email address
        email: String,
    },
    /// Sign in with email and password, or a federated provider
    Login {
        /// Email address
        #[arg(required_unless_present = "google")]
        email: Option<String>,
        /// Sign in with Google instead of a password
        #[arg(long, conflicts_with = "email")]
        google: bool,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

/// Handle a session command
pub async fn handle_session_command(
    session: &SessionService,
    cmd: SessionCommands,
) -> CashlyResult<()> {
    match cmd {
        SessionCommands::Signup { email } => {
            let password = read_password("Choose a password: ")?;
            let principal = session.sign_up(&Credentials::new(email, password)).await?;
            println!("Account created. Welcome, {}!", principal.label());
        }

        SessionCommands::Login { email, google } => {
            let principal = if google {
                session.sign_in_federated(FederatedProvider::Google).await?
            } else {
                let email = email.ok_or_else(|| {
                    CashlyError::Validation("An email address is required".into())
                })?;
                let password = read_password("Password: ")?;
                session.sign_in(&Credentials::new(email, password)).await?
            };
            println!("Signed in as {}", principal.label());
        }

        SessionCommands::Logout => {
            if session.current_principal().is_none() {
                println!("Not signed in.");
            } else {
                session.sign_out().await?;
                println!("Signed out.");
            }
        }

        SessionCommands::Whoami => {
            print!("{}", format_principal(session.current_principal().as_ref()));
        }
    }

    Ok(())
}

/// Read a password from the environment, else prompt without echo
fn read_password(prompt: &str) -> CashlyResult<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    rpassword::prompt_password(prompt)
        .map_err(|e| CashlyError::Io(format!("Failed to read password: {}", e)))
}
