use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cashly::auth::{IdentityProvider, LocalIdentityProvider};
use cashly::cli::{
    handle_report_command, handle_session_command, handle_transaction_command, ReportCommands,
    SessionCommands, TransactionCommands,
};
use cashly::config::{CashlyPaths, Settings};
use cashly::services::{SessionService, TransactionService};
use cashly::store::{DocumentStore, JsonFileStore};

#[derive(Parser)]
#[command(
    name = "cashly",
    version,
    about = "Personal income and expense tracker",
    long_about = "Cashly records income and expenses and shows your balance, \
                  a running-balance trend and a category breakdown from the \
                  command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommands),

    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cashly=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CashlyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    paths.ensure_directories()?;

    // Collaborators are built here and handed to the services explicitly
    let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::new(paths.data_dir()));
    let identity: Arc<dyn IdentityProvider> = Arc::new(LocalIdentityProvider::open(&paths)?);

    let session = SessionService::new(identity.clone());
    let transactions = TransactionService::new(store, identity, &settings);

    match cli.command {
        Some(Commands::Session(cmd)) => {
            handle_session_command(&session, cmd).await?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&transactions, &settings, cmd).await?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&transactions, &session, &settings, cmd).await?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("Cashly Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Collection:      {}", settings.collection);
            println!("  Order field:     {}", settings.order_field);
            println!("  Default sort:    {}", settings.default_sort);
        }
        None => {
            println!("Cashly - personal income and expense tracker");
            println!();
            println!("Run 'cashly --help' for usage information.");
            println!("Run 'cashly signup <email>' to get started.");
        }
    }

    Ok(())
}
