//! Birthday Bot CLI - main entry point
//!
//! Mode selection is interactive: 1 sends due birthday messages after a
//! confirmation, 2 sends coupons to hand-picked people. Any other choice
//! exits with code 1.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use birthday_bot::{commands, store, Config, Dispatcher, SlackClient, Translations};

#[derive(Parser)]
#[command(name = "birthday_bot")]
#[command(about = "Slack Birthday Coupon Bot", long_about = None)]
#[command(version)]
struct Cli {
    /// People spreadsheet (CSV)
    #[arg(long, env = "BIRTHDAY_FILE")]
    birthday_file: Option<PathBuf>,

    /// Coupon spreadsheet (CSV)
    #[arg(long, env = "COUPON_FILE")]
    coupon_file: Option<PathBuf>,

    /// Translation file (JSON)
    #[arg(long, env = "I18N_FILE")]
    i18n_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("birthday_bot=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::new();
    if let Some(path) = cli.birthday_file {
        config.birthday_file = path;
    }
    if let Some(path) = cli.coupon_file {
        config.coupon_file = path;
    }
    if let Some(path) = cli.i18n_file {
        config.i18n_file = path;
    }

    println!("[INFO] Using birthday file: {}", config.birthday_file.display());
    println!("[INFO] Using coupon file: {}", config.coupon_file.display());

    let translations = Translations::load(&config.i18n_file)?;
    let slack = SlackClient::from_config(&config)?;
    let people = store::load_people(&config.birthday_file)?;

    let mut dispatcher = Dispatcher::new(
        slack,
        translations,
        config.birthday_file.clone(),
        config.coupon_file.clone(),
    );

    println!(
        "\n        Menu:\n        1. Send birthday messages\n        2. Send coupons to specific person\n"
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let choice = commands::prompt_line(&mut input, "Enter your choice (1/2): ")?;

    let today = Local::now().date_naive();

    match choice.as_str() {
        "1" => {
            commands::auto::run(&mut dispatcher, &people, today, &mut input).await?;
            Ok(ExitCode::SUCCESS)
        }
        "2" => {
            commands::manual::run(&mut dispatcher, &people, today, &mut input).await?;
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            println!("Invalid option. Exiting.");
            Ok(ExitCode::FAILURE)
        }
    }
}
