//! # Pocket Terminal Library
//!
//! Host shell for Pocket Business: configures logging, restores state and
//! runs either one command or the interactive shell.
//!
//! ## Module Organization
//! ```text
//! pocket_terminal_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState, restore from disk
//! │   ├── config.rs   ◄─── AppConfig (defaults, TOML, env)
//! │   ├── db.rs       ◄─── Database + QR image store
//! │   ├── bills.rs    ◄─── Bill counter state
//! │   ├── orders.rs   ◄─── Order book state
//! │   └── prices.rs   ◄─── Profitability fields
//! ├── commands/       ◄─── One module per screen
//! ├── navigation.rs   ◄─── Screens and back stack
//! ├── render.rs       ◄─── Text views + TextSurface
//! ├── shell.rs        ◄─── Interactive loop
//! └── error.rs        ◄─── AppError for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse command line                                                  │
//! │  2. Initialize logging (stderr, RUST_LOG overrides)                     │
//! │  3. Load config: defaults → pocket.toml → POCKET_* → flags              │
//! │  4. Open <data dir>/pocket.db, run migrations                           │
//! │  5. Restore bill counts, orders, prices                                 │
//! │  6. Run the subcommand, or the shell when there is none                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod navigation;
pub mod render;
pub mod shell;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{BillsCommand, Cli, Command, OrdersCommand, ProfitCommand, QrCommand};
use commands::{bills, map, orders, profit, qr};
use error::AppResult;
use shell::Shell;
use state::{AppConfig, AppState};

/// Runs `pocket` and returns the process exit code.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Pocket Business");

    let json = cli.json;
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                match serde_json::to_string(&e) {
                    Ok(text) => eprintln!("{}", text),
                    Err(_) => eprintln!("error: {}", e),
                }
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - everything
/// - `RUST_LOG=pocket_terminal_lib=debug` - command tracing only
/// - Default: warnings, plus startup info from the pocket crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,pocket_terminal_lib=info,pocket_db=info,sqlx=warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves configuration with command line flags applied last.
pub fn resolve_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

async fn execute(cli: Cli) -> AppResult<()> {
    let config = resolve_config(&cli)?;
    let command = cli.command.unwrap_or(Command::Shell);
    debug!(?command, "Dispatching");

    // The map needs no saved state.
    if let Command::Map(args) = &command {
        let response = map::show_map(&config, args.geojson.as_deref()).await?;
        return emit(cli.json, &response, render::map);
    }

    let state = AppState::load(config).await?;
    let result = dispatch(&state, command, cli.json).await;
    state.db.inner().close().await;
    result
}

async fn dispatch(state: &AppState, command: Command, json: bool) -> AppResult<()> {
    let s = state;
    match command {
        Command::Shell => Shell::new(s.clone()).run().await,

        Command::Bills(args) => {
            let summary = match args.command {
                BillsCommand::Set {
                    denomination,
                    count,
                } => bills::set_bill_count(&s.db, &s.bills, &s.config, &denomination, &count).await?,
                BillsCommand::Reset => bills::reset_bills(&s.db, &s.bills, &s.config).await?,
                BillsCommand::Show => bills::get_bills(&s.bills, &s.config).await,
            };
            emit(json, &summary, render::bills)
        }

        Command::Orders(args) => {
            match args.command {
                OrdersCommand::Add {
                    apartment,
                    description,
                } => {
                    orders::add_order(&s.db, &s.orders, &apartment, &description).await?;
                }
                OrdersCommand::Remove { id } => {
                    orders::remove_order(&s.db, &s.orders, id).await?;
                }
                OrdersCommand::Clear => {
                    orders::clear_orders(&s.db, &s.orders).await?;
                }
                OrdersCommand::List => {}
            }
            let list = orders::list_orders(&s.orders).await;
            emit(json, &list, render::orders)
        }

        Command::Profit(args) => {
            let response = match args.command {
                ProfitCommand::Set { purchase, sale } => {
                    profit::set_prices(&s.db, &s.prices, purchase.as_deref(), sale.as_deref())
                        .await?
                }
                ProfitCommand::Show => profit::get_profit(&s.prices).await,
            };
            emit(json, &response, render::profit)
        }

        Command::Qr(args) => {
            let status = match args.command {
                QrCommand::Set { path } => qr::set_qr(&s.db, &path).await?,
                QrCommand::Show => qr::qr_status(&s.db).await,
                QrCommand::Clear => {
                    qr::clear_qr(&s.db).await?;
                    qr::qr_status(&s.db).await
                }
            };
            emit(json, &status, render::main_menu)
        }

        Command::Map(args) => {
            let response = map::show_map(&s.config, args.geojson.as_deref()).await?;
            emit(json, &response, render::map)
        }
    }
}

/// Prints a result as pretty JSON or as its text view.
fn emit<T, F>(json: bool, value: &T, text: F) -> AppResult<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_data_dir_flag_wins_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pocket.toml");
        std::fs::write(&path, "data_dir = \"/from-file\"\ncurrency_name = \"CUP\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "pocket",
            "--config",
            path.to_str().unwrap(),
            "--data-dir",
            "/from-flag",
            "bills",
            "show",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from-flag"));
        assert_eq!(config.currency_name, "CUP");
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };

        let first = AppState::load(config.clone()).await.unwrap();
        bills::set_bill_count(&first.db, &first.bills, &first.config, "50", "2")
            .await
            .unwrap();
        orders::add_order(&first.db, &first.orders, "B4", "keys").await.unwrap();
        profit::set_prices(&first.db, &first.prices, Some("80"), Some("100"))
            .await
            .unwrap();
        first.db.inner().close().await;

        let second = AppState::load(config).await.unwrap();
        let summary = bills::get_bills(&second.bills, &second.config).await;
        assert_eq!(summary.total_display, "100 pesos");
        assert_eq!(orders::list_orders(&second.orders).await.next_id, 1);
        assert_eq!(profit::get_profit(&second.prices).await.profit_display, "250.00");
    }

    #[tokio::test]
    async fn test_two_processes_share_a_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };

        let shell = AppState::load(config.clone()).await.unwrap();
        let one_shot = AppState::load(config).await.unwrap();

        orders::add_order(&one_shot.db, &one_shot.orders, "A1", "leak")
            .await
            .unwrap();
        let added = orders::add_order(&shell.db, &shell.orders, "A2", "noise")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(orders::list_orders(&shell.orders).await.count, 2);

        bills::set_bill_count(&one_shot.db, &one_shot.bills, &one_shot.config, "100", "1")
            .await
            .unwrap();
        let summary = bills::set_bill_count(&shell.db, &shell.bills, &shell.config, "5", "2")
            .await
            .unwrap();
        assert_eq!(summary.total_display, "110 pesos");

        profit::set_prices(&one_shot.db, &one_shot.prices, Some("100"), None)
            .await
            .unwrap();
        let response = profit::set_prices(&shell.db, &shell.prices, None, Some("150"))
            .await
            .unwrap();
        assert_eq!(response.purchase_price, "100");
        assert_eq!(response.profit_display, "500.00");

        one_shot.db.inner().close().await;
        shell.db.inner().close().await;
    }
}
