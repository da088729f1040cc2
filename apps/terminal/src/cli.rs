//! # Command Line
//!
//! `pocket` with no subcommand opens the interactive shell.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pocket", version)]
#[command(about = "Bill counter, order list, profitability calculator and campus map")]
pub struct Cli {
    /// Print command results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding pocket.db and qr_image.png.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (TOML). Defaults to pocket.toml in the platform config dir.
    #[arg(long, global = true, env = "POCKET_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive shell (default).
    Shell,
    /// Bill counter.
    Bills(Bills),
    /// Order list.
    Orders(Orders),
    /// Profitability calculator.
    Profit(Profit),
    /// Campus map overlays.
    Map(MapArgs),
    /// QR image shown on the main menu.
    Qr(Qr),
}

#[derive(Args, Debug, Clone)]
pub struct Bills {
    #[command(subcommand)]
    pub command: BillsCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BillsCommand {
    /// Set the count for one denomination. Invalid counts store 0.
    Set {
        denomination: String,
        #[arg(allow_hyphen_values = true, default_value = "")]
        count: String,
    },
    /// Clear every count.
    Reset,
    /// Show counts and total.
    Show,
}

#[derive(Args, Debug, Clone)]
pub struct Orders {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum OrdersCommand {
    /// Add an order. Blank fields are ignored.
    Add {
        apartment: String,
        description: String,
    },
    /// Remove an order by id.
    Remove { id: u64 },
    /// List orders.
    List,
    /// Remove every order.
    Clear,
}

#[derive(Args, Debug, Clone)]
pub struct Profit {
    #[command(subcommand)]
    pub command: ProfitCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfitCommand {
    /// Set the purchase and/or sale price (kept as typed).
    Set {
        #[arg(long, allow_hyphen_values = true)]
        purchase: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        sale: Option<String>,
    },
    /// Show the prices and the profit per 1000.
    Show,
}

#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// GeoJSON file to show instead of the configured one.
    #[arg(long, value_name = "PATH")]
    pub geojson: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct Qr {
    #[command(subcommand)]
    pub command: QrCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QrCommand {
    /// Copy a PNG into the data directory.
    Set { path: PathBuf },
    /// Show whether an image is loaded.
    Show,
    /// Forget the image.
    Clear,
}
