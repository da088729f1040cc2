//! # Pocket Business
//!
//! Entry point for the `pocket` binary. All startup logic lives in
//! `pocket_terminal_lib::run`.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    pocket_terminal_lib::run().await
}
