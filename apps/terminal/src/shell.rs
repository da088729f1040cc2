//! # Interactive Shell
//!
//! A line-oriented stand-in for the app's screens. Each line is handled to
//! completion before the next is read.
//!
//! ## Commands
//! ```text
//! anywhere         help | back | home | quit
//! main menu        1..4 or contador | mapa | rentabilidad | pedidos
//!                  qr <path>  | qr clear
//! contador         <denomination> [count]   e.g. "100 3", "100" clears
//!                  reset
//! pedidos          add <apartment> | <description>
//!                  remove <id>  | clear
//! rentabilidad     buy <text>  | sell <text>
//! mapa             (view only)
//! ```
//!
//! An empty line redraws the current screen.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::commands::{bills, map, orders, profit, qr};
use crate::error::{AppError, AppResult};
use crate::navigation::{Navigator, Screen};
use crate::render;
use crate::state::AppState;

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print this text and read the next line.
    Continue(String),
    Quit,
}

/// The interactive shell.
pub struct Shell {
    state: AppState,
    nav: Navigator,
    map: Option<map::MapResponse>,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Shell {
            state,
            nav: Navigator::new(),
            map: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.nav.current()
    }

    /// Reads stdin until EOF or `quit`.
    pub async fn run(mut self) -> AppResult<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let intro = self.render_current().await?;
        stdout.write_all(intro.as_bytes()).await?;

        loop {
            let prompt = format!("pocket:{}> ", self.nav.current());
            stdout.write_all(prompt.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                stdout.write_all(b"\n").await?;
                break;
            };

            match self.handle_line(&line).await {
                Ok(Flow::Continue(text)) => stdout.write_all(text.as_bytes()).await?,
                Ok(Flow::Quit) => break,
                Err(e) => {
                    debug!(error = %e, "Shell command failed");
                    stdout.write_all(format!("error: {}\n", e).as_bytes()).await?;
                }
            }
        }

        stdout.flush().await?;
        Ok(())
    }

    /// Handles one input line.
    pub async fn handle_line(&mut self, line: &str) -> AppResult<Flow> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => return self.redraw().await,
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" | "?" => return Ok(Flow::Continue(self.help())),
            "back" => {
                self.nav.pop_back();
                return self.redraw().await;
            }
            "home" | "menu" => {
                self.nav.home();
                return self.redraw().await;
            }
            _ => {}
        }

        match self.nav.current() {
            Screen::MainMenu => self.main_menu(word, rest).await,
            Screen::BillCounter => self.bill_counter(word, rest).await,
            Screen::Orders => self.orders(word, rest).await,
            Screen::Profitability => self.profitability(word, rest).await,
            Screen::Map => Err(AppError::validation(
                "the map is view only; use back or home",
            )),
        }
    }

    async fn redraw(&mut self) -> AppResult<Flow> {
        Ok(Flow::Continue(self.render_current().await?))
    }

    /// Text of the screen on top of the stack.
    pub async fn render_current(&mut self) -> AppResult<String> {
        let s = &self.state;
        Ok(match self.nav.current() {
            Screen::MainMenu => render::main_menu(&qr::qr_status(&s.db).await),
            Screen::BillCounter => render::bills(&bills::get_bills(&s.bills, &s.config).await),
            Screen::Orders => render::orders(&orders::list_orders(&s.orders).await),
            Screen::Profitability => render::profit(&profit::get_profit(&s.prices).await),
            Screen::Map => {
                if self.map.is_none() {
                    self.map = Some(map::show_map(&s.config, None).await?);
                }
                match &self.map {
                    Some(response) => render::map(response),
                    None => String::new(),
                }
            }
        })
    }

    async fn main_menu(&mut self, word: &str, rest: &str) -> AppResult<Flow> {
        if word.eq_ignore_ascii_case("qr") {
            let s = &self.state;
            let status = match rest {
                "" => qr::qr_status(&s.db).await,
                "clear" => {
                    qr::clear_qr(&s.db).await?;
                    qr::qr_status(&s.db).await
                }
                path => qr::set_qr(&s.db, Path::new(path)).await?,
            };
            return Ok(Flow::Continue(render::main_menu(&status)));
        }

        let screen = Screen::from_route(word)
            .ok_or_else(|| AppError::validation(format!("unknown screen '{}'", word)))?;
        self.nav.navigate(screen);
        self.redraw().await
    }

    async fn bill_counter(&mut self, word: &str, rest: &str) -> AppResult<Flow> {
        let s = &self.state;
        let summary = if word.eq_ignore_ascii_case("reset") {
            bills::reset_bills(&s.db, &s.bills, &s.config).await?
        } else {
            bills::set_bill_count(&s.db, &s.bills, &s.config, word, rest).await?
        };
        Ok(Flow::Continue(render::bills(&summary)))
    }

    async fn orders(&mut self, word: &str, rest: &str) -> AppResult<Flow> {
        let s = &self.state;
        match word.to_ascii_lowercase().as_str() {
            "add" => {
                let (apartment, description) = rest.split_once('|').unwrap_or((rest, ""));
                if orders::add_order(&s.db, &s.orders, apartment.trim(), description.trim())
                    .await?
                    .is_none()
                {
                    debug!("Blank order ignored");
                }
            }
            "remove" | "rm" => {
                let id = rest
                    .parse::<u64>()
                    .map_err(|_| AppError::validation(format!("'{}' is not an order id", rest)))?;
                orders::remove_order(&s.db, &s.orders, id).await?;
            }
            "clear" => {
                orders::clear_orders(&s.db, &s.orders).await?;
            }
            other => {
                return Err(AppError::validation(format!(
                    "unknown orders command '{}'",
                    other
                )))
            }
        }
        self.redraw().await
    }

    async fn profitability(&mut self, word: &str, rest: &str) -> AppResult<Flow> {
        let s = &self.state;
        let response = match word.to_ascii_lowercase().as_str() {
            "buy" | "compra" => profit::set_prices(&s.db, &s.prices, Some(rest), None).await?,
            "sell" | "venta" => profit::set_prices(&s.db, &s.prices, None, Some(rest)).await?,
            other => {
                warn!(command = %other, "Unknown profitability command");
                return Err(AppError::validation(format!(
                    "unknown profitability command '{}'",
                    other
                )));
            }
        };
        Ok(Flow::Continue(render::profit(&response)))
    }

    fn help(&self) -> String {
        let specific = match self.nav.current() {
            Screen::MainMenu => "1..4 or a route to open a screen; qr <path> | qr clear",
            Screen::BillCounter => "<denomination> [count] to set a count; reset",
            Screen::Orders => "add <apartment> | <description>; remove <id>; clear",
            Screen::Profitability => "buy <price>; sell <price>",
            Screen::Map => "view only",
        };
        format!("{}\nback, home, help, quit\n", specific)
    }
}
