//! # Navigation
//!
//! The five screens and the back stack between them.
//!
//! ```text
//!                    ┌──────────────┐
//!          ┌────────►│  main (menu) │◄──────── home / back ────────┐
//!          │         └──────┬───────┘                              │
//!          │     1 / contador   2 / mapa   3 / rentabilidad   4 / pedidos
//!          │                ▼                                      │
//!          │   BillCounter   Map   Profitability   Orders ─────────┘
//! ```
//!
//! The stack always starts with the main menu and `back` never removes it.

use std::fmt;

use serde::Serialize;

/// A screen of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    MainMenu,
    BillCounter,
    Map,
    Profitability,
    Orders,
}

impl Screen {
    /// The four screens reachable from the menu, in menu order.
    pub const MENU: [Screen; 4] = [
        Screen::BillCounter,
        Screen::Map,
        Screen::Profitability,
        Screen::Orders,
    ];

    /// Route id.
    pub const fn route(&self) -> &'static str {
        match self {
            Screen::MainMenu => "main",
            Screen::BillCounter => "contador",
            Screen::Map => "mapa",
            Screen::Profitability => "rentabilidad",
            Screen::Orders => "pedidos",
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            Screen::MainMenu => "Pocket Business",
            Screen::BillCounter => "Bill counter",
            Screen::Map => "UCI map",
            Screen::Profitability => "Profitability",
            Screen::Orders => "Order list",
        }
    }

    /// Resolves a route id or a menu number ("1".."4", "0" for the menu).
    pub fn from_route(id: &str) -> Option<Screen> {
        let id = id.trim();
        if let Ok(n) = id.parse::<usize>() {
            return match n {
                0 => Some(Screen::MainMenu),
                n => Screen::MENU.get(n - 1).copied(),
            };
        }

        [Screen::MainMenu]
            .into_iter()
            .chain(Screen::MENU)
            .find(|s| s.route().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

/// Back stack of visited screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts on the main menu.
    pub fn new() -> Self {
        Navigator {
            stack: vec![Screen::MainMenu],
        }
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::MainMenu)
    }

    /// Opens a screen. Opening the screen already shown does nothing and
    /// opening the main menu is the same as [`Navigator::home`].
    pub fn navigate(&mut self, screen: Screen) -> Screen {
        match screen {
            Screen::MainMenu => self.home(),
            s if s == self.current() => s,
            s => {
                self.stack.push(s);
                s
            }
        }
    }

    /// Goes back one screen, stopping at the main menu.
    pub fn pop_back(&mut self) -> Screen {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.current()
    }

    /// Drops everything above the main menu.
    pub fn home(&mut self) -> Screen {
        self.stack.truncate(1);
        self.current()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_route() {
        assert_eq!(Screen::from_route("contador"), Some(Screen::BillCounter));
        assert_eq!(Screen::from_route(" MAPA "), Some(Screen::Map));
        assert_eq!(Screen::from_route("4"), Some(Screen::Orders));
        assert_eq!(Screen::from_route("0"), Some(Screen::MainMenu));
        assert_eq!(Screen::from_route("5"), None);
        assert_eq!(Screen::from_route("tienda"), None);
    }

    #[test]
    fn test_routes_round_trip_through_from_route() {
        for screen in Screen::MENU {
            assert_eq!(Screen::from_route(screen.route()), Some(screen));
        }
    }

    #[test]
    fn test_back_never_leaves_main_menu() {
        let mut nav = Navigator::new();
        assert_eq!(nav.pop_back(), Screen::MainMenu);
        assert_eq!(nav.depth(), 1);

        nav.navigate(Screen::Orders);
        nav.navigate(Screen::Orders);
        assert_eq!(nav.depth(), 2);

        nav.navigate(Screen::Map);
        assert_eq!(nav.pop_back(), Screen::Orders);
        assert_eq!(nav.pop_back(), Screen::MainMenu);
        assert_eq!(nav.pop_back(), Screen::MainMenu);
    }

    #[test]
    fn test_home_clears_stack() {
        let mut nav = Navigator::new();
        nav.navigate(Screen::BillCounter);
        nav.navigate(Screen::Profitability);

        assert_eq!(nav.navigate(Screen::MainMenu), Screen::MainMenu);
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current(), Screen::MainMenu);
    }
}
