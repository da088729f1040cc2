//! # Bill Counter Module
//!
//! Counts banknotes per denomination and totals them.
//!
//! ## Screen Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Contador de billetes                               [reset] [home]     │
//! │                                                                         │
//! │  Total: 110 pesos        ◄── BillCount::total(), recomputed per read   │
//! │                                                                         │
//! │  Billetes de 5:     [ 2 ]   ◄── set_count(Five, "2")                   │
//! │  Billetes de 10:    [   ]   ◄── 0 renders as an empty field            │
//! │  Billetes de 20:    [   ]                                              │
//! │  Billetes de 50:    [   ]                                              │
//! │  Billetes de 100:   [ 1 ]                                              │
//! │  Billetes de 200:   [   ]                                              │
//! │  Billetes de 500:   [   ]                                              │
//! │  Billetes de 1000:  [   ]                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is never cached; it is a fold over the current counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::text::parse_count;

// =============================================================================
// Denomination
// =============================================================================

/// A banknote value. The set is closed: the screen lists exactly these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum Denomination {
    Five,
    Ten,
    Twenty,
    Fifty,
    OneHundred,
    TwoHundred,
    FiveHundred,
    OneThousand,
}

impl Denomination {
    /// Every denomination in ascending order (display order).
    pub const ALL: [Denomination; 8] = [
        Denomination::Five,
        Denomination::Ten,
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::OneHundred,
        Denomination::TwoHundred,
        Denomination::FiveHundred,
        Denomination::OneThousand,
    ];

    /// Face value in whole pesos.
    pub const fn value(&self) -> u32 {
        match self {
            Denomination::Five => 5,
            Denomination::Ten => 10,
            Denomination::Twenty => 20,
            Denomination::Fifty => 50,
            Denomination::OneHundred => 100,
            Denomination::TwoHundred => 200,
            Denomination::FiveHundred => 500,
            Denomination::OneThousand => 1000,
        }
    }

    /// Face value as Money.
    pub const fn money(&self) -> Money {
        Money::from_major(self.value() as i64)
    }

    /// Looks a denomination up by face value.
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.value() == value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TryFrom<u32> for Denomination {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Denomination::from_value(value).ok_or_else(|| ValidationError::NotAllowed {
            field: "denomination".to_string(),
            allowed: Denomination::ALL.iter().map(|d| d.to_string()).collect(),
        })
    }
}

impl From<Denomination> for u32 {
    fn from(d: Denomination) -> Self {
        d.value()
    }
}

impl FromStr for Denomination {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "denomination".to_string(),
                reason: format!("'{}' is not a number", s.trim()),
            })?;
        Denomination::try_from(value)
    }
}

// =============================================================================
// Bill Count
// =============================================================================

/// One row of the breakdown: how many notes of a value, and what they add up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub denomination: Denomination,
    pub count: u32,
    pub subtotal: Money,
}

/// Note counts keyed by denomination.
///
/// ## Invariants
/// - Counts are never negative (enforced by `u32`)
/// - A missing key means 0; a zero count is never stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillCount {
    counts: BTreeMap<Denomination, u32>,
}

impl BillCount {
    /// Creates an empty counter (every count 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a count from the raw text of the input field.
    ///
    /// Blank or invalid text stores 0, so this never fails.
    ///
    /// ## Example
    /// ```rust
    /// use pocket_core::bill_counter::{BillCount, Denomination};
    ///
    /// let mut bills = BillCount::new();
    /// bills.set_count(Denomination::Twenty, "3");
    /// assert_eq!(bills.count(Denomination::Twenty), 3);
    ///
    /// bills.set_count(Denomination::Twenty, "");
    /// assert_eq!(bills.count(Denomination::Twenty), 0);
    /// ```
    pub fn set_count(&mut self, denomination: Denomination, raw: &str) -> u32 {
        let count = parse_count(raw);
        self.set(denomination, count);
        count
    }

    /// Sets a count directly.
    pub fn set(&mut self, denomination: Denomination, count: u32) {
        if count == 0 {
            self.counts.remove(&denomination);
        } else {
            self.counts.insert(denomination, count);
        }
    }

    /// Returns the count for a denomination (0 if never set).
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    /// Text shown in the input field: empty for 0, the number otherwise.
    pub fn display_count(&self, denomination: Denomination) -> String {
        match self.count(denomination) {
            0 => String::new(),
            n => n.to_string(),
        }
    }

    /// Clears every count.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// Sum of count × face value over every denomination.
    pub fn total(&self) -> Money {
        Denomination::ALL
            .iter()
            .map(|d| d.money() * self.count(*d))
            .sum()
    }

    /// Total number of notes counted.
    pub fn total_notes(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Per-denomination breakdown in display order, zeros included.
    pub fn lines(&self) -> Vec<BillLine> {
        Denomination::ALL
            .iter()
            .map(|&denomination| {
                let count = self.count(denomination);
                BillLine {
                    denomination,
                    count,
                    subtotal: denomination.money() * count,
                }
            })
            .collect()
    }

    /// Checks if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(Denomination, u32)> for BillCount {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        let mut bills = BillCount::new();
        for (denomination, count) in iter {
            bills.set(denomination, count);
        }
        bills
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
