//! # Profitability Module
//!
//! Profit per 1000 pesos spent, from a purchase price and a sale price.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                    (sale - cost)                                        │
//! │   profit/1000  =  ─────────────  ×  1000        when cost > 0           │
//! │                        cost                                             │
//! │                                                                         │
//! │   profit/1000  =  0                             otherwise               │
//! │                                                                         │
//! │   Example: cost "100", sale "150"  →  500.00                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The inputs stay as raw text; the result is recomputed on every read.

use serde::{Deserialize, Serialize};

use crate::text::parse_price;
use crate::PROFIT_BASIS;

/// Profit per 1000 spent. Returns 0.0 when `cost` is not positive.
///
/// ## Example
/// ```rust
/// use pocket_core::profitability::profit_per_thousand;
///
/// assert_eq!(profit_per_thousand(100.0, 150.0), 500.0);
/// assert_eq!(profit_per_thousand(0.0, 150.0), 0.0);
/// ```
pub fn profit_per_thousand(cost: f64, sale: f64) -> f64 {
    if cost > 0.0 {
        ((sale - cost) / cost) * PROFIT_BASIS
    } else {
        0.0
    }
}

/// Renders a profit figure with two decimals.
pub fn format_profit(value: f64) -> String {
    format!("{:.2}", value)
}

/// The two text fields of the profitability screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInputs {
    pub purchase_price: String,
    pub sale_price: String,
}

impl PriceInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_purchase_price(&mut self, text: impl Into<String>) {
        self.purchase_price = text.into();
    }

    pub fn set_sale_price(&mut self, text: impl Into<String>) {
        self.sale_price = text.into();
    }

    /// Parses both fields (invalid → 0.0) and applies the formula.
    pub fn compute_profit(&self) -> f64 {
        profit_per_thousand(
            parse_price(&self.purchase_price),
            parse_price(&self.sale_price),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_is_500() {
        let mut inputs = PriceInputs::new();
        inputs.set_purchase_price("100");
        inputs.set_sale_price("150");

        assert_eq!(inputs.compute_profit(), 500.0);
        assert_eq!(format_profit(inputs.compute_profit()), "500.00");
    }

    #[test]
    fn test_zero_cost_is_exactly_zero() {
        for sale in ["", "0", "150", "-3", "1e9", "abc"] {
            let inputs = PriceInputs {
                purchase_price: "0".to_string(),
                sale_price: sale.to_string(),
            };
            assert_eq!(inputs.compute_profit(), 0.0);
        }
    }

    #[test]
    fn test_negative_or_invalid_cost_is_zero() {
        assert_eq!(profit_per_thousand(-10.0, 50.0), 0.0);

        let inputs = PriceInputs {
            purchase_price: "ten".to_string(),
            sale_price: "150".to_string(),
        };
        assert_eq!(inputs.compute_profit(), 0.0);
    }

    #[test]
    fn test_loss_is_negative() {
        assert_eq!(profit_per_thousand(200.0, 150.0), -250.0);
        assert_eq!(format_profit(profit_per_thousand(200.0, 150.0)), "-250.00");
    }

    #[test]
    fn test_invalid_sale_counts_as_zero() {
        let inputs = PriceInputs {
            purchase_price: "80".to_string(),
            sale_price: "".to_string(),
        };
        assert_eq!(inputs.compute_profit(), -1000.0);
    }

    #[test]
    fn test_format_rounds_to_two_decimals() {
        assert_eq!(format_profit(profit_per_thousand(3.0, 4.0)), "333.33");
        assert_eq!(format_profit(0.0), "0.00");
    }
}
