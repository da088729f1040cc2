//! # Profitability Commands
//!
//! Both fields are stored as typed. The profit is worked out again on every
//! read, so a field holding "abc" simply counts as 0.

use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;
use crate::state::{DbState, PriceState};
use pocket_core::profitability::format_profit;
use pocket_core::PriceInputs;

/// Everything the profitability screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitResponse {
    pub purchase_price: String,
    pub sale_price: String,
    /// Profit per 1000 spent
    pub profit: f64,
    pub profit_display: String,
}

impl ProfitResponse {
    pub fn from_inputs(inputs: &PriceInputs) -> Self {
        let profit = inputs.compute_profit();
        ProfitResponse {
            purchase_price: inputs.purchase_price.clone(),
            sale_price: inputs.sale_price.clone(),
            profit,
            profit_display: format_profit(profit),
        }
    }
}

pub async fn get_profit(prices: &PriceState) -> ProfitResponse {
    debug!("get_profit command");
    prices.with_inputs(ProfitResponse::from_inputs).await
}

/// Updates either field (or both) and saves them.
///
/// `None` leaves the stored field as it was, even when another `pocket`
/// process changed it since this one started.
pub async fn set_prices(
    db: &DbState,
    prices: &PriceState,
    purchase_price: Option<&str>,
    sale_price: Option<&str>,
) -> AppResult<ProfitResponse> {
    debug!(?purchase_price, ?sale_price, "set_prices command");

    let mut guard = prices.lock().await;
    *guard = db
        .inner()
        .settings()
        .update_price_inputs(purchase_price, sale_price)
        .await?;

    Ok(ProfitResponse::from_inputs(&guard))
}
