//! # Price State
//!
//! The two text fields of the profitability screen, kept as typed.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use pocket_core::PriceInputs;

#[derive(Debug, Clone, Default)]
pub struct PriceState {
    inputs: Arc<Mutex<PriceInputs>>,
}

impl PriceState {
    pub fn new(inputs: PriceInputs) -> Self {
        PriceState {
            inputs: Arc::new(Mutex::new(inputs)),
        }
    }

    pub async fn with_inputs<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PriceInputs) -> R,
    {
        let inputs = self.inputs.lock().await;
        f(&inputs)
    }

    pub async fn lock(&self) -> MutexGuard<'_, PriceInputs> {
        self.inputs.lock().await
    }
}
