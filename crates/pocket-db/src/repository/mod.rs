//! # Repository Module
//!
//! Database repository implementations for Pocket Business.
//!
//! ## One Repository per Screen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen              Repository              Table                      │
//! │  ─────────────────   ─────────────────────   ───────────────────        │
//! │  Bill counter   ──►  BillCountRepository ──► bill_counts               │
//! │  Orders         ──►  OrderRepository     ──► orders (+ settings)        │
//! │  Profitability  ──►  SettingsRepository  ──► settings                   │
//! │  Map            ──►  (nothing: the map is rebuilt from the asset)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository saves what the screen shows so the next run of `pocket`
//! opens where the last one stopped.

pub mod bills;
pub mod orders;
pub mod settings;
