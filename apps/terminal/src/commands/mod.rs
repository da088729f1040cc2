//! # Commands Module
//!
//! Every operation the shell and the one-shot CLI can run.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── bills.rs    ◄─── Bill counter: set count, reset, show
//! ├── orders.rs   ◄─── Orders: add, remove, list, clear
//! ├── profit.rs   ◄─── Profitability: set prices, show
//! ├── map.rs      ◄─── Map: load GeoJSON, render overlays
//! └── qr.rs       ◄─── QR image: set, show, clear
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  `pocket bills set 100 3`            shell line "100 3" on contador     │
//! │             │                                   │                       │
//! │             └──────────────┬────────────────────┘                       │
//! │                            ▼                                            │
//! │  bills::set_bill_count(&db, &bills, &config, "100", "3")                │
//! │      ◄── takes only the state it needs                                  │
//! │                            │                                            │
//! │                            ▼                                            │
//! │  Result<BillSummary, AppError>   (Serialize: printed as text or JSON)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod bills;
pub mod map;
pub mod orders;
pub mod profit;
pub mod qr;
