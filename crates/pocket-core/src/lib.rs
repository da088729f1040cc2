//! # pocket-core: Pure Logic for Pocket Business
//!
//! This crate holds the logic behind every Pocket Business screen as plain
//! data types and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pocket Business Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal shell (`pocket`)                       │   │
//! │  │   Main menu ──► Bills │ Map │ Profit │ Orders ──► home          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pocket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌──────────┐ ┌───────────────┐ ┌────────────┐  │   │
//! │  │  │bill_counter│ │  orders  │ │ profitability │ │    geo     │  │   │
//! │  │  │ BillCount  │ │OrderBook │ │  PriceInputs  │ │  MapView   │  │   │
//! │  │  │Denomination│ │  Order   │ │  profit/1000  │ │  Overlay   │  │   │
//! │  │  └────────────┘ └──────────┘ └───────────────┘ └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pocket-db (Persistence Layer)                   │   │
//! │  │         SQLite screen state, QR image file, migrations          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`bill_counter`] - Banknote counts and their total
//! - [`orders`] - Ordered list of apartment orders
//! - [`profitability`] - Profit per 1000 spent
//! - [`geo`] - GeoJSON feature collection → drawable overlays
//! - [`money`] - Integer money type used for bill totals
//! - [`text`] - Permissive parsing of free-text form input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pocket_core::bill_counter::{BillCount, Denomination};
//!
//! let mut bills = BillCount::new();
//! bills.set_count(Denomination::Five, "2");
//! bills.set_count(Denomination::OneHundred, "1");
//! bills.set_count(Denomination::Fifty, "abc"); // coerced to 0
//!
//! assert_eq!(bills.total().major(), 110);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill_counter;
pub mod error;
pub mod geo;
pub mod money;
pub mod orders;
pub mod profitability;
pub mod text;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill_counter::{BillCount, BillLine, Denomination};
pub use error::{CoreError, GeoError, ValidationError};
pub use geo::{FeatureCollection, GeoPoint, MapView, Overlay, OverlaySurface};
pub use money::Money;
pub use orders::{Order, OrderBook};
pub use profitability::PriceInputs;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Where the map view is centred when it opens (UCI campus, Havana).
pub const MAP_CENTER: geo::GeoPoint = geo::GeoPoint {
    lat: 22.990278,
    lon: -82.465833,
};

/// Zoom level the map view opens at.
pub const MAP_ZOOM: f64 = 17.0;

/// Cost basis the profit figure is normalised to.
pub const PROFIT_BASIS: f64 = 1000.0;
