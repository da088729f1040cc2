//! # Orders Module
//!
//! The order list: apartment + description entries kept in insertion order.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Lifecycle                                  │
//! │                                                                         │
//! │  Form (apartment, description)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_order() ── either field blank? ──► rejected, list unchanged       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order { id: next_id, .. } appended at the end                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  remove_order(&order) ──► first structurally-equal entry removed       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! Ids come from a counter that only moves forward. The first order gets 0,
//! the next 1, and so on; removing an order never frees its id for reuse.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::text::is_blank;

// =============================================================================
// Order
// =============================================================================

/// A single order for an apartment.
///
/// Equality is structural over all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub apartment: String,
    pub description: String,
    pub id: u64,
}

impl Order {
    /// Creates an order record.
    pub fn new(apartment: impl Into<String>, description: impl Into<String>, id: u64) -> Self {
        Order {
            apartment: apartment.into(),
            description: description.into(),
            id,
        }
    }
}

// =============================================================================
// Order Book
// =============================================================================

/// The ordered collection of orders shown on the orders screen.
///
/// ## Invariants
/// - `orders` is in insertion order
/// - Every id in `orders` is `< next_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    orders: Vec<Order>,
    next_id: u64,
}

impl OrderBook {
    /// Creates an empty order book whose first id will be 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an order book from stored orders.
    ///
    /// `next_id` is raised past the largest stored id if needed, so a stale
    /// counter can never hand out an id that is still in the list.
    pub fn restore(orders: Vec<Order>, next_id: u64) -> Self {
        let floor = orders.iter().map(|o| o.id + 1).max().unwrap_or(0);
        OrderBook {
            orders,
            next_id: next_id.max(floor),
        }
    }

    /// Appends a new order.
    ///
    /// ## Behavior
    /// - Either field blank after trimming: `Err(Required)`, nothing changes
    /// - Otherwise: the fields are stored as typed, with the next id
    ///
    /// ## Example
    /// ```rust
    /// use pocket_core::orders::OrderBook;
    ///
    /// let mut book = OrderBook::new();
    /// let order = book.add_order("A1", "leak").unwrap();
    /// assert_eq!(order.id, 0);
    ///
    /// assert!(book.add_order("A2", "   ").is_err());
    /// assert_eq!(book.len(), 1);
    /// ```
    pub fn add_order(&mut self, apartment: &str, description: &str) -> Result<Order, ValidationError> {
        if is_blank(apartment) {
            return Err(ValidationError::required("apartment"));
        }
        if is_blank(description) {
            return Err(ValidationError::required("description"));
        }

        let order = Order::new(apartment, description, self.next_id);
        self.next_id += 1;
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Removes the first order equal to `order`.
    ///
    /// Returns the removed order, or `None` when nothing matched.
    pub fn remove_order(&mut self, order: &Order) -> Option<Order> {
        let index = self.orders.iter().position(|o| o == order)?;
        Some(self.orders.remove(index))
    }

    /// Removes the order with the given id.
    pub fn remove_by_id(&mut self, id: u64) -> CoreResult<Order> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or(CoreError::OrderNotFound(id))?;
        Ok(self.orders.remove(index))
    }

    /// Orders in insertion order.
    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    /// The id the next accepted order will get.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Removes every order. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut book = OrderBook::new();
        book.add_order("A1", "leak").unwrap();
        book.add_order("A2", "noise").unwrap();

        assert_eq!(book.len(), 2);
        let ids: Vec<u64> = book.list().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_remove_first_by_structural_match() {
        let mut book = OrderBook::new();
        book.add_order("A1", "leak").unwrap();
        book.add_order("A2", "noise").unwrap();

        let removed = book.remove_order(&Order::new("A1", "leak", 0));
        assert_eq!(removed, Some(Order::new("A1", "leak", 0)));
        assert_eq!(book.list(), &[Order::new("A2", "noise", 1)]);
    }

    #[test]
    fn test_blank_fields_leave_list_unchanged() {
        let mut book = OrderBook::new();
        book.add_order("A1", "leak").unwrap();
        let before = book.clone();

        for (apartment, description) in [("", "x"), ("x", ""), ("  ", "x"), ("x", "\t\n"), ("", "")] {
            assert!(book.add_order(apartment, description).is_err());
            assert_eq!(book, before);
        }
    }

    #[test]
    fn test_blank_rejection_names_the_field() {
        let mut book = OrderBook::new();
        assert_eq!(
            book.add_order(" ", "leak"),
            Err(ValidationError::required("apartment"))
        );
        assert_eq!(
            book.add_order("A1", ""),
            Err(ValidationError::required("description"))
        );
    }

    #[test]
    fn test_add_then_remove_restores_previous_contents() {
        let mut book = OrderBook::new();
        book.add_order("B3", "door").unwrap();
        let before = book.list().to_vec();

        let added = book.add_order("B4", "window").unwrap();
        assert!(book.remove_order(&added).is_some());

        assert_eq!(book.list(), before.as_slice());
        assert_eq!(book.len(), before.len());
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut book = OrderBook::new();
        book.add_order("A1", "leak").unwrap();
        let second = book.add_order("A2", "noise").unwrap();
        book.remove_order(&second);

        let third = book.add_order("A3", "paint").unwrap();
        assert_eq!(third.id, 2);
    }

    #[test]
    fn test_duplicates_are_allowed_and_first_match_is_removed() {
        let mut book = OrderBook::new();
        book.add_order("A1", "leak").unwrap();
        book.add_order("A1", "leak").unwrap();
        assert_eq!(book.len(), 2);

        // Structural match includes the id, so only the id-1 entry goes.
        book.remove_order(&Order::new("A1", "leak", 1));
        assert_eq!(book.list(), &[Order::new("A1", "leak", 0)]);
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut book = OrderBook::new();
        book.add_order("A1", "leak").unwrap();
        assert!(book.remove_order(&Order::new("A1", "leak", 9)).is_none());
        assert!(matches!(book.remove_by_id(9), Err(CoreError::OrderNotFound(9))));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_fields_are_stored_as_typed() {
        let mut book = OrderBook::new();
        let order = book.add_order(" A1 ", "leak ").unwrap();
        assert_eq!(order.apartment, " A1 ");
        assert_eq!(order.description, "leak ");
    }

    #[test]
    fn test_restore_raises_stale_counter() {
        let orders = vec![Order::new("A1", "leak", 4), Order::new("A2", "noise", 7)];
        let book = OrderBook::restore(orders.clone(), 2);
        assert_eq!(book.next_id(), 8);
        assert_eq!(book.list(), orders.as_slice());

        let book = OrderBook::restore(orders, 20);
        assert_eq!(book.next_id(), 20);
    }

    #[test]
    fn test_clear_keeps_counter() {
        let mut book = OrderBook::new();
        book.add_order("A1", "leak").unwrap();
        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.add_order("A2", "noise").unwrap().id, 1);
    }
}
