//! # Domain Types
//!
//! The records Opsdesk keeps. Each one is flat, carries its own
//! caller-chosen string `id`, and is never updated or deleted once stored.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  InventoryItem  │   │    Customer     │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  id             │   │  id             │                              │
//! │  │  name           │   │  name           │                              │
//! │  │  quantity       │   │  email          │                              │
//! │  │  min_stock      │   │  service_history│                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Ticket      │   │      Task       │   │  LowStockAlert  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  item_name      │       │
//! │  │  customer_id    │   │  description    │   │  quantity       │       │
//! │  │  issue          │   │  assigned_to    │   └─────────────────┘       │
//! │  │  status         │   │  status         │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Ticket::customer_id` and `Task::assigned_to` are plain strings; nothing
//! checks that they point at an existing row.

use serde::{Deserialize, Serialize};

// =============================================================================
// Inventory Item
// =============================================================================

/// A stocked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    /// Caller-chosen unique identifier.
    pub id: String,

    /// Display name, used in the low-stock alert.
    pub name: String,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Reorder threshold. Never negative.
    pub min_stock: i64,
}

impl InventoryItem {
    /// True when the stock on hand is strictly below the threshold.
    #[inline]
    pub fn is_below_min_stock(&self) -> bool {
        self.quantity < self.min_stock
    }

    /// Returns the alert to send for this item, if it is low on stock.
    ///
    /// Only consulted when the item is created; there is no later re-check.
    pub fn low_stock_alert(&self) -> Option<LowStockAlert> {
        self.is_below_min_stock().then(|| LowStockAlert {
            item_name: self.name.clone(),
            quantity: self.quantity,
        })
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Stored as given; no format check.
    pub email: String,
    /// Free-text notes about past service.
    pub service_history: String,
}

// =============================================================================
// Ticket
// =============================================================================

/// A support ticket raised for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ticket {
    pub id: String,
    /// Unchecked reference to a customer id.
    pub customer_id: String,
    pub issue: String,
    /// Free text ("open", "closed", ...).
    pub status: String,
}

// =============================================================================
// Task
// =============================================================================

/// A unit of work assigned to someone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Task {
    pub id: String,
    pub description: String,
    pub assigned_to: String,
    pub status: String,
}

// =============================================================================
// Low Stock Alert
// =============================================================================

/// The content of a low-stock notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub item_name: String,
    pub quantity: i64,
}

impl LowStockAlert {
    /// Creates an alert for the given item name and quantity.
    pub fn new(item_name: impl Into<String>, quantity: i64) -> Self {
        LowStockAlert {
            item_name: item_name.into(),
            quantity,
        }
    }

    /// Plain-text message body.
    pub fn body(&self) -> String {
        format!(
            "Low stock alert: {} has {} units remaining.",
            self.item_name, self.quantity
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, min_stock: i64) -> InventoryItem {
        InventoryItem {
            id: "DISH-01".to_string(),
            name: "Dish Kit".to_string(),
            quantity,
            min_stock,
        }
    }

    #[test]
    fn test_low_stock_is_strictly_below() {
        assert!(item(4, 5).is_below_min_stock());
        assert!(!item(5, 5).is_below_min_stock());
        assert!(!item(6, 5).is_below_min_stock());
        assert!(!item(0, 0).is_below_min_stock());
    }

    #[test]
    fn test_low_stock_alert_carries_name_and_quantity() {
        assert_eq!(
            item(2, 10).low_stock_alert(),
            Some(LowStockAlert::new("Dish Kit", 2))
        );
        assert_eq!(item(10, 10).low_stock_alert(), None);
    }

    #[test]
    fn test_alert_body() {
        let alert = LowStockAlert::new("Router", 1);
        assert_eq!(alert.body(), "Low stock alert: Router has 1 units remaining.");
    }

    #[test]
    fn test_ticket_json_shape() {
        let json = r#"{"id":"T1","customer_id":"C1","issue":"broken dish","status":"open"}"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.customer_id, "C1");
        assert_eq!(serde_json::to_string(&ticket).unwrap(), json);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"id":"C1","name":"Ada","email":"ada@example.com"}"#;
        assert!(serde_json::from_str::<Customer>(json).is_err());
    }
}
