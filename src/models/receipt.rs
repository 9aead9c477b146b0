use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::Cart;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price: f64,
    pub quantity: usize,
    pub subtotal: f64,
}

/// Snapshot of a paid cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub lines: Vec<ReceiptLine>,
    pub total: f64,
    pub paid_at: DateTime<Utc>,
}

impl Receipt {
    pub fn from_cart(cart: &Cart) -> Self {
        let lines = cart
            .grouped_view()
            .map(|line| ReceiptLine {
                name: line.item.name.clone(),
                unit_price: line.item.price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            lines,
            total: cart.total(),
            paid_at: Utc::now(),
        }
    }

    pub fn unit_count(&self) -> usize {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
