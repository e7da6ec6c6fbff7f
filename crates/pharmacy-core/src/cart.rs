//! In-memory shopping cart.
//!
//! Lines keep first-add order. The total is derived on every read.

use pharmacy_types::product::{CartItem, Product};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the quantity of an existing line, or append a new one.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => {
                item.quantity += 1;
                log::debug!("Cart: {} x{}", product.id, item.quantity);
            }
            None => {
                self.items.push(CartItem::new(product.clone()));
                log::debug!("Cart: added {}", product.id);
            }
        }
    }

    /// Drop the whole line for `product_id`. Unknown ids are ignored.
    pub fn remove(&mut self, product_id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != product_id);
        if self.items.len() != before {
            log::debug!("Cart: removed {}", product_id);
        }
    }

    pub fn total(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.id() == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// Total number of units across all lines (nav bar badge).
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
