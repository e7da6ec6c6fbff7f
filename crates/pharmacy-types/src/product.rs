use serde::{Deserialize, Serialize};

/// Currency label shown next to every price.
pub const CURRENCY: &str = "NPR";

/// Immutable reference data for a sellable item. Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub category: String,
    pub image: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: u32,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            image: image.into(),
        }
    }
}

/// One product plus its quantity in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    /// Always >= 1; a line that would reach zero is removed instead.
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product) -> Self {
        Self { product, quantity: 1 }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    pub fn line_total(&self) -> u64 {
        u64::from(self.product.price) * u64::from(self.quantity)
    }
}

/// Format a whole-rupee amount the way the storefront prints prices.
pub fn format_price(amount: u64) -> String {
    format!("{} {}", CURRENCY, amount)
}
