//! Cart and line-item domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

use super::ProductId;

/// One product entry in the cart with its quantity.
///
/// The `title`, `price`, and `image` fields are catalog attributes carried
/// through unchanged from the product lookup that created the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product this line refers to. At most one line per product exists.
    pub id: ProductId,
    /// Product title from the catalog.
    pub title: String,
    /// Unit price from the catalog.
    pub price: Decimal,
    /// Product image URL from the catalog.
    pub image: String,
    /// Quantity in the cart, always >= 1.
    pub amount: i64,
}

impl LineItem {
    /// Total price of this line (`price * amount`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

impl From<Product> for LineItem {
    /// Build a fresh line for a product just added to the cart.
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }
}

/// Ordered collection of cart line items.
///
/// Insertion order is irrelevant to correctness but preserved for display.
/// Serializes transparently as a JSON array of line items so the persisted
/// blob round-trips exactly through store and load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<LineItem>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.0
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a line for this product exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.iter().any(|item| item.id == id)
    }

    /// Quantity of this product in the cart, if present.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> Option<i64> {
        self.0.iter().find(|item| item.id == id).map(|item| item.amount)
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_items(&self) -> i64 {
        self.0.iter().map(|item| item.amount).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.0.iter().map(LineItem::line_total).sum()
    }

    /// Append a new line. Callers must ensure no line with this id exists.
    pub(crate) fn push(&mut self, item: LineItem) {
        self.0.push(item);
    }

    /// Drop the line for this product, keeping the order of the rest.
    ///
    /// Returns `false` if no such line existed.
    pub(crate) fn remove(&mut self, id: ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|item| item.id != id);
        self.0.len() != before
    }

    /// Replace the amount of the matching line. Lines for other products
    /// pass through unchanged; an absent id leaves the cart as-is.
    pub(crate) fn set_amount(&mut self, id: ProductId, amount: i64) {
        for item in &mut self.0 {
            if item.id == id {
                item.amount = amount;
            }
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
