//! The shopping cart value and its storage encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a stored cart is refused when decoding.
#[derive(Debug, Error)]
pub enum CartCodecError {
    #[error("cart data is not a JSON array of strings: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("cart contains an empty item identifier")]
    EmptyItem,

    #[error("cart contains item `{0}` more than once")]
    DuplicateItem(String),
}

/// An ordered, duplicate-free list of store item identifiers.
///
/// The same representation is used inside the session and in the
/// `temp_carts.cart_data` column, where it is written as a plain JSON array
/// (`["3","7"]`). Decoding goes through [`TryFrom<Vec<String>>`], so a row
/// that violates the cart invariants is rejected instead of silently
/// repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Cart {
    items: Vec<String>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` unless it is already present.
    ///
    /// Returns `true` when the cart changed. Blank identifiers are ignored.
    pub fn add(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if item.is_empty() || self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Whether `item` is already in the cart.
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|existing| existing == item)
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Item identifiers in the order they were added.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Encodes the cart for the `cart_data` column.
    pub fn to_json(&self) -> Result<String, CartCodecError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Strictly decodes a `cart_data` value.
    pub fn from_json(data: &str) -> Result<Self, CartCodecError> {
        let items: Vec<String> = serde_json::from_str(data)?;
        Self::try_from(items)
    }
}

impl TryFrom<Vec<String>> for Cart {
    type Error = CartCodecError;

    fn try_from(items: Vec<String>) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();
        for item in items {
            if item.is_empty() {
                return Err(CartCodecError::EmptyItem);
            }
            if cart.contains(&item) {
                return Err(CartCodecError::DuplicateItem(item));
            }
            cart.items.push(item);
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<String> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<S: Into<String>> FromIterator<S> for Cart {
    /// Collects identifiers, dropping blanks and repeats.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for item in iter {
            cart.add(item);
        }
        cart
    }
}
