use super::product::LineItem;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CartError {
    #[error("Product prices must be non-negative (got {price})")]
    InvalidPrice { price: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    Empty,
    Populated,
}

/// A distinct product in the cart together with how many units of it
/// were bought.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedLine<'a> {
    pub item: &'a LineItem,
    pub quantity: usize,
}

impl GroupedLine<'_> {
    pub fn subtotal(&self) -> f64 {
        self.item.price * self.quantity as f64
    }
}

/// The shopping cart: one `LineItem` per purchased unit, in insertion
/// order, plus the running total of their prices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    total: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.total = 0.0;
    }

    /// Appends one unit. A negative (or non-finite) price is rejected
    /// before anything is touched.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), CartError> {
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(CartError::InvalidPrice { price: item.price });
        }

        self.total += item.price;
        self.items.push(item);
        Ok(())
    }

    /// Removes the first unit matching `item` by `(name, price)`.
    /// Returns `false` and leaves the cart untouched when nothing matches.
    pub fn remove_item(&mut self, item: &LineItem) -> bool {
        let Some(index) = self.items.iter().position(|it| it.same_product(item)) else {
            return false;
        };

        self.items.remove(index);
        // summed in insertion order, the same way `add_item` accumulates
        self.total = self.items.iter().fold(0.0, |sum, it| sum + it.price);
        true
    }

    /// Distinct products with their quantities, in first-occurrence
    /// order. Recomputed from the items on every call.
    pub fn grouped_view(&self) -> impl Iterator<Item = GroupedLine<'_>> + '_ {
        distinct_items(&self.items).map(move |item| GroupedLine {
            item,
            quantity: self.quantity_of(item),
        })
    }

    pub fn quantity_of(&self, item: &LineItem) -> usize {
        self.items.iter().filter(|it| it.same_product(item)).count()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> CartState {
        if self.items.is_empty() {
            CartState::Empty
        } else {
            CartState::Populated
        }
    }
}

/// First occurrence of every distinct `(name, price)` in `items`.
pub fn distinct_items(items: &[LineItem]) -> impl Iterator<Item = &LineItem> + '_ {
    items
        .iter()
        .enumerate()
        .filter(move |(index, item)| !items[..*index].iter().any(|seen| seen.same_product(item)))
        .map(|(_, item)| item)
}
