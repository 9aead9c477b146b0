use proptest::collection::vec;
use proptest::prelude::*;

use storefront_cli::models::{Cart, CartError, LineItem};

const NAMES: [&str; 4] = ["Hat", "Scarf", "Gloves", "Socks"];

#[derive(Clone, Debug)]
enum CartOp {
    Add(LineItem),
    Remove(LineItem),
    Reset,
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (prop::sample::select(NAMES.to_vec()), 0u32..500)
        .prop_map(|(name, price)| LineItem::new(name, f64::from(price)))
}

// Prices in whole cents, e.g. 49.50 or 0.10.
fn fractional_line_item() -> impl Strategy<Value = LineItem> {
    (prop::sample::select(NAMES.to_vec()), 0u32..50_000)
        .prop_map(|(name, cents)| LineItem::new(name, f64::from(cents) / 100.0))
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    let item = prop_oneof![line_item(), fractional_line_item()];
    prop_oneof![
        4 => item.clone().prop_map(CartOp::Add),
        3 => item.prop_map(CartOp::Remove),
        1 => Just(CartOp::Reset),
    ]
}

// Same order and starting point as the cart's own accumulation.
fn expected_total(cart: &Cart) -> f64 {
    cart.items().iter().fold(0.0, |sum, item| sum + item.price)
}

proptest! {
    #[test]
    fn total_tracks_added_minus_removed(items in vec(line_item(), 0..30), removals in vec(line_item(), 0..30)) {
        let mut cart = Cart::new();
        let mut expected = 0.0;

        for item in items {
            expected += item.price;
            cart.add_item(item).unwrap();
        }
        for item in removals {
            if cart.remove_item(&item) {
                expected -= item.price;
            }
        }

        prop_assert_eq!(cart.total(), expected);
        prop_assert_eq!(cart.total(), expected_total(&cart));
    }

    #[test]
    fn fractional_total_matches_item_sum_after_removals(
        items in vec(fractional_line_item(), 0..30),
        removals in vec(fractional_line_item(), 0..30),
    ) {
        let mut cart = Cart::new();
        for item in &items {
            cart.add_item(item.clone()).unwrap();
        }
        // removing existing units too, not only random misses
        for item in removals.iter().chain(items.iter().step_by(2)) {
            cart.remove_item(item);
            prop_assert_eq!(cart.total(), expected_total(&cart));
        }

        let remaining: u64 = cart.items().iter().map(|item| (item.price * 100.0).round() as u64).sum();
        prop_assert!((cart.total() * 100.0 - remaining as f64).abs() < 1e-6);
        if cart.is_empty() {
            prop_assert_eq!(cart.total(), 0.0);
        }
    }

    #[test]
    fn invariants_hold_after_any_sequence(ops in vec(cart_op(), 0..60)) {
        let mut cart = Cart::new();

        for op in ops {
            match op {
                CartOp::Add(item) => cart.add_item(item).unwrap(),
                CartOp::Remove(item) => {
                    let before = cart.clone();
                    if !cart.remove_item(&item) {
                        prop_assert_eq!(&cart, &before);
                    } else {
                        prop_assert_eq!(cart.len() + 1, before.len());
                    }
                }
                CartOp::Reset => {
                    cart.reset();
                    prop_assert!(cart.is_empty());
                    prop_assert_eq!(cart.total(), 0.0);
                }
            }

            prop_assert_eq!(cart.total(), expected_total(&cart));

            let grouped_units: usize = cart.grouped_view().map(|line| line.quantity).sum();
            prop_assert_eq!(grouped_units, cart.len());
        }
    }

    #[test]
    fn negative_prices_never_change_the_cart(
        items in vec(line_item(), 0..10),
        name in prop::sample::select(NAMES.to_vec()),
        price in -1000.0f64..-0.001,
    ) {
        let mut cart = Cart::new();
        for item in items {
            cart.add_item(item).unwrap();
        }
        let before = cart.clone();

        let result = cart.add_item(LineItem::new(name, price));
        prop_assert_eq!(result, Err(CartError::InvalidPrice { price }));
        prop_assert_eq!(&cart, &before);
    }

    #[test]
    fn grouped_view_is_distinct_in_first_occurrence_order(items in vec(line_item(), 0..30)) {
        let mut cart = Cart::new();
        for item in &items {
            cart.add_item(item.clone()).unwrap();
        }

        let mut first_seen: Vec<&LineItem> = Vec::new();
        for item in &items {
            if !first_seen.iter().any(|seen| seen.same_product(item)) {
                first_seen.push(item);
            }
        }

        let grouped: Vec<_> = cart.grouped_view().collect();
        prop_assert_eq!(grouped.len(), first_seen.len());
        for (line, expected) in grouped.iter().zip(first_seen) {
            prop_assert!(line.item.same_product(expected));
            let count = items.iter().filter(|item| item.same_product(expected)).count();
            prop_assert_eq!(line.quantity, count);
        }
    }
}
