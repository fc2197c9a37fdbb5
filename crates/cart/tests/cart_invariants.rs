//! Property tests over arbitrary sequences of cart mutations.

use proptest::prelude::*;
use rusty_money::iso;
use storefront_cart::{CartStore, LineKey, MemoryStorage, NewCartLine};
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Increase(usize),
    Decrease(usize),
    Remove(usize),
}

const SIZES: [Option<&str>; 3] = [None, Some("M"), Some("L")];

fn catalog() -> Vec<NewCartLine> {
    let products = [Uuid::from_u128(1), Uuid::from_u128(2)];

    products
        .iter()
        .enumerate()
        .flat_map(|(index, product)| {
            SIZES.iter().map(move |size| NewCartLine {
                product_uuid: *product,
                brand: "The North Face".to_string(),
                name: format!("Jacket {index}"),
                image: None,
                price: 25_00 + u64::try_from(index).unwrap_or(0) * 100,
                size: size.map(str::to_string),
                color: None,
            })
        })
        .collect()
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6_usize).prop_map(Op::Add),
        (0..6_usize).prop_map(Op::Increase),
        (0..6_usize).prop_map(Op::Decrease),
        (0..6_usize).prop_map(Op::Remove),
    ]
}

fn apply(cart: &mut CartStore<MemoryStorage>, items: &[NewCartLine], op: &Op) {
    let key_of = |index: &usize| items.get(*index).map(NewCartLine::key);

    match op {
        Op::Add(index) => {
            if let Some(item) = items.get(*index) {
                cart.add_to_cart(item.clone());
            }
        }
        Op::Increase(index) => {
            if let Some(key) = key_of(index) {
                cart.increase_quantity(&key);
            }
        }
        Op::Decrease(index) => {
            if let Some(key) = key_of(index) {
                cart.decrease_quantity(&key);
            }
        }
        Op::Remove(index) => {
            if let Some(key) = key_of(index) {
                cart.remove_line(&key);
            }
        }
    }
}

proptest! {
    #[test]
    fn totals_match_lines_and_quantities_stay_positive(ops in prop::collection::vec(op(), 0..64)) {
        let items = catalog();
        let mut cart = CartStore::hydrate(MemoryStorage::new(), iso::USD);

        for op in &ops {
            apply(&mut cart, &items, op);

            let line_sum: u64 = cart.lines().iter().map(|line| u64::from(line.quantity)).sum();
            let subtotal: u64 = cart.lines().iter().map(|line| line.price * u64::from(line.quantity)).sum();

            prop_assert_eq!(cart.total_quantity(), line_sum);
            prop_assert_eq!(cart.subtotal(), subtotal);
            prop_assert!(cart.lines().iter().all(|line| line.quantity >= 1));
        }
    }

    #[test]
    fn keys_are_never_duplicated(ops in prop::collection::vec(op(), 0..64)) {
        let items = catalog();
        let mut cart = CartStore::hydrate(MemoryStorage::new(), iso::USD);

        for op in &ops {
            apply(&mut cart, &items, op);
        }

        let keys: Vec<LineKey> = cart.lines().iter().map(storefront_cart::CartLine::key).collect();

        for (index, key) in keys.iter().enumerate() {
            prop_assert!(!keys.iter().skip(index + 1).any(|other| other == key));
        }
    }

    #[test]
    fn persisted_state_rehydrates_equal(ops in prop::collection::vec(op(), 0..32)) {
        let items = catalog();
        let storage = MemoryStorage::new();
        let mut cart = CartStore::hydrate(storage.clone(), iso::USD);

        for op in &ops {
            apply(&mut cart, &items, op);
        }

        let reloaded = CartStore::hydrate(storage, iso::USD);

        prop_assert_eq!(reloaded.lines(), cart.lines());
    }
}
