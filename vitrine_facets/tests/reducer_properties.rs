// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties of the filter/sort/group reducer.

use proptest::prelude::*;
use vitrine_facets::{FilterState, Item, SortSpec, UNKNOWN};

const VERTICALS: [&str; 4] = ["Auto", "beauty", "Food", "Travel"];
const SIZES: [&str; 3] = ["Small", "Medium", "Large"];

fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (
            prop::option::of(0..VERTICALS.len()),
            prop::option::of(0..SIZES.len()),
            prop::option::of(0_u8..6),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (vertical, size, rating))| {
                let mut item = Item::new(format!("item-{i}"), 100.0, 100.0);
                if let Some(v) = vertical {
                    item = item.with_attr("vertical", VERTICALS[v]);
                }
                if let Some(s) = size {
                    item = item.with_attr("size", SIZES[s]);
                }
                if let Some(r) = rating {
                    item = item.with_attr("rating", f64::from(r));
                }
                item
            })
            .collect()
    })
}

fn arb_state() -> impl Strategy<Value = FilterState> {
    (
        prop::collection::vec(prop::sample::select(VERTICALS.to_vec()), 0..3),
        prop::collection::vec(prop::sample::select(vec!["Small", "Large", UNKNOWN]), 0..2),
    )
        .prop_map(|(verticals, sizes)| {
            let mut state = FilterState::new();
            state.set_allowed("vertical", verticals);
            state.set_allowed("size", sizes);
            state
        })
}

proptest! {
    #[test]
    fn membership_is_and_across_or_within(items in arb_items(), state in arb_state()) {
        let visible = state.visible_set(&items);
        for item in &items {
            let expected = ["vertical", "size"].iter().all(|attribute| {
                let allowed: Vec<&str> = state.allowed(attribute).collect();
                allowed.is_empty() || allowed.contains(&item.key_of(attribute).as_ref())
            });
            let shown = visible.iter().any(|v| v.id == item.id);
            prop_assert_eq!(shown, expected, "item {}", item.id);
        }
    }

    #[test]
    fn sorting_is_stable_and_reorders_only(items in arb_items(), descending in any::<bool>()) {
        let mut state = FilterState::new();
        let spec = if descending {
            SortSpec::descending("rating")
        } else {
            SortSpec::ascending("rating")
        };
        state.set_sort(Some(spec.clone()));
        let sorted = state.visible_set(&items);
        prop_assert_eq!(sorted.len(), items.len());

        for pair in sorted.windows(2) {
            let ordering = spec.compare(pair[0], pair[1]);
            prop_assert!(ordering.is_le());
            if ordering.is_eq() {
                // Ties keep manifest order.
                let pos = |id: &vitrine_facets::ItemId| items.iter().position(|i| &i.id == id);
                prop_assert!(pos(&pair[0].id) < pos(&pair[1].id));
            }
        }
    }

    #[test]
    fn groups_partition_the_visible_set(items in arb_items(), state in arb_state()) {
        let mut state = state;
        state.set_group(Some("size".into()));
        let visible = state.visible_set(&items);
        let groups = state.group_visible(&visible).unwrap();

        let total: usize = groups.iter().map(|g| g.items.len()).sum();
        prop_assert_eq!(total, visible.len());
        for group in &groups {
            prop_assert!(!group.items.is_empty());
            for item in &group.items {
                let key = item.key_of("size");
                prop_assert_eq!(key.as_ref(), group.key.as_str());
            }
        }
        let keys: Vec<_> = groups.iter().map(|g| g.key.clone()).collect();
        let mut sorted_keys = keys.clone();
        sorted_keys.sort();
        prop_assert_eq!(keys, sorted_keys);
    }
}
