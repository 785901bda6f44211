// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Facets: the item model and the filter/sort/group reducer.
//!
//! - [`Item`]: an immutable record with an intrinsic size, a media reference,
//!   and categorical [`AttrValue`]s.
//! - [`Manifest`]: the read-only input, parsed from JSON and validated.
//! - [`FilterState`]: per-attribute allow-lists, a [`SortSpec`], and an
//!   optional group attribute. [`FilterState::visible_set`] is a pure function
//!   of the state and the full item list.
//!
//! ```rust
//! use vitrine_facets::{FilterState, Item, SortSpec};
//!
//! let items = vec![
//!     Item::new("a", 300.0, 250.0).with_attr("vertical", "Auto").with_attr("rating", 4.0),
//!     Item::new("b", 728.0, 90.0).with_attr("vertical", "Travel").with_attr("rating", 2.0),
//!     Item::new("c", 160.0, 600.0).with_attr("vertical", "Auto"),
//! ];
//!
//! let mut state = FilterState::new();
//! state.toggle("vertical", "Auto");
//! state.set_sort(Some(SortSpec::descending("rating")));
//!
//! let visible: Vec<_> = state.visible_set(&items).iter().map(|i| i.id.as_str()).collect();
//! assert_eq!(visible, ["c", "a"]);
//! ```

mod filter;
mod item;
mod manifest;

pub use filter::{FilterState, Group, SortDirection, SortSpec, group_items};
pub use item::{AttrValue, Item, ItemId, MediaState, UNKNOWN};
pub use manifest::{FacetValue, Manifest, ManifestError};
