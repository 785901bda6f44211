// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The filter/sort/group reducer.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{AttrValue, Item};

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Applies the direction to an ascending comparison.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sort key and direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Attribute to sort by.
    pub key: String,
    /// Direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Compares two items by this spec.
    ///
    /// Items without the attribute compare greater than items with it, before
    /// the direction is applied.
    #[must_use]
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ordering = match (a.attr(&self.key), b.attr(&self.key)) {
            (Some(x), Some(y)) => AttrValue::compare(x, y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        self.direction.apply(ordering)
    }
}

/// A group of visible items sharing one attribute value.
#[derive(Clone, Debug, PartialEq)]
pub struct Group<'a> {
    /// The shared value, or [`UNKNOWN`](crate::UNKNOWN).
    pub key: String,
    /// Members in visible order.
    pub items: Vec<&'a Item>,
}

/// Partitions `items` by `attribute`, preserving order within each group.
///
/// Groups are ordered by key, bytewise, so that the order matches the grouped
/// layout's left-to-right slots.
#[must_use]
pub fn group_items<'a>(items: &[&'a Item], attribute: &str) -> Vec<Group<'a>> {
    let mut groups: BTreeMap<String, Vec<&'a Item>> = BTreeMap::new();
    for &item in items {
        groups
            .entry(item.key_of(attribute).into_owned())
            .or_default()
            .push(item);
    }
    groups
        .into_iter()
        .map(|(key, items)| Group { key, items })
        .collect()
}

/// Active filters, sort and grouping.
///
/// Filtering ANDs across attributes and ORs within one attribute's allow-list.
/// An attribute with an empty allow-list places no constraint. Items missing
/// an attribute match only when the allow-list contains
/// [`UNKNOWN`](crate::UNKNOWN).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    allowed: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    sort: Option<SortSpec>,
    #[serde(default)]
    group: Option<String>,
}

impl FilterState {
    /// No filters, insertion order, no grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the allow-list of `attribute`, or removes it when
    /// already present. Returns `true` when the value is now allowed.
    pub fn toggle(&mut self, attribute: &str, value: &str) -> bool {
        let values = self.allowed.entry(attribute.to_owned()).or_default();
        let now_allowed = if values.remove(value) {
            false
        } else {
            values.insert(value.to_owned());
            true
        };
        if values.is_empty() {
            self.allowed.remove(attribute);
        }
        now_allowed
    }

    /// Replaces the allow-list of `attribute`.
    pub fn set_allowed<I, S>(&mut self, attribute: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.allowed.remove(attribute);
        } else {
            self.allowed.insert(attribute.to_owned(), values);
        }
    }

    /// Removes every constraint on `attribute`.
    pub fn clear_attribute(&mut self, attribute: &str) {
        self.allowed.remove(attribute);
    }

    /// Removes every filter. Sort and grouping are kept.
    pub fn clear(&mut self) {
        self.allowed.clear();
    }

    /// The allow-list of `attribute`; empty when unconstrained.
    pub fn allowed(&self, attribute: &str) -> impl Iterator<Item = &str> + '_ {
        self.allowed
            .get(attribute)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    /// Returns `true` when `value` is on the allow-list of `attribute`.
    #[must_use]
    pub fn is_allowed(&self, attribute: &str, value: &str) -> bool {
        self.allowed
            .get(attribute)
            .is_some_and(|values| values.contains(value))
    }

    /// Returns `true` when any attribute is constrained.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// Sets or clears the sort.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// The active sort.
    #[must_use]
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Sets or clears the group attribute.
    pub fn set_group(&mut self, attribute: Option<String>) {
        self.group = attribute;
    }

    /// The active group attribute.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Returns `true` when `item` passes every active filter.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.allowed
            .iter()
            .all(|(attribute, values)| values.contains(&*item.key_of(attribute)))
    }

    /// The visible set: matching items, stably sorted by the active sort or
    /// left in manifest order.
    #[must_use]
    pub fn visible_set<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        let mut visible: Vec<&Item> = items.iter().filter(|item| self.matches(item)).collect();
        if let Some(sort) = &self.sort {
            visible.sort_by(|a, b| sort.compare(a, b));
        }
        visible
    }

    /// Partitions an already computed visible set by the group attribute.
    ///
    /// Returns `None` when grouping is off.
    #[must_use]
    pub fn group_visible<'a>(&self, visible: &[&'a Item]) -> Option<Vec<Group<'a>>> {
        self.group
            .as_deref()
            .map(|attribute| group_items(visible, attribute))
    }
}
