// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Items and their categorical attributes.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Bucket name for items that lack the attribute being grouped or filtered on.
pub const UNKNOWN: &str = "Unknown";

/// Stable, unique identifier of an [`Item`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A categorical attribute value.
///
/// Manifests mostly carry text (`"Auto"`) or numbers (`4`); numbers sort
/// numerically and text sorts caselessly. Flags parse as [`AttrValue::Bool`],
/// and any other JSON (`null`, arrays, objects) is kept as
/// [`AttrValue::Other`] so one odd field never rejects the whole manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A flag, such as `"featured": true`.
    Bool(bool),
    /// A numeric value, such as a rating.
    Number(f64),
    /// A text value, such as a category name.
    Text(String),
    /// Any other JSON value.
    Other(serde_json::Value),
}

impl AttrValue {
    /// The value as used for filter allow-lists and group keys.
    ///
    /// Integral numbers print without a fractional part and `null` keys as
    /// [`UNKNOWN`]; arrays and objects key as their compact JSON text.
    #[must_use]
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Self::Other(serde_json::Value::Null) => Cow::Borrowed(UNKNOWN),
            Self::Other(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Orders two values for sorting.
    ///
    /// Numbers compare numerically, text compares caselessly and then
    /// ordinally, and `false` comes before `true`. Across kinds, numbers come
    /// first, then flags, then text, then everything else by key.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => caseless_cmp(a, b),
            (Self::Other(_), Self::Other(_)) => caseless_cmp(&self.key(), &other.key()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Bool(_) => 1,
            Self::Text(_) => 2,
            Self::Other(_) => 3,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Whether an item's media can be shown or needs a placeholder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediaState {
    /// The media reference is present and has not failed to load.
    #[default]
    Available,
    /// No media reference, or the host reported a load failure.
    Missing,
}

/// One advertisement-image record.
///
/// Items are created once from the manifest and never mutated afterwards.
/// Attributes are the manifest fields other than `id`, `width`, `height` and
/// `media`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Intrinsic width in pixels.
    pub width: f64,
    /// Intrinsic height in pixels.
    pub height: f64,
    /// Media reference (URL or path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Categorical attributes by name.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl Item {
    /// Creates an item with no attributes and no media.
    pub fn new(id: impl Into<ItemId>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            media: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.to_owned(), value.into());
        self
    }

    /// Builder-style media setter.
    #[must_use]
    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    /// Returns the attribute named `name`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// The filter/group key for `name`, or [`UNKNOWN`] when absent.
    #[must_use]
    pub fn key_of(&self, name: &str) -> Cow<'_, str> {
        self.attr(name).map_or(Cow::Borrowed(UNKNOWN), AttrValue::key)
    }

    /// Media state judged from the manifest alone.
    #[must_use]
    pub fn media_state(&self) -> MediaState {
        match self.media.as_deref() {
            Some(media) if !media.trim().is_empty() => MediaState::Available,
            _ => MediaState::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{AttrValue, Item, MediaState, UNKNOWN};

    #[test]
    fn flattened_attributes_round_trip_from_json() {
        let item: Item = serde_json::from_str(
            r#"{"id":"a1","width":300,"height":250,"media":"a1.png","vertical":"Auto","rating":4}"#,
        )
        .unwrap();
        assert_eq!(item.id.as_str(), "a1");
        assert_eq!(item.attr("vertical"), Some(&AttrValue::from("Auto")));
        assert_eq!(item.attr("rating"), Some(&AttrValue::Number(4.0)));
        assert_eq!(item.key_of("rating"), "4");
        assert_eq!(item.key_of("brand"), UNKNOWN);
        assert_eq!(item.media_state(), MediaState::Available);
    }

    #[test]
    fn blank_media_is_missing() {
        let item = Item::new("x", 1.0, 1.0).with_media("  ");
        assert_eq!(item.media_state(), MediaState::Missing);
        assert_eq!(Item::new("y", 1.0, 1.0).media_state(), MediaState::Missing);
    }

    #[test]
    fn text_compares_caselessly_then_ordinally() {
        let a = AttrValue::from("apple");
        let b = AttrValue::from("Banana");
        let upper = AttrValue::from("Apple");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(upper.compare(&a), Ordering::Less);
        assert_eq!(AttrValue::Number(2.0).compare(&AttrValue::Number(10.0)), Ordering::Less);
        assert_eq!(AttrValue::Number(99.0).compare(&a), Ordering::Less);
    }

    #[test]
    fn flags_nulls_and_lists_are_kept_as_attributes() {
        let item: Item = serde_json::from_str(
            r#"{"id":"a2","width":1,"height":1,"featured":true,"brand":null,"tags":["a","b"]}"#,
        )
        .unwrap();
        assert_eq!(item.attr("featured"), Some(&AttrValue::Bool(true)));
        assert_eq!(item.key_of("featured"), "true");
        assert_eq!(item.key_of("brand"), UNKNOWN);
        assert_eq!(item.key_of("tags"), r#"["a","b"]"#);

        assert_eq!(AttrValue::from(false).compare(&AttrValue::from(true)), Ordering::Less);
        assert_eq!(AttrValue::from(true).compare(&AttrValue::from("a")), Ordering::Less);
        assert_eq!(AttrValue::from(1.0).compare(&AttrValue::from(true)), Ordering::Less);
    }
}
