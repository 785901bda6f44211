// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only input manifest.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Item, ItemId, MediaState};

/// Errors produced while loading a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest is not valid JSON or does not have the expected shape.
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Two items share an identifier.
    #[error("duplicate item id `{0}`")]
    DuplicateId(ItemId),
    /// An item's intrinsic size is zero, negative, or not finite.
    #[error("item `{id}` has invalid intrinsic size {width}x{height}")]
    InvalidSize {
        /// The offending item.
        id: ItemId,
        /// Declared width.
        width: f64,
        /// Declared height.
        height: f64,
    },
}

/// One value of a facet and how many items carry it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    /// The attribute value, as used in filter allow-lists.
    pub value: String,
    /// Number of items with that value.
    pub count: usize,
}

/// Items plus auxiliary facet metadata.
///
/// The JSON form is `{"items": [...], "facets": {"vertical": [{"value":
/// "Auto", "count": 3}]}}`; `facets` may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Every item, in manifest order.
    pub items: Vec<Item>,
    /// Declared facet values per attribute.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<String, Vec<FacetValue>>,
}

impl Manifest {
    /// Builds a manifest from items, validating them.
    pub fn from_items(items: Vec<Item>) -> Result<Self, ManifestError> {
        let manifest = Self {
            items,
            facets: BTreeMap::new(),
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parses and validates a JSON manifest.
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        let missing = manifest
            .items
            .iter()
            .filter(|item| item.media_state() == MediaState::Missing)
            .count();
        tracing::debug!(
            items = manifest.items.len(),
            facets = manifest.facets.len(),
            missing_media = missing,
            "manifest loaded"
        );
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(item.width) || !valid(item.height) {
                return Err(ManifestError::InvalidSize {
                    id: item.id.clone(),
                    width: item.width,
                    height: item.height,
                });
            }
            if !seen.insert(&item.id) {
                return Err(ManifestError::DuplicateId(item.id.clone()));
            }
        }
        Ok(())
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Value counts for `attribute`.
    ///
    /// Declared facet metadata wins when present; otherwise counts are
    /// computed from the items, with absent values counted under
    /// [`UNKNOWN`](crate::UNKNOWN), ordered by value.
    #[must_use]
    pub fn facet_counts(&self, attribute: &str) -> Vec<FacetValue> {
        if let Some(declared) = self.facets.get(attribute) {
            return declared.clone();
        }
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.key_of(attribute).into_owned()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(value, count)| FacetValue { value, count })
            .collect()
    }
}
