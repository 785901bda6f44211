// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running the layout engines over a visible set.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use vitrine_facets::Item;
use vitrine_layout::{GroupedItem, grid_layout, grouped_layout, hit_test, row_layout};

use crate::ExplorerConfig;

/// Which layout engine arranges the visible set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Best-fit uniform grid filling the container.
    #[default]
    Grid,
    /// Aspect-preserving rows in an unbounded plane, framed by the viewport.
    DeepZoom,
    /// One stack per group value on a shared baseline.
    ///
    /// Falls back to [`LayoutMode::Grid`] while no group attribute is set.
    Grouped,
}

/// A label under one grouped stack.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupLabel {
    /// Group value.
    pub key: String,
    /// Top-center of the label, in content coordinates.
    pub anchor: Point,
    /// Members in the group.
    pub count: usize,
}

/// Frames for a visible set, in content coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrangement {
    /// The engine that produced the frames.
    pub mode: LayoutMode,
    /// One frame per visible item, in visible order.
    pub frames: Vec<Rect>,
    /// Bounds the viewport fits.
    pub content: Rect,
    /// Group labels; empty outside grouped mode.
    pub labels: Vec<GroupLabel>,
}

impl Arrangement {
    /// Index of the visible item under `pt` (content coordinates).
    #[must_use]
    pub fn item_at(&self, pt: Point) -> Option<usize> {
        hit_test(&self.frames, pt)
    }
}

/// Lays out `visible` for `container`.
///
/// `group` is the active group attribute, used in grouped mode. Returns
/// `None` when nothing is visible.
pub(crate) fn arrange(
    mode: LayoutMode,
    visible: &[&Item],
    group: Option<&str>,
    container: Size,
    config: &ExplorerConfig,
) -> Option<Arrangement> {
    let sizes: Vec<Size> = visible
        .iter()
        .map(|item| Size::new(item.width, item.height))
        .collect();
    match (mode, group) {
        (LayoutMode::Grouped, Some(attribute)) => {
            let keys: Vec<_> = visible.iter().map(|item| item.key_of(attribute)).collect();
            let items: Vec<GroupedItem<'_>> = keys
                .iter()
                .zip(&sizes)
                .map(|(key, &size)| GroupedItem { group: key, size })
                .collect();
            let layout = grouped_layout(&items, container.width, &config.grouped_params())?;
            let labels = layout
                .groups
                .iter()
                .map(|block| GroupLabel {
                    key: block.key.clone(),
                    anchor: block.label_anchor,
                    count: block.members.len(),
                })
                .collect();
            Some(Arrangement {
                mode,
                frames: layout.frames,
                content: layout.content,
                labels,
            })
        }
        (LayoutMode::DeepZoom, _) => {
            let layout = row_layout(&sizes, &config.row_params())?;
            Some(Arrangement {
                mode,
                frames: layout.frames,
                content: layout.content,
                labels: Vec::new(),
            })
        }
        (LayoutMode::Grid | LayoutMode::Grouped, _) => {
            let layout = grid_layout(&sizes, container, &config.grid_params())?;
            Some(Arrangement {
                mode: LayoutMode::Grid,
                frames: layout.frames,
                content: Rect::from_origin_size(Point::ORIGIN, container),
                labels: Vec::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use vitrine_facets::Item;

    use super::{LayoutMode, arrange};
    use crate::ExplorerConfig;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::new(format!("ad-{i}"), 300.0, 250.0)
                    .with_attr("vertical", if i % 3 == 0 { "Auto" } else { "Food" })
            })
            .collect()
    }

    #[test]
    fn grid_fills_the_container() {
        let items = items(12);
        let visible: Vec<_> = items.iter().collect();
        let config = ExplorerConfig::default();
        let container = Size::new(400.0, 300.0);
        let arranged = arrange(LayoutMode::Grid, &visible, None, container, &config).unwrap();
        assert_eq!(arranged.frames.len(), 12);
        assert_eq!(arranged.content.size(), container);
        assert!(arranged.labels.is_empty());
    }

    #[test]
    fn grouped_without_attribute_falls_back_to_grid() {
        let items = items(4);
        let visible: Vec<_> = items.iter().collect();
        let config = ExplorerConfig::default();
        let arranged =
            arrange(LayoutMode::Grouped, &visible, None, Size::new(400.0, 300.0), &config)
                .unwrap();
        assert_eq!(arranged.mode, LayoutMode::Grid);
    }

    #[test]
    fn grouped_labels_follow_group_order() {
        let items = items(6);
        let visible: Vec<_> = items.iter().collect();
        let config = ExplorerConfig::default();
        let arranged = arrange(
            LayoutMode::Grouped,
            &visible,
            Some("vertical"),
            Size::new(400.0, 300.0),
            &config,
        )
        .unwrap();
        let keys: Vec<_> = arranged.labels.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, ["Auto", "Food"]);
        assert_eq!(arranged.labels[0].count, 2);
        assert_eq!(arranged.labels[0].anchor.y, arranged.labels[1].anchor.y);
    }

    #[test]
    fn nothing_visible_is_none() {
        let config = ExplorerConfig::default();
        for mode in [LayoutMode::Grid, LayoutMode::DeepZoom, LayoutMode::Grouped] {
            assert!(arrange(mode, &[], Some("vertical"), Size::new(10.0, 10.0), &config).is_none());
        }
    }
}
