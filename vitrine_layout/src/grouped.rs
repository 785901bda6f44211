// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped, baseline-aligned stacks with labels.

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::geometry::{center_in, fit_aspect, hit_test};

/// One input item for [`grouped_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupedItem<'a> {
    /// Group key, typically an attribute value.
    pub group: &'a str,
    /// Intrinsic size, used to aspect-fit the item into its cell.
    pub size: Size,
}

/// Parameters for [`grouped_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupedParams {
    /// Edge of the square cell each item occupies.
    pub cell_size: f64,
    /// Space between cells inside a stack.
    pub gap: f64,
    /// Inset applied to the top of the layout and to both sides of each slot.
    pub padding: f64,
    /// Distance from the shared baseline to the label anchor.
    pub label_margin: f64,
    /// Vertical room reserved below the label anchor.
    pub label_height: f64,
}

impl Default for GroupedParams {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            gap: 4.0,
            padding: 16.0,
            label_margin: 12.0,
            label_height: 20.0,
        }
    }
}

/// One group's stack in a [`GroupedLayout`].
#[derive(Clone, Debug, PartialEq)]
pub struct GroupBlock {
    /// The group key.
    pub key: String,
    /// Indices into the input slice of the items in this group, in input order.
    pub members: Vec<usize>,
    /// The equal-width column slot allotted to this group.
    pub slot: Rect,
    /// Bounds of the packed stack; its bottom edge sits on the baseline.
    pub block: Rect,
    /// Number of columns in the stack.
    pub cols: usize,
    /// Label anchor: horizontally centered under the slot, at
    /// `baseline + label_margin`.
    pub label_anchor: Point,
}

/// Result of [`grouped_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedLayout {
    /// Groups in lexicographic key order.
    pub groups: Vec<GroupBlock>,
    /// Item frames in input order.
    pub frames: Vec<Rect>,
    /// The y coordinate every stack rests on.
    pub baseline: f64,
    /// Bounds of all stacks and labels.
    pub content: Rect,
}

impl GroupedLayout {
    /// Returns the index of the item whose frame contains `pt`.
    #[must_use]
    pub fn item_at(&self, pt: Point) -> Option<usize> {
        hit_test(&self.frames, pt)
    }

    /// Returns the group containing the item at `index`.
    #[must_use]
    pub fn group_of(&self, index: usize) -> Option<&GroupBlock> {
        self.groups.iter().find(|g| g.members.contains(&index))
    }
}

/// Columns that fit in `width` at the given cell and gap, at least one and at
/// most `len`.
fn columns_for(width: f64, cell: f64, gap: f64, len: usize) -> usize {
    let stride = cell + gap;
    let fit = if stride > 0.0 && width.is_finite() {
        ((width + gap) / stride).floor().max(1.0)
    } else {
        1.0
    };
    #[expect(
        clippy::cast_possible_truncation,
        reason = "column counts are small non-negative integers"
    )]
    let fit = fit as usize;
    fit.clamp(1, len.max(1))
}

/// Partitions `items` by group and stacks each group on a common baseline.
///
/// Groups are ordered lexicographically by key and each gets a column slot of
/// `container_width / group_count`. Inside its slot a group picks as many
/// columns as fit at `cell_size`, and its items are packed from the baseline
/// upward so every stack rests on the same row, with the tallest stack setting
/// the baseline. Labels are centered under their slot.
///
/// Returns `None` for an empty item list.
#[must_use]
pub fn grouped_layout(
    items: &[GroupedItem<'_>],
    container_width: f64,
    params: &GroupedParams,
) -> Option<GroupedLayout> {
    if items.is_empty() {
        return None;
    }

    let mut partitions: Vec<(&str, SmallVec<[usize; 16]>)> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match partitions.iter_mut().find(|(key, _)| *key == item.group) {
            Some((_, members)) => members.push(i),
            None => partitions.push((item.group, SmallVec::from_slice(&[i]))),
        }
    }
    partitions.sort_by(|a, b| a.0.cmp(b.0));

    let cell = params.cell_size.max(0.0);
    let gap = params.gap.max(0.0);
    let padding = params.padding.max(0.0);
    let width = if container_width.is_finite() {
        container_width.max(0.0)
    } else {
        0.0
    };
    let slot_width = width / partitions.len() as f64;

    // First pass: column counts and stack heights.
    let shapes: Vec<(usize, usize)> = partitions
        .iter()
        .map(|(_, members)| {
            let cols = columns_for(slot_width - 2.0 * padding, cell, gap, members.len());
            (cols, members.len().div_ceil(cols))
        })
        .collect();
    let tallest = shapes
        .iter()
        .map(|&(_, rows)| stack_extent(rows, cell, gap))
        .fold(0.0_f64, f64::max);
    let baseline = padding + tallest;
    let label_y = baseline + params.label_margin;

    let mut frames = vec![Rect::ZERO; items.len()];
    let mut groups = Vec::with_capacity(partitions.len());
    for (slot_index, ((key, members), (cols, rows))) in
        partitions.iter().zip(shapes.iter().copied()).enumerate()
    {
        let slot = Rect::new(
            slot_index as f64 * slot_width,
            0.0,
            (slot_index + 1) as f64 * slot_width,
            label_y + params.label_height,
        );
        let block_size = Size::new(stack_extent(cols, cell, gap), stack_extent(rows, cell, gap));
        let block_x = slot.center().x - block_size.width * 0.5;
        let block = Rect::from_origin_size(
            Point::new(block_x, baseline - block_size.height),
            block_size,
        );

        for (n, &index) in members.iter().enumerate() {
            let col = (n % cols) as f64;
            let row_from_bottom = (n / cols) as f64;
            let cell_rect = Rect::from_origin_size(
                Point::new(
                    block_x + col * (cell + gap),
                    baseline - cell - row_from_bottom * (cell + gap),
                ),
                Size::new(cell, cell),
            );
            frames[index] = center_in(fit_aspect(items[index].size, cell_rect.size()), cell_rect);
        }

        groups.push(GroupBlock {
            key: (*key).into(),
            members: members.to_vec(),
            slot,
            block,
            cols,
            label_anchor: Point::new(slot.center().x, label_y),
        });
    }

    let content = Rect::new(0.0, 0.0, width, label_y + params.label_height + padding);
    Some(GroupedLayout {
        groups,
        frames,
        baseline,
        content,
    })
}

fn stack_extent(count: usize, cell: f64, gap: f64) -> f64 {
    let n = count as f64;
    n * cell + (n - 1.0).max(0.0) * gap
}
