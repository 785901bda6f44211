// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The explorer state and its reducer.

use core::time::Duration;

use hashbrown::{HashMap, HashSet};
use kurbo::{Affine, Point, Rect, Size};
use serde::Serialize;
use vitrine_facets::{FacetValue, FilterState, Item, ItemId, Manifest, MediaState, SortSpec};
use vitrine_flip::{Batch, HeadlessTree, RenderTree, Renderable, TransitionEngine};
use vitrine_view2d::{DeepZoomProvider, OverlayId, OverlayViewport, PanGesture, Viewport};

use crate::arrange::{Arrangement, LayoutMode, arrange};
use crate::{ExplorerConfig, ResizeDebounce};

/// Overlay outlining the item shown in the detail panel.
pub const SELECTION_OVERLAY: OverlayId = OverlayId(0);

/// Key of an element in the explorer's scene.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SceneKey {
    /// An item thumbnail, laid out in content coordinates.
    Item(ItemId),
    /// The detail panel, laid out in screen coordinates.
    DetailPanel,
}

/// Everything that can happen to an [`Explorer`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Adds or removes one value from an attribute's allow-list.
    ToggleFilter {
        /// Attribute name.
        attribute: String,
        /// Attribute value.
        value: String,
    },
    /// Replaces an attribute's allow-list.
    SetAllowed {
        /// Attribute name.
        attribute: String,
        /// Allowed values; empty lifts the constraint.
        values: Vec<String>,
    },
    /// Lifts every constraint on one attribute.
    ClearAttribute(String),
    /// Lifts every filter.
    ClearFilters,
    /// Sets or clears the sort.
    SetSort(Option<SortSpec>),
    /// Sets or clears the group attribute.
    SetGroup(Option<String>),
    /// Switches layout engine.
    SetLayoutMode(LayoutMode),
    /// Zooms in one step around the container center.
    ZoomIn,
    /// Zooms out one step around the container center.
    ZoomOut,
    /// Zooms by a factor around a screen point.
    ZoomAt {
        /// Multiplicative factor.
        factor: f64,
        /// Screen point that stays put.
        pivot: Point,
    },
    /// Re-fits the content into the container.
    FitToViewport,
    /// Pointer pressed at a screen point.
    PanStart(Point),
    /// Pointer moved to a screen point.
    PanMove(Point),
    /// Pointer released.
    PanEnd,
    /// Click at a screen point.
    Click(Point),
    /// Closes the detail panel.
    CloseDetail,
    /// The container was resized.
    Resize(Size),
    /// The host failed to load an item's media.
    MediaFailed(ItemId),
    /// A display frame at the given host time.
    Tick(Duration),
}

/// Readout for a stats bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Items in the visible set.
    pub visible: usize,
    /// Items in the manifest.
    pub total: usize,
    /// Distinct group values among visible items; zero when not grouping.
    pub groups: usize,
}

/// The whole explorer: items, filters, layout, viewport, and animations.
///
/// Rendering is a projection of this state. Item elements in [`Explorer::scene`]
/// are laid out in content coordinates and drawn through
/// [`Explorer::viewport`]; the detail panel is laid out in screen coordinates.
///
/// Time only advances through [`Action::Tick`], so the explorer is fully
/// deterministic under test.
#[derive(Debug)]
pub struct Explorer {
    config: ExplorerConfig,
    manifest: Manifest,
    index: HashMap<ItemId, usize>,
    media_failures: HashSet<ItemId>,
    filter: FilterState,
    mode: LayoutMode,
    visible: Vec<ItemId>,
    arrangement: Option<Arrangement>,
    view: OverlayViewport,
    pan: PanGesture,
    engine: TransitionEngine<SceneKey>,
    scene: HeadlessTree<SceneKey>,
    fade_in: Option<(Batch, Vec<SceneKey>)>,
    detail: Option<ItemId>,
    resize: ResizeDebounce,
    now: Duration,
}

impl Explorer {
    /// Creates an explorer showing every item of `manifest` in a grid.
    ///
    /// A configuration that fails [`ExplorerConfig::validate`] is logged and
    /// replaced by the defaults.
    #[must_use]
    pub fn new(manifest: Manifest, container: Size, config: ExplorerConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(error) => {
                tracing::warn!(error = %error, "invalid configuration, using defaults");
                ExplorerConfig::default()
            }
        };
        let mut viewport = Viewport::new(container);
        viewport.set_scale_limits(config.viewport.min_scale, config.viewport.max_scale);
        viewport.set_zoom_step(config.viewport.zoom_step);

        let mut engine = TransitionEngine::new();
        engine.set_thresholds(config.thresholds());

        let mut index = HashMap::with_capacity(manifest.items.len());
        let mut scene = HeadlessTree::new();
        for (i, item) in manifest.items.iter().enumerate() {
            index.insert(item.id.clone(), i);
            scene.insert(SceneKey::Item(item.id.clone()), Rect::ZERO).detach();
            if item.media_state() == MediaState::Missing {
                tracing::debug!(id = %item.id, "item has no media, using placeholder");
            }
        }
        scene
            .insert(SceneKey::DetailPanel, panel_rect(viewport.container(), &config))
            .detach();

        let mut resize = ResizeDebounce::new(config.resize_debounce());
        resize.mark_applied(viewport.container());

        let mut explorer = Self {
            config,
            manifest,
            index,
            media_failures: HashSet::new(),
            filter: FilterState::new(),
            mode: LayoutMode::default(),
            visible: Vec::new(),
            arrangement: None,
            view: OverlayViewport::new(viewport),
            pan: PanGesture::default(),
            engine,
            scene,
            fade_in: None,
            detail: None,
            resize,
            now: Duration::ZERO,
        };
        explorer.relayout_instant();
        explorer
    }

    /// Creates an explorer from manifest JSON.
    ///
    /// A manifest that fails to parse or validate is logged and replaced by
    /// an empty one; the explorer still works, it just shows nothing.
    #[must_use]
    pub fn from_manifest_json(json: &str, container: Size, config: ExplorerConfig) -> Self {
        let manifest = match Manifest::from_json_str(json) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!(error = %err, "manifest load failed, starting with no items");
                Manifest::default()
            }
        };
        Self::new(manifest, container, config)
    }

    /// Applies one action. Returns `true` while the host should keep
    /// sending [`Action::Tick`].
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleFilter { attribute, value } => {
                self.filter.toggle(&attribute, &value);
                self.refresh("filter");
            }
            Action::SetAllowed { attribute, values } => {
                self.filter.set_allowed(&attribute, values);
                self.refresh("filter");
            }
            Action::ClearAttribute(attribute) => {
                self.filter.clear_attribute(&attribute);
                self.refresh("filter");
            }
            Action::ClearFilters => {
                self.filter.clear();
                self.refresh("filter");
            }
            Action::SetSort(sort) => {
                self.filter.set_sort(sort);
                self.refresh("sort");
            }
            Action::SetGroup(group) => {
                self.filter.set_group(group);
                self.refresh("group");
            }
            Action::SetLayoutMode(mode) => {
                if self.mode != mode {
                    self.mode = mode;
                    self.refresh("layout mode");
                }
            }
            Action::ZoomIn => {
                self.view.viewport.zoom_in();
            }
            Action::ZoomOut => {
                self.view.viewport.zoom_out();
            }
            Action::ZoomAt { factor, pivot } => {
                self.view.zoom_by(factor, pivot);
            }
            Action::FitToViewport => self.fit_viewport(),
            Action::PanStart(pointer) => {
                self.pan_start(pointer);
            }
            Action::PanMove(pointer) => self.pan_move(pointer),
            Action::PanEnd => self.pan.end(),
            Action::Click(point) => {
                self.click(point);
            }
            Action::CloseDetail => self.close_detail(),
            Action::Resize(size) => self.resize.request(size, self.now),
            Action::MediaFailed(id) => self.report_media_failure(id),
            Action::Tick(now) => return self.tick(now),
        }
        self.is_animating()
    }

    /// Advances animations and pending resizes to host time `now`.
    ///
    /// Returns `true` while more frames are needed.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.now = now;
        if let Some(size) = self.resize.poll(now) {
            self.apply_resize(size);
        }
        self.engine.tick(now, &mut self.scene);
        self.start_ready_fade_in();
        self.is_animating()
    }

    /// Returns `true` while animations run or a resize waits to be applied.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.engine.is_busy() || self.fade_in.is_some() || self.resize.is_pending()
    }

    /// Scene elements with a running animation, in no particular order.
    pub fn running_animations(&self) -> impl Iterator<Item = &SceneKey> + '_ {
        self.engine.running_keys()
    }

    /// Starts a pan unless `pointer` (screen coordinates) is over an item.
    pub fn pan_start(&mut self, pointer: Point) -> bool {
        let over_item = self.hit(pointer).is_some();
        self.pan.begin(pointer, over_item, self.view.viewport.translation())
    }

    /// Moves an active pan to `pointer`.
    pub fn pan_move(&mut self, pointer: Point) {
        if let Some(translation) = self.pan.update(pointer) {
            self.view.viewport.set_translation(translation);
        }
    }

    /// Returns `true` while a pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.is_panning()
    }

    /// The item drawn under a screen point.
    ///
    /// While a transition runs this is whatever the scene currently shows
    /// there, which may be an item that is fading out.
    #[must_use]
    pub fn item_at(&self, point: Point) -> Option<&Item> {
        let id = self.hit(point)?;
        self.item(id)
    }

    /// Opens the detail panel for the item under a screen point and returns
    /// that item.
    pub fn click(&mut self, point: Point) -> Option<&Item> {
        let id = self.item_at(point)?.id.clone();
        self.open_detail(id.clone());
        self.item(&id)
    }

    /// Shows `id` in the detail panel, sliding the panel in if it was closed.
    pub fn open_detail(&mut self, id: ItemId) {
        if !self.index.contains_key(&id) {
            return;
        }
        let was_open = self.detail.replace(id).is_some();
        self.sync_selection_overlay();
        if was_open {
            return;
        }
        let panel = SceneKey::DetailPanel;
        // A closing slide would detach the panel when canceled later.
        self.engine.cancel(&mut self.scene, &panel);
        let rect = panel_rect(self.view.viewport.container(), &self.config);
        if let Some(element) = self.scene.element_mut(&panel) {
            element.set_layout(rect);
            element.set_transform(Affine::IDENTITY);
            element.attach();
        }
        self.engine
            .slide_in_right(&mut self.scene, &panel, self.config.transition_options());
    }

    /// Slides the detail panel out.
    pub fn close_detail(&mut self) {
        if self.detail.take().is_none() {
            return;
        }
        self.view.detach_overlay(SELECTION_OVERLAY);
        self.engine.slide_out_right(
            &mut self.scene,
            &SceneKey::DetailPanel,
            true,
            self.config.transition_options(),
        );
    }

    /// Marks an item's media as failed so it renders as a placeholder.
    pub fn report_media_failure(&mut self, id: ItemId) {
        if self.index.contains_key(&id) && self.media_failures.insert(id.clone()) {
            tracing::debug!(id = %id, "media failed to load, using placeholder");
        }
    }

    /// Whether an item's media can be shown.
    #[must_use]
    pub fn media_state(&self, id: &ItemId) -> MediaState {
        if self.media_failures.contains(id) {
            return MediaState::Missing;
        }
        self.item(id).map_or(MediaState::Missing, Item::media_state)
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Every item, in manifest order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.manifest.items
    }

    /// Looks up an item.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).map(|&i| &self.manifest.items[i])
    }

    /// Value counts for a facet.
    #[must_use]
    pub fn facet_counts(&self, attribute: &str) -> Vec<FacetValue> {
        self.manifest.facet_counts(attribute)
    }

    /// The active filters, sort and grouping.
    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The selected layout engine.
    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.mode
    }

    /// Identifiers of the visible set, in order.
    #[must_use]
    pub fn visible_ids(&self) -> &[ItemId] {
        &self.visible
    }

    /// The visible set, in order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.visible.iter().filter_map(|id| self.item(id))
    }

    /// Current frames, or `None` when nothing is visible.
    #[must_use]
    pub fn arrangement(&self) -> Option<&Arrangement> {
        self.arrangement.as_ref()
    }

    /// Pan/zoom state.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.view.viewport
    }

    /// Viewport plus pinned overlays.
    #[must_use]
    pub fn overlays(&self) -> &OverlayViewport {
        &self.view
    }

    /// Zoom readout.
    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.view.viewport.zoom_percent()
    }

    /// Elements to draw.
    #[must_use]
    pub fn scene(&self) -> &HeadlessTree<SceneKey> {
        &self.scene
    }

    /// The item shown in the detail panel.
    #[must_use]
    pub fn detail(&self) -> Option<&Item> {
        self.detail.as_ref().and_then(|id| self.item(id))
    }

    /// Counts for a stats bar.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let groups = self.filter.group().map_or(0, |attribute| {
            self.visible_items()
                .map(|item| item.key_of(attribute))
                .collect::<HashSet<_>>()
                .len()
        });
        Stats {
            visible: self.visible.len(),
            total: self.manifest.len(),
            groups,
        }
    }

    fn hit(&self, point: Point) -> Option<&ItemId> {
        let content = self.view.viewport.screen_to_content(point);
        if !self.engine.is_busy() && self.fade_in.is_none() {
            let index = self.arrangement.as_ref()?.item_at(content)?;
            return self.visible.get(index);
        }
        // Topmost drawn item; later manifest entries paint over earlier ones.
        self.manifest
            .items
            .iter()
            .rev()
            .map(|item| &item.id)
            .find(|id| {
                self.scene
                    .get(&SceneKey::Item((*id).clone()))
                    .and_then(|element| element.geometry())
                    .is_some_and(|g| g.opacity > 0.0 && g.rect.contains(content))
            })
    }

    fn compute_visible(&self) -> Vec<ItemId> {
        self.filter
            .visible_set(&self.manifest.items)
            .into_iter()
            .map(|item| item.id.clone())
            .collect()
    }

    fn arrange_visible(&self, visible: &[ItemId]) -> Option<Arrangement> {
        let items: Vec<&Item> = visible.iter().filter_map(|id| self.item(id)).collect();
        arrange(
            self.mode,
            &items,
            self.filter.group(),
            self.view.viewport.container(),
            &self.config,
        )
    }

    /// Lays out and projects the visible set without animating.
    fn relayout_instant(&mut self) {
        self.visible = self.compute_visible();
        self.arrangement = self.arrange_visible(&self.visible);
        {
            let frames: HashMap<&ItemId, Rect> = match &self.arrangement {
                Some(arrangement) => self
                    .visible
                    .iter()
                    .zip(arrangement.frames.iter().copied())
                    .collect(),
                None => HashMap::new(),
            };
            for item in &self.manifest.items {
                let Some(element) = self.scene.get_mut(&SceneKey::Item(item.id.clone())) else {
                    continue;
                };
                match frames.get(&item.id) {
                    Some(&frame) => {
                        element.set_layout(frame);
                        element.set_transform(Affine::IDENTITY);
                        element.set_opacity(1.0);
                        element.attach();
                    }
                    None => element.detach(),
                }
            }
        }
        tracing::debug!(
            visible = self.visible.len(),
            total = self.manifest.len(),
            "visible set computed"
        );
        self.fit_viewport();
    }

    /// Snaps every in-flight animation to its target so a new change starts
    /// from a settled scene.
    fn supersede(&mut self) {
        self.engine.cancel_all(&mut self.scene);
        if let Some((_, keys)) = self.fade_in.take() {
            for key in keys {
                if let Some(element) = self.scene.element_mut(&key) {
                    element.set_opacity(1.0);
                }
            }
        }
    }

    /// Recomputes the visible set and animates the scene to the new layout:
    /// excluded items fade out, remaining items reflow, newcomers fade in.
    fn refresh(&mut self, reason: &'static str) {
        self.supersede();

        let visible = self.compute_visible();
        let arrangement = self.arrange_visible(&visible);

        let (removed, kept, added) = {
            let before: HashSet<&ItemId> = self.visible.iter().collect();
            let after: HashSet<&ItemId> = visible.iter().collect();
            let key = |id: &ItemId| SceneKey::Item(id.clone());
            let removed: Vec<SceneKey> = self
                .visible
                .iter()
                .filter(|id| !after.contains(id))
                .map(key)
                .collect();
            let kept: Vec<SceneKey> = visible
                .iter()
                .filter(|id| before.contains(id))
                .map(key)
                .collect();
            let added: Vec<SceneKey> = visible
                .iter()
                .filter(|id| !before.contains(id))
                .map(key)
                .collect();
            (removed, kept, added)
        };

        let moves: Vec<(SceneKey, Rect)> = match &arrangement {
            Some(arrangement) => visible
                .iter()
                .cloned()
                .map(SceneKey::Item)
                .zip(arrangement.frames.iter().copied())
                .collect(),
            None => Vec::new(),
        };
        let appearing = added.clone();
        let mutate = move |tree: &mut dyn RenderTree<SceneKey>| {
            for (key, frame) in moves {
                if let Some(element) = tree.element_mut(&key) {
                    element.set_layout(frame);
                }
            }
            for key in &appearing {
                if let Some(element) = tree.element_mut(key) {
                    element.set_transform(Affine::IDENTITY);
                    element.set_opacity(0.0);
                    element.attach();
                }
            }
        };

        tracing::debug!(
            reason,
            visible = visible.len(),
            total = self.manifest.len(),
            removed = removed.len(),
            added = added.len(),
            "visible set recomputed"
        );
        let options = self
            .config
            .transition_options()
            .on_complete(|report| tracing::trace!(?report, "reflow settled"));
        let transition = self
            .engine
            .animate_filter(&mut self.scene, &removed, &kept, mutate, options);
        tracing::trace!(
            fading = removed.len(),
            reflowing = kept.len(),
            "filter transition started"
        );

        self.visible = visible;
        self.arrangement = arrangement;
        if !added.is_empty() {
            self.fade_in = Some((transition.reflow, added));
            self.start_ready_fade_in();
        }
        self.sync_selection_overlay();
        self.fit_viewport();
    }

    fn start_ready_fade_in(&mut self) {
        if !self
            .fade_in
            .as_ref()
            .is_some_and(|(reflow, _)| reflow.is_settled())
        {
            return;
        }
        if let Some((_, keys)) = self.fade_in.take() {
            self.engine
                .fade_in(&mut self.scene, &keys, self.config.transition_options());
        }
    }

    fn apply_resize(&mut self, size: Size) {
        tracing::debug!(width = size.width, height = size.height, "container resized");
        self.view.viewport.set_container(size);
        if self.detail.is_some() {
            let rect = panel_rect(self.view.viewport.container(), &self.config);
            if let Some(panel) = self.scene.get_mut(&SceneKey::DetailPanel) {
                panel.set_layout(rect);
            }
        }
        self.refresh("resize");
    }

    fn fit_viewport(&mut self) {
        let container = self.view.viewport.container();
        match &self.arrangement {
            Some(arrangement) => self.view.viewport.fit_to_viewport(
                arrangement.content,
                container,
                self.config.viewport.max_fit_scale,
            ),
            None => {
                self.view.viewport.set_content_bounds(None);
                self.view.viewport.reset();
            }
        }
    }

    /// Keeps the selection outline on the selected item's current frame.
    fn sync_selection_overlay(&mut self) {
        let frame = self.detail.as_ref().and_then(|id| {
            let index = self.visible.iter().position(|v| v == id)?;
            self.arrangement.as_ref()?.frames.get(index).copied()
        });
        match frame {
            Some(frame) => self.view.attach_overlay(SELECTION_OVERLAY, frame),
            None => {
                self.view.detach_overlay(SELECTION_OVERLAY);
            }
        }
    }
}

fn panel_rect(container: Size, config: &ExplorerConfig) -> Rect {
    let width = config.detail_panel_width.min(container.width);
    Rect::new(container.width - width, 0.0, container.width, container.height)
}
