// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The FLIP transition engine.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::time::Duration;

use kurbo::{Rect, Vec2};

use crate::batch::{Batch, BatchReport, Outcome};
use crate::frame::{Frame, Geometry, Thresholds, TransformOrigin};
use crate::registry::AnimationRegistry;
use crate::{Easing, RenderTree, Renderable};

/// Scale an element shrinks to while fading out (and grows from while fading in).
pub const FADE_SCALE: f64 = 0.95;

/// A caller-owned layout mutation, applied between the First and Last captures.
pub type LayoutMutation<K> = Box<dyn FnOnce(&mut dyn RenderTree<K>)>;

/// Timing and completion options for one engine call.
pub struct TransitionOptions {
    /// How long each animation runs.
    pub duration: Duration,
    /// Timing function.
    pub easing: Easing,
    on_complete: Option<Box<dyn FnOnce(BatchReport)>>,
}

impl fmt::Debug for TransitionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOptions")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

impl TransitionOptions {
    /// Options with the given duration and the default easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::default(),
            on_complete: None,
        }
    }

    /// Sets the timing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets a callback that runs exactly once when the batch settles.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce(BatchReport) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// What happens to an element after its animation ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FinishAction {
    Keep,
    Detach,
}

#[derive(Debug)]
struct Animation {
    base: Rect,
    from: Frame,
    to: Frame,
    origin: TransformOrigin,
    duration: Duration,
    easing: Easing,
    started_at: Option<Duration>,
    finish: FinishAction,
    batch: Batch,
}

impl Animation {
    fn apply(&self, frame: &Frame, element: &mut dyn Renderable) {
        element.set_transform(frame.to_affine(self.base, self.origin));
        element.set_opacity(frame.opacity);
    }

    /// Snaps the element to the final target and runs the finish action.
    fn complete(&self, element: Option<&mut dyn Renderable>) {
        if let Some(element) = element {
            self.apply(&self.to, element);
            if self.finish == FinishAction::Detach {
                element.detach();
            }
        }
    }
}

struct Chain<K> {
    after: Batch,
    keys: Vec<K>,
    mutate: LayoutMutation<K>,
    duration: Duration,
    easing: Easing,
    batch: Batch,
}

/// Handles returned by [`TransitionEngine::animate_filter`].
#[derive(Clone, Debug)]
pub struct FilterTransition {
    /// Fade-out of the excluded elements.
    pub fade: Batch,
    /// The FLIP pass over the remaining elements, started once `fade` settles.
    /// This settles last and carries the caller's `on_complete`.
    pub reflow: Batch,
}

/// Animates elements of a [`RenderTree`] between layouts.
///
/// The engine keeps at most one running animation per element key. Starting a
/// new animation on a key first cancels the old one, which snaps the element to
/// that animation's final target so the new one starts from a clean baseline.
///
/// Time is supplied by the host through [`TransitionEngine::tick`], normally
/// once per display frame. An animation's clock starts at the first tick after
/// it is created, and its starting frame is applied immediately, so nothing
/// jumps between the layout mutation and the next frame.
pub struct TransitionEngine<K> {
    running: AnimationRegistry<K, Animation>,
    chains: Vec<Chain<K>>,
    thresholds: Thresholds,
}

impl<K: fmt::Debug> fmt::Debug for TransitionEngine<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("running", &self.running)
            .field("chains", &self.chains.len())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl<K> Default for TransitionEngine<K> {
    fn default() -> Self {
        Self {
            running: AnimationRegistry::default(),
            chains: Vec::new(),
            thresholds: Thresholds::default(),
        }
    }
}

impl<K> TransitionEngine<K>
where
    K: Clone + Eq + Hash + 'static,
{
    /// Creates an idle engine with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the thresholds below which FLIP passes skip an element.
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    /// Returns the current thresholds.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Returns `true` when `key` has a running animation.
    #[must_use]
    pub fn is_running(&self, key: &K) -> bool {
        self.running.contains_key(key)
    }

    /// Number of running animations.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Keys with a running animation, in no particular order.
    pub fn running_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.running.keys()
    }

    /// Returns `true` while animations run or chained passes wait.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.running.is_empty() || !self.chains.is_empty()
    }

    /// Plays a FLIP transition over `keys` around a layout mutation.
    ///
    /// 1. Running animations on `keys` are canceled (snapped to their targets).
    /// 2. First: geometry of every attached element in `keys` is recorded.
    /// 3. `mutate` applies the new layout.
    /// 4. Last/Invert: for every element with a First record that is still
    ///    attached, the frame that puts it back at First is computed.
    /// 5. Play: elements whose delta exceeds the thresholds animate from that
    ///    frame to identity; the rest are skipped.
    ///
    /// The returned batch settles when every started animation has ended, or
    /// immediately if none started.
    pub fn animate(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        keys: &[K],
        mutate: impl FnOnce(&mut dyn RenderTree<K>),
        options: TransitionOptions,
    ) -> Batch {
        let batch = Batch::pending(options.on_complete);
        self.flip_into(
            tree,
            keys,
            mutate,
            options.duration,
            options.easing,
            &batch,
        );
        batch
    }

    /// Fades elements out: opacity `1 → 0` while shrinking slightly in place.
    ///
    /// With `detach`, elements are removed from the render tree when their
    /// animation ends (or is canceled).
    pub fn fade_out(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        keys: &[K],
        detach: bool,
        options: TransitionOptions,
    ) -> Batch {
        let finish = if detach {
            FinishAction::Detach
        } else {
            FinishAction::Keep
        };
        let shrunk = Frame {
            scale: Vec2::new(FADE_SCALE, FADE_SCALE),
            ..Frame::identity(0.0)
        };
        self.play_each(
            tree,
            keys,
            Frame::identity(1.0),
            shrunk,
            TransformOrigin::Center,
            finish,
            options,
        )
    }

    /// Fades attached elements in: the inverse of [`TransitionEngine::fade_out`].
    pub fn fade_in(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        keys: &[K],
        options: TransitionOptions,
    ) -> Batch {
        let shrunk = Frame {
            scale: Vec2::new(FADE_SCALE, FADE_SCALE),
            ..Frame::identity(0.0)
        };
        self.play_each(
            tree,
            keys,
            shrunk,
            Frame::identity(1.0),
            TransformOrigin::Center,
            FinishAction::Keep,
            options,
        )
    }

    /// Slides a panel in from the right edge: translated by its own width and
    /// transparent, ending in place and opaque.
    pub fn slide_in_right(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        key: &K,
        options: TransitionOptions,
    ) -> Batch {
        let width = layout_width(tree, key);
        let offset = Frame {
            translate: Vec2::new(width, 0.0),
            ..Frame::identity(0.0)
        };
        self.play_each(
            tree,
            core::slice::from_ref(key),
            offset,
            Frame::identity(1.0),
            TransformOrigin::TopLeft,
            FinishAction::Keep,
            options,
        )
    }

    /// Slides a panel out to the right: the inverse of
    /// [`TransitionEngine::slide_in_right`], optionally detaching it at the end.
    pub fn slide_out_right(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        key: &K,
        detach: bool,
        options: TransitionOptions,
    ) -> Batch {
        let width = layout_width(tree, key);
        let offset = Frame {
            translate: Vec2::new(width, 0.0),
            ..Frame::identity(0.0)
        };
        let finish = if detach {
            FinishAction::Detach
        } else {
            FinishAction::Keep
        };
        self.play_each(
            tree,
            core::slice::from_ref(key),
            Frame::identity(1.0),
            offset,
            TransformOrigin::TopLeft,
            finish,
            options,
        )
    }

    /// Fades out `removed`, then runs a FLIP pass over `kept` around `mutate`.
    ///
    /// The fade-out detaches the removed elements. The FLIP pass starts on the
    /// first [`TransitionEngine::tick`] after the fade settles, so fade and
    /// reflow never overlap and transforms never compound. With nothing to
    /// remove the FLIP pass starts right away. `options.on_complete` fires when
    /// the reflow settles.
    pub fn animate_filter(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        removed: &[K],
        kept: &[K],
        mutate: impl FnOnce(&mut dyn RenderTree<K>) + 'static,
        options: TransitionOptions,
    ) -> FilterTransition {
        let TransitionOptions {
            duration,
            easing,
            on_complete,
        } = options;
        let reflow = Batch::pending(on_complete);
        let fade = self.fade_out(
            tree,
            removed,
            true,
            TransitionOptions::new(duration).with_easing(easing),
        );

        if fade.is_settled() {
            self.flip_into(tree, kept, mutate, duration, easing, &reflow);
        } else {
            self.chains.push(Chain {
                after: fade.clone(),
                keys: kept.to_vec(),
                mutate: Box::new(mutate),
                duration,
                easing,
                batch: reflow.clone(),
            });
        }
        FilterTransition { fade, reflow }
    }

    /// Cancels the animation running on `key`, snapping the element to the
    /// animation's final target.
    ///
    /// Returns `false` when nothing was running, which makes late cancels
    /// (after natural completion) harmless.
    pub fn cancel(&mut self, tree: &mut dyn RenderTree<K>, key: &K) -> bool {
        match self.running.remove_key(key) {
            Some(animation) => {
                animation.complete(tree.element_mut(key));
                animation.batch.record(Outcome::Canceled);
                true
            }
            None => false,
        }
    }

    /// Cancels everything, including chained passes, whose layout mutations
    /// are applied immediately without animation.
    pub fn cancel_all(&mut self, tree: &mut dyn RenderTree<K>) {
        let ids: Vec<_> = self.running.ids().collect();
        for id in ids {
            if let Some((key, animation)) = self.running.remove(id) {
                animation.complete(tree.element_mut(&key));
                animation.batch.record(Outcome::Canceled);
            }
        }
        for chain in core::mem::take(&mut self.chains) {
            (chain.mutate)(tree);
            chain.batch.arm();
        }
    }

    /// Advances every running animation to `now`.
    ///
    /// Finished animations snap to their target, leave the registry, and
    /// report to their batch. Chained passes whose predecessor has settled are
    /// started afterwards. Returns `true` while more frames are needed.
    pub fn tick(&mut self, now: Duration, tree: &mut dyn RenderTree<K>) -> bool {
        let ids: Vec<_> = self.running.ids().collect();
        for id in ids {
            let Some((key, animation)) = self.running.get_mut_by_id(id) else {
                continue;
            };
            let started = *animation.started_at.get_or_insert(now);
            let progress = if animation.duration.is_zero() {
                1.0
            } else {
                now.saturating_sub(started).as_secs_f64() / animation.duration.as_secs_f64()
            };
            if progress < 1.0 {
                let frame = animation
                    .from
                    .lerp(animation.to, animation.easing.apply(progress));
                if let Some(element) = tree.element_mut(key) {
                    animation.apply(&frame, element);
                }
            } else if let Some((key, animation)) = self.running.remove(id) {
                animation.complete(tree.element_mut(&key));
                animation.batch.record(Outcome::Finished);
            }
        }
        self.run_ready_chains(tree);
        self.is_busy()
    }

    fn run_ready_chains(&mut self, tree: &mut dyn RenderTree<K>) {
        while let Some(pos) = self.chains.iter().position(|c| c.after.is_settled()) {
            let chain = self.chains.remove(pos);
            self.flip_into(
                tree,
                &chain.keys,
                chain.mutate,
                chain.duration,
                chain.easing,
                &chain.batch,
            );
        }
    }

    fn flip_into(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        keys: &[K],
        mutate: impl FnOnce(&mut dyn RenderTree<K>),
        duration: Duration,
        easing: Easing,
        batch: &Batch,
    ) {
        for key in keys {
            self.cancel(tree, key);
        }

        let first: Vec<(K, Geometry)> = keys
            .iter()
            .filter_map(|k| Some((k.clone(), tree.element(k)?.geometry()?)))
            .collect();

        mutate(tree);

        for (key, first) in first {
            let Some(element) = tree.element_mut(&key) else {
                continue;
            };
            let Some(last) = element.geometry() else {
                continue;
            };
            let from = Frame::invert(first, last);
            let to = Frame::identity(last.opacity);
            if self.thresholds.is_negligible(&from, &to) {
                continue;
            }
            let animation = Animation {
                base: last.rect,
                from,
                to,
                origin: TransformOrigin::TopLeft,
                duration,
                easing,
                started_at: None,
                finish: FinishAction::Keep,
                batch: batch.clone(),
            };
            animation.apply(&from, element);
            self.start(key, animation);
        }
        batch.arm();
    }

    fn play_each(
        &mut self,
        tree: &mut dyn RenderTree<K>,
        keys: &[K],
        from: Frame,
        to: Frame,
        origin: TransformOrigin,
        finish: FinishAction,
        options: TransitionOptions,
    ) -> Batch {
        let batch = Batch::pending(options.on_complete);
        for key in keys {
            self.cancel(tree, key);
            let Some(element) = tree.element_mut(key) else {
                continue;
            };
            let Some(geometry) = element.geometry() else {
                continue;
            };
            let animation = Animation {
                base: geometry.rect,
                from,
                to,
                origin,
                duration: options.duration,
                easing: options.easing,
                started_at: None,
                finish,
                batch: batch.clone(),
            };
            animation.apply(&from, element);
            self.start(key.clone(), animation);
        }
        batch.arm();
        batch
    }

    fn start(&mut self, key: K, animation: Animation) {
        animation.batch.track();
        // Only a key listed twice in one call can still be running here.
        if let (_, Some(displaced)) = self.running.insert(key, animation) {
            displaced.batch.record(Outcome::Canceled);
        }
    }
}

fn layout_width<K>(tree: &dyn RenderTree<K>, key: &K) -> f64 {
    tree.element(key)
        .and_then(|element| element.geometry())
        .map_or(0.0, |g| g.rect.width())
}
