// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `TransitionEngine` driven against a headless render tree.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use kurbo::{Affine, Rect};
use vitrine_flip::{
    BatchReport, Easing, FADE_SCALE, HeadlessTree, RenderTree, Renderable, TransitionEngine,
    TransitionOptions,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn options() -> TransitionOptions {
    TransitionOptions::new(ms(100)).with_easing(Easing::Linear)
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce(BatchReport) + 'static) {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    (calls, move |_| seen.set(seen.get() + 1))
}

fn cell(i: u32) -> Rect {
    let x = f64::from(i) * 10.0;
    Rect::new(x, 0.0, x + 10.0, 10.0)
}

fn row_tree(n: u32) -> HeadlessTree<u32> {
    let mut tree = HeadlessTree::new();
    for i in 0..n {
        tree.insert(i, cell(i));
    }
    tree
}

/// A layout mutation that moves each listed key to a new box.
fn relayout(moves: Vec<(u32, Rect)>) -> impl FnOnce(&mut dyn RenderTree<u32>) + 'static {
    move |tree| {
        for (key, layout) in moves {
            if let Some(el) = tree.element_mut(&key) {
                el.set_layout(layout);
            }
        }
    }
}

fn visual(tree: &HeadlessTree<u32>, key: u32) -> Rect {
    tree.get(&key).unwrap().geometry().unwrap().rect
}

fn assert_rect_near(actual: Rect, expected: Rect) {
    let close = |a: f64, b: f64| (a - b).abs() < 1e-6;
    assert!(
        close(actual.x0, expected.x0)
            && close(actual.y0, expected.y0)
            && close(actual.x1, expected.x1)
            && close(actual.y1, expected.y1),
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn unchanged_layout_starts_nothing_and_still_completes() {
    let mut tree = row_tree(3);
    let mut engine = TransitionEngine::new();
    let (calls, on_complete) = counter();

    let batch = engine.animate(
        &mut tree,
        &[0, 1, 2],
        |_| {},
        options().on_complete(on_complete),
    );

    assert_eq!(engine.running_count(), 0);
    assert!(!engine.is_busy());
    assert!(batch.is_settled());
    assert_eq!(batch.report().unwrap().started, 0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn subpixel_moves_are_skipped() {
    let mut tree = row_tree(2);
    let mut engine = TransitionEngine::new();
    let batch = engine.animate(
        &mut tree,
        &[0, 1],
        relayout(vec![
            (0, cell(0) + kurbo::Vec2::new(0.5, 0.0)),
            (1, cell(1) + kurbo::Vec2::new(40.0, 0.0)),
        ]),
        options(),
    );
    assert_eq!(engine.running_count(), 1);
    assert!(engine.is_running(&1));
    assert!(!engine.is_running(&0));
    assert_eq!(batch.pending_count(), 1);
}

#[test]
fn flip_inverts_then_plays_to_identity() {
    let mut tree = row_tree(1);
    let mut engine = TransitionEngine::new();
    let (calls, on_complete) = counter();

    let batch = engine.animate(
        &mut tree,
        &[0],
        relayout(vec![(0, Rect::new(100.0, 0.0, 120.0, 20.0))]),
        options().on_complete(on_complete),
    );

    assert_eq!(engine.running_count(), 1);
    assert!(!batch.is_settled());
    // Inverted: the new layout is still drawn at the old position.
    assert_rect_near(visual(&tree, 0), cell(0));

    // The first tick starts the clock without moving anything.
    assert!(engine.tick(ms(1_000), &mut tree));
    assert_rect_near(visual(&tree, 0), cell(0));

    engine.tick(ms(1_050), &mut tree);
    assert_rect_near(visual(&tree, 0), Rect::new(50.0, 0.0, 65.0, 15.0));

    assert!(!engine.tick(ms(1_100), &mut tree));
    assert_rect_near(visual(&tree, 0), Rect::new(100.0, 0.0, 120.0, 20.0));
    assert_eq!(tree.get(&0).unwrap().transform(), Affine::IDENTITY);
    assert!(batch.is_settled());
    let report = batch.report().unwrap();
    assert_eq!((report.started, report.finished, report.canceled), (1, 1, 0));
    assert_eq!(calls.get(), 1);
}

#[test]
fn second_animation_replaces_the_first() {
    let mut tree = row_tree(1);
    let mut engine = TransitionEngine::new();

    let first = engine.animate(
        &mut tree,
        &[0],
        relayout(vec![(0, Rect::new(100.0, 0.0, 110.0, 10.0))]),
        options(),
    );
    engine.tick(ms(0), &mut tree);
    engine.tick(ms(50), &mut tree);

    let second = engine.animate(
        &mut tree,
        &[0],
        relayout(vec![(0, Rect::new(200.0, 0.0, 210.0, 10.0))]),
        options(),
    );

    assert_eq!(engine.running_count(), 1);
    let report = first.report().unwrap();
    assert_eq!((report.finished, report.canceled), (0, 1));
    assert!(!second.is_settled());
    // The second pass starts from the first pass's target, not mid-flight.
    assert_rect_near(visual(&tree, 0), Rect::new(100.0, 0.0, 110.0, 10.0));
}

#[test]
fn cancel_snaps_to_target_and_is_idempotent() {
    let mut tree = row_tree(1);
    let mut engine = TransitionEngine::new();
    let (calls, on_complete) = counter();

    let batch = engine.animate(
        &mut tree,
        &[0],
        relayout(vec![(0, Rect::new(100.0, 0.0, 110.0, 10.0))]),
        options().on_complete(on_complete),
    );
    engine.tick(ms(0), &mut tree);
    engine.tick(ms(30), &mut tree);

    assert!(engine.cancel(&mut tree, &0));
    assert!(!engine.cancel(&mut tree, &0));
    assert_rect_near(visual(&tree, 0), Rect::new(100.0, 0.0, 110.0, 10.0));
    assert_eq!(batch.report().unwrap().canceled, 1);
    assert_eq!(calls.get(), 1);

    // Ticking after cancellation changes nothing.
    assert!(!engine.tick(ms(60), &mut tree));
    assert_eq!(calls.get(), 1);
}

#[test]
fn cancel_after_completion_is_harmless() {
    let mut tree = row_tree(1);
    let mut engine = TransitionEngine::new();
    engine.fade_in(&mut tree, &[0], options());
    engine.tick(ms(0), &mut tree);
    engine.tick(ms(200), &mut tree);
    assert!(!engine.cancel(&mut tree, &0));
    assert_eq!(tree.get(&0).unwrap().opacity(), 1.0);
}

#[test]
fn fade_out_shrinks_in_place_and_detaches() {
    let mut tree = row_tree(2);
    let mut engine = TransitionEngine::new();
    let batch = engine.fade_out(&mut tree, &[0], true, options());

    assert_eq!(tree.get(&0).unwrap().opacity(), 1.0);
    engine.tick(ms(0), &mut tree);
    engine.tick(ms(50), &mut tree);
    let el = tree.get(&0).unwrap();
    assert!((el.opacity() - 0.5).abs() < 1e-9);
    let rect = visual(&tree, 0);
    assert!(rect.width() < 10.0 && rect.width() > 10.0 * FADE_SCALE);
    assert!((rect.center() - cell(0).center()).hypot() < 1e-9);

    engine.tick(ms(100), &mut tree);
    assert!(!tree.get(&0).unwrap().is_attached());
    assert!(tree.get(&1).unwrap().is_attached());
    assert_eq!(batch.report().unwrap().finished, 1);
}

#[test]
fn fade_skips_detached_elements() {
    let mut tree = row_tree(2);
    tree.get_mut(&1).unwrap().detach();
    let mut engine = TransitionEngine::new();
    let batch = engine.fade_in(&mut tree, &[0, 1, 7], options());
    assert_eq!(batch.report(), None);
    assert_eq!(batch.pending_count(), 1);
    assert!(engine.is_running(&0));
}

#[test]
fn slide_in_starts_one_width_to_the_right() {
    let mut tree = HeadlessTree::new();
    tree.insert(9_u32, Rect::new(600.0, 0.0, 800.0, 400.0));
    let mut engine = TransitionEngine::new();
    engine.slide_in_right(&mut tree, &9, options());

    assert_rect_near(visual(&tree, 9), Rect::new(800.0, 0.0, 1000.0, 400.0));
    assert_eq!(tree.get(&9).unwrap().opacity(), 0.0);
    engine.tick(ms(0), &mut tree);
    engine.tick(ms(100), &mut tree);
    assert_rect_near(visual(&tree, 9), Rect::new(600.0, 0.0, 800.0, 400.0));
    assert_eq!(tree.get(&9).unwrap().opacity(), 1.0);

    engine.slide_out_right(&mut tree, &9, true, options());
    engine.tick(ms(200), &mut tree);
    engine.tick(ms(300), &mut tree);
    assert!(!tree.get(&9).unwrap().is_attached());
}

#[test]
fn filter_fades_removed_then_reflows_kept() {
    let mut tree = row_tree(20);
    let mut engine = TransitionEngine::new();
    let (calls, on_complete) = counter();

    let removed: Vec<u32> = vec![0, 4, 8, 12, 16];
    let kept: Vec<u32> = (0..20).filter(|k| !removed.contains(k)).collect();
    let moves: Vec<(u32, Rect)> = kept
        .iter()
        .enumerate()
        .map(|(slot, &key)| (key, cell(u32::try_from(slot).unwrap())))
        .collect();

    let transition = engine.animate_filter(
        &mut tree,
        &removed,
        &kept,
        relayout(moves),
        options().on_complete(on_complete),
    );

    // Only the removed elements fade; the reflow waits.
    let mut fading: Vec<u32> = engine.running_keys().copied().collect();
    fading.sort_unstable();
    assert_eq!(fading, removed);
    assert_eq!(tree.get(&1).unwrap().layout(), cell(1));
    assert!(engine.is_busy());

    engine.tick(ms(0), &mut tree);
    engine.tick(ms(100), &mut tree);
    assert!(transition.fade.is_settled());
    assert!(!transition.reflow.is_settled());

    // The reflow started once the fade settled: kept elements that moved are
    // now running, drawn at their old slot.
    assert!(engine.is_running(&1));
    assert!(!engine.is_running(&0));
    assert_eq!(tree.get(&1).unwrap().layout(), cell(0));
    assert_rect_near(visual(&tree, 1), cell(1));

    engine.tick(ms(200), &mut tree);
    engine.tick(ms(300), &mut tree);
    assert!(transition.reflow.is_settled());
    assert_eq!(calls.get(), 1);

    let attached = tree.iter().filter(|(_, el)| el.is_attached()).count();
    assert_eq!(attached, 15);
    for (slot, key) in kept.iter().enumerate() {
        assert_rect_near(visual(&tree, *key), cell(u32::try_from(slot).unwrap()));
    }
}

#[test]
fn filter_with_nothing_removed_reflows_immediately() {
    let mut tree = row_tree(2);
    let mut engine = TransitionEngine::new();
    let transition = engine.animate_filter(
        &mut tree,
        &[],
        &[0, 1],
        relayout(vec![(0, cell(1)), (1, cell(0))]),
        options(),
    );
    assert!(transition.fade.is_settled());
    assert_eq!(engine.running_count(), 2);
}

#[test]
fn cancel_all_flushes_pending_reflow() {
    let mut tree = row_tree(3);
    let mut engine = TransitionEngine::new();
    let (calls, on_complete) = counter();

    let transition = engine.animate_filter(
        &mut tree,
        &[0],
        &[1, 2],
        relayout(vec![(1, cell(0)), (2, cell(1))]),
        options().on_complete(on_complete),
    );
    engine.tick(ms(0), &mut tree);
    engine.cancel_all(&mut tree);

    assert!(!engine.is_busy());
    assert!(transition.fade.is_settled());
    assert!(transition.reflow.is_settled());
    assert_eq!(calls.get(), 1);
    assert!(!tree.get(&0).unwrap().is_attached());
    assert_rect_near(visual(&tree, 1), cell(0));
    assert_rect_near(visual(&tree, 2), cell(1));
}

#[test]
fn batch_future_resolves_after_settling() {
    let mut tree = row_tree(1);
    let mut engine = TransitionEngine::new();
    let mut batch = engine.fade_out(&mut tree, &[0], false, options());

    let mut cx = Context::from_waker(Waker::noop());
    assert!(Pin::new(&mut batch).poll(&mut cx).is_pending());
    engine.tick(ms(0), &mut tree);
    engine.tick(ms(100), &mut tree);
    match Pin::new(&mut batch).poll(&mut cx) {
        Poll::Ready(report) => assert_eq!(report.finished, 1),
        Poll::Pending => panic!("batch should have settled"),
    }
}
