// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Vitrine demos.

use core::time::Duration;

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use vitrine::{Action, Explorer, ExplorerConfig};

/// A small advertisement manifest bundled with the demos.
pub const SAMPLE_MANIFEST: &str = include_str!("../data/ads.json");

/// Host frame interval.
pub const FRAME: Duration = Duration::from_millis(16);

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `vitrine=debug`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vitrine=debug,vitrine_facets=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Builds an explorer over [`SAMPLE_MANIFEST`].
pub fn sample_explorer(container: Size, config: ExplorerConfig) -> Explorer {
    Explorer::from_manifest_json(SAMPLE_MANIFEST, container, config)
}

/// Sends ticks from `now` until the explorer settles.
///
/// Returns the host time after the last tick and the number of frames drawn.
pub fn run_until_settled(explorer: &mut Explorer, mut now: Duration) -> (Duration, usize) {
    let mut frames = 0;
    while explorer.dispatch(Action::Tick(now)) {
        now += FRAME;
        frames += 1;
    }
    (now + FRAME, frames)
}

/// One-line summary of the explorer state.
pub fn describe(explorer: &Explorer) -> String {
    let stats = explorer.stats();
    let mode = explorer
        .arrangement()
        .map_or("empty".to_owned(), |a| format!("{:?}", a.mode));
    format!(
        "{}/{} visible, {} groups, {mode}, zoom {:.0}%",
        stats.visible,
        stats.total,
        stats.groups,
        explorer.zoom_percent()
    )
}
