// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explorer walkthrough.
//!
//! Drive a headless explorer through filtering, sorting, grouping, zooming and
//! the detail panel, printing the state after every step. Pass a JSON
//! configuration file to override the defaults.
//!
//! Run:
//! - `cargo run -p vitrine_demos --example walkthrough`
//! - `RUST_LOG=vitrine=trace cargo run -p vitrine_demos --example walkthrough -- config.json`

use core::time::Duration;

use kurbo::{Point, Size};
use vitrine::{Action, ExplorerConfig, LayoutMode};
use vitrine_demos::{describe, init_tracing, run_until_settled, sample_explorer};
use vitrine_facets::SortSpec;

fn load_config() -> ExplorerConfig {
    let Some(path) = std::env::args().nth(1) else {
        return ExplorerConfig::default();
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| ExplorerConfig::from_json_str(&json).map_err(|err| err.to_string()));
    match parsed {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(path = %path, error = %error, "ignoring configuration");
            ExplorerConfig::default()
        }
    }
}

fn main() {
    init_tracing();
    let mut explorer = sample_explorer(Size::new(1280.0, 800.0), load_config());
    let mut now = Duration::ZERO;
    println!("start: {}", describe(&explorer));

    for value in explorer
        .facet_counts("vertical")
        .iter()
        .map(|facet| format!("{} ({})", facet.value, facet.count))
    {
        println!("  vertical: {value}");
    }

    let steps = [
        (
            "only Auto",
            Action::ToggleFilter {
                attribute: "vertical".into(),
                value: "Auto".into(),
            },
        ),
        (
            "Auto or Travel",
            Action::ToggleFilter {
                attribute: "vertical".into(),
                value: "Travel".into(),
            },
        ),
        (
            "by CTR, best first",
            Action::SetSort(Some(SortSpec::descending("ctr"))),
        ),
        ("clear filters", Action::ClearFilters),
        ("group by network", Action::SetGroup(Some("network".into()))),
        ("grouped layout", Action::SetLayoutMode(LayoutMode::Grouped)),
        ("deep zoom", Action::SetLayoutMode(LayoutMode::DeepZoom)),
        ("zoom in", Action::ZoomIn),
        ("zoom in", Action::ZoomIn),
        ("fit", Action::FitToViewport),
        ("narrow window", Action::Resize(Size::new(900.0, 700.0))),
    ];
    for (label, action) in steps {
        explorer.dispatch(action);
        let (settled_at, frames) = run_until_settled(&mut explorer, now);
        now = settled_at;
        println!("{label}: {} ({frames} frames)", describe(&explorer));
    }

    let center = Point::new(450.0, 350.0);
    match explorer.click(center).map(|item| item.id.clone()) {
        Some(id) => {
            println!("clicked {id}, media {:?}", explorer.media_state(&id));
            let (settled_at, frames) = run_until_settled(&mut explorer, now);
            now = settled_at;
            println!("detail panel open after {frames} frames");
            explorer.dispatch(Action::CloseDetail);
            let (_, frames) = run_until_settled(&mut explorer, now);
            println!("detail panel closed after {frames} frames");
        }
        None => println!("nothing under {center:?}"),
    }

    match serde_json::to_string(&explorer.stats()) {
        Ok(json) => println!("stats: {json}"),
        Err(err) => tracing::error!(error = %err, "stats did not serialize"),
    }
}
