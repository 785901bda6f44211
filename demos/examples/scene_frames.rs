// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene frames.
//!
//! Filter a small manifest and print, every few frames, where each element is
//! drawn on screen: the fade-out of excluded items first, then the reflow.
//!
//! Run:
//! - `cargo run -p vitrine_demos --example scene_frames`

use core::time::Duration;

use kurbo::Size;
use vitrine::{Action, Explorer, ExplorerConfig, SceneKey};
use vitrine_demos::{FRAME, init_tracing, sample_explorer};
use vitrine_flip::Renderable;

fn print_scene(explorer: &Explorer, now: Duration) {
    println!("t = {} ms", now.as_millis());
    let viewport = explorer.viewport();
    for id in explorer.items().iter().map(|item| &item.id).take(6) {
        let Some(element) = explorer.scene().get(&SceneKey::Item(id.clone())) else {
            continue;
        };
        match element.geometry() {
            Some(geometry) => {
                let r = viewport.content_to_screen_rect(geometry.rect);
                println!(
                    "  {id}: ({:6.1}, {:6.1}) {:5.1} x {:5.1}  opacity {:.2}",
                    r.x0,
                    r.y0,
                    r.width(),
                    r.height(),
                    geometry.opacity
                );
            }
            None => println!("  {id}: detached"),
        }
    }
}

fn main() {
    init_tracing();
    let mut explorer = sample_explorer(Size::new(640.0, 480.0), ExplorerConfig::default());
    print_scene(&explorer, Duration::ZERO);

    explorer.dispatch(Action::SetAllowed {
        attribute: "network".into(),
        values: vec!["Display".into(), "Video".into()],
    });

    let mut now = Duration::ZERO;
    let mut frame = 0_u32;
    while explorer.dispatch(Action::Tick(now)) {
        if frame % 8 == 0 {
            print_scene(&explorer, now);
        }
        now += FRAME;
        frame += 1;
    }
    print_scene(&explorer, now);
}
