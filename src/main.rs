//! Life Backdrop entry point
//!
//! On the web this auto-mounts onto `#life-backdrop` when the page has one.
//! Natively it runs the same driver headless and prints the final grid.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Canvas id picked up automatically at startup
#[cfg(target_arch = "wasm32")]
const AUTO_MOUNT_ID: &str = "life-backdrop";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    life_backdrop::platform::init();
    log::info!("Life backdrop starting...");

    let has_canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(AUTO_MOUNT_ID))
        .is_some();
    if !has_canvas {
        log::info!("No #{} canvas; waiting for an explicit mount()", AUTO_MOUNT_ID);
        return;
    }

    match life_backdrop::platform::mount(AUTO_MOUNT_ID, None) {
        // Lives as long as the page
        Ok(handle) => std::mem::forget(handle),
        Err(e) => log::error!("Backdrop mount failed: {:?}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use life_backdrop::driver::run_frames;
    use life_backdrop::renderer::CommandBuffer;
    use life_backdrop::sim::Viewport;
    use life_backdrop::{Backdrop, ManualScheduler, SeedStyle, Settings, Theme};

    env_logger::init();
    log::info!("Life backdrop (native) starting...");
    log::info!("Browser mode needs a wasm32 build - run with `trunk serve` for the web version");

    let mut settings = Settings {
        speed: 50.0,
        ..Settings::load()
    };
    if let Some(arg) = std::env::args().nth(1) {
        match SeedStyle::from_str(&arg) {
            Some(style) => settings.seed_style = style,
            None => log::warn!("Unknown seed style '{}', using {}", arg, settings.seed_style.as_str()),
        }
    }
    let viewport = Viewport::new(640, 320);
    let mut backdrop = Backdrop::new(settings, Some(CommandBuffer::new()), ManualScheduler::new());
    backdrop.mount(viewport, Theme::Light);

    // Ten seconds of 60 Hz frames
    let frame_ms = 1000.0 / 60.0;
    for second in 0..10 {
        let start = 1000.0 + second as f64 * 1000.0;
        run_frames(&mut backdrop, start, frame_ms, 60);
        let sim = backdrop.simulation();
        log::info!(
            "t={}s generation={} live={}",
            second + 1,
            sim.generation(),
            sim.grid().live_count()
        );
        if let Some(surface) = backdrop.surface_mut() {
            surface.clear_log();
        }
    }

    let grid = backdrop.simulation().grid();
    for row in 0..grid.rows() {
        let line: String = (0..grid.cols())
            .map(|col| if grid.get(row, col) { '#' } else { '.' })
            .collect();
        println!("{}", line);
    }

    backdrop.unmount();
}
