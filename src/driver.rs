//! Animation driver
//!
//! Ties the simulation to the host's frame clock. The host calls
//! [`Backdrop::on_frame`] every display refresh; the simulation only advances
//! once `speed` milliseconds have passed since the last step, so refresh
//! rate and simulation speed stay independent.
//!
//! Lifecycle: `Idle` → `mount` → `Running` → `unmount` → `Stopped`. A
//! stopped backdrop can be mounted again. At most one frame request is
//! outstanding at any time, and frames that arrive while not running are
//! ignored.

use crate::renderer::{RenderParams, Surface, render};
use crate::settings::Settings;
use crate::sim::{Dimensions, SimParams, Simulation, Viewport};
use crate::theme::Theme;

/// Opaque id for a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host frame clock (`requestAnimationFrame` in the browser)
pub trait FrameScheduler {
    /// Ask for one `on_frame` call at the next refresh
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

/// Result of a frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not running; nothing touched and nothing rescheduled
    Ignored,
    /// Too early to step; rescheduled
    Waiting,
    /// Stepped and redrew; rescheduled
    Stepped { generation: u64 },
}

/// Background animation bound to a surface and a frame scheduler
pub struct Backdrop<S: Surface, F: FrameScheduler> {
    settings: Settings,
    viewport: Viewport,
    theme: Theme,
    sim: Simulation,
    surface: Option<S>,
    scheduler: F,
    state: DriverState,
    pending: Option<FrameHandle>,
    last_update: f64,
}

impl<S: Surface, F: FrameScheduler> Backdrop<S, F> {
    /// Simulation seeded from entropy
    pub fn new(settings: Settings, surface: Option<S>, scheduler: F) -> Self {
        let settings = settings.sanitized();
        let viewport = settings.viewport();
        let dims = Dimensions::from_viewport(viewport, settings.cell_size);
        let sim = Simulation::new(dims, SimParams::from(&settings));
        Self::with_simulation(settings, sim, surface, scheduler)
    }

    /// Drive a prepared simulation (fixed seed or hand-built grid)
    pub fn with_simulation(settings: Settings, sim: Simulation, surface: Option<S>, scheduler: F) -> Self {
        let settings = settings.sanitized();
        let viewport = settings.viewport();
        Self {
            settings,
            viewport,
            theme: Theme::Light,
            sim,
            surface,
            scheduler,
            state: DriverState::Idle,
            pending: None,
            last_update: 0.0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn dims(&self) -> Dimensions {
        Dimensions::from_viewport(self.viewport, self.settings.cell_size)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Pending frame request, if any
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn attach_surface(&mut self, mut surface: S) {
        surface.resize(self.viewport.width, self.viewport.height);
        self.surface = Some(surface);
        self.redraw();
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Start the loop at the measured viewport
    pub fn mount(&mut self, viewport: Viewport, theme: Theme) {
        if self.state == DriverState::Running {
            log::warn!("Backdrop already running; ignoring mount");
            return;
        }
        self.theme = theme;
        self.state = DriverState::Running;
        self.apply_viewport(viewport, true);
        self.rearm();
        log::info!(
            "Backdrop mounted at {}x{} px ({} x {} cells)",
            viewport.width,
            viewport.height,
            self.sim.grid().rows(),
            self.sim.grid().cols()
        );
    }

    /// Stop the loop and withdraw the pending frame
    pub fn unmount(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state == DriverState::Running {
            log::info!("Backdrop unmounted at generation {}", self.sim.generation());
        }
        self.state = DriverState::Stopped;
    }

    /// Frame callback; `now` is the host timestamp in milliseconds
    pub fn on_frame(&mut self, now: f64) -> FrameOutcome {
        if self.state != DriverState::Running {
            log::trace!("Dropping frame delivered while {:?}", self.state);
            return FrameOutcome::Ignored;
        }
        // This callback consumed the outstanding request
        self.pending = None;

        let outcome = if now - self.last_update >= self.settings.speed {
            let report = self.sim.step();
            if report.reseeded {
                log::debug!(
                    "Generation {}: injected {} gliders",
                    report.generation,
                    report.injected
                );
            }
            self.redraw();
            self.last_update = now;
            FrameOutcome::Stepped {
                generation: report.generation,
            }
        } else {
            FrameOutcome::Waiting
        };

        self.pending = Some(self.scheduler.request_frame());
        outcome
    }

    /// New viewport size. Different grid dimensions restart the simulation;
    /// either way the surface is resized and redrawn immediately.
    pub fn resize(&mut self, viewport: Viewport) {
        self.apply_viewport(viewport, false);
        if self.state == DriverState::Running {
            self.rearm();
        }
    }

    /// Switch palette and redraw without advancing the simulation
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.redraw();
        if self.state == DriverState::Running {
            self.rearm();
        }
    }

    /// Draw the current grid; no-op without a surface
    pub fn redraw(&mut self) -> usize {
        let params = self.render_params();
        match self.surface.as_mut() {
            Some(surface) => render(self.sim.grid(), &params, surface),
            None => {
                log::trace!("No surface attached; skipping draw");
                0
            }
        }
    }

    fn render_params(&self) -> RenderParams {
        RenderParams {
            width: self.viewport.width,
            height: self.viewport.height,
            cell_size: self.settings.cell_size,
            opacity: self.settings.opacity,
            theme: self.theme,
        }
    }

    fn apply_viewport(&mut self, viewport: Viewport, force_restart: bool) {
        let old_dims = self.dims();
        self.viewport = viewport;
        let dims = self.dims();
        if force_restart || dims != old_dims {
            self.sim.restart(dims);
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport.width, viewport.height);
        }
        self.redraw();
    }

    /// Replace any outstanding frame request with a fresh one
    fn rearm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.pending = Some(self.scheduler.request_frame());
    }
}

impl<S: Surface, F: FrameScheduler> Drop for Backdrop<S, F> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Scheduler driven by hand; used natively and in tests
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet fired or cancelled
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// Take the oldest pending request, as if the host fired it
    pub fn fire(&mut self) -> Option<FrameHandle> {
        (!self.pending.is_empty()).then(|| self.pending.remove(0))
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(pos) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(pos);
            self.cancelled += 1;
        }
    }
}

/// Run `frames` refreshes `frame_ms` apart on a manually scheduled backdrop
pub fn run_frames<S: Surface>(
    backdrop: &mut Backdrop<S, ManualScheduler>,
    start: f64,
    frame_ms: f64,
    frames: usize,
) -> usize {
    let mut stepped = 0;
    for i in 0..frames {
        if backdrop.scheduler_mut().fire().is_none() {
            break;
        }
        let now = start + i as f64 * frame_ms;
        if let FrameOutcome::Stepped { .. } = backdrop.on_frame(now) {
            stepped += 1;
        }
    }
    stepped
}
