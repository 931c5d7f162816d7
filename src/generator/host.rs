//! Pattern runs: sizing, budgeting and the self-rescheduling draw loop
//!
//! A [`PatternHost`] owns the surface and every run painting on it. Each run
//! suspends twice per shape: once for frame alignment and once for a short
//! pacing delay, then draws a single shape and reschedules itself until its
//! budget is exceeded.
//!
//! Runs carry the generation token that was current when they started. Under
//! [`OverlapPolicy::Supersede`] starting a run bumps the token and cancels the
//! pending callbacks of older runs, so only the newest run keeps painting.
//! [`OverlapPolicy::Layered`] lets older runs carry on and paint over the
//! newer ones.

use crate::generator::shape::draw_shape;
use crate::io::configuration::{
    BACKGROUND_COLOR, BUDGET_MAX, BUDGET_MIN, DEFAULT_SCROLL_HEIGHT, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH, PACING_DELAY,
};
use crate::io::error::Result;
use crate::io::visualization::FrameCapture;
use crate::math::random::random_int;
use crate::render::{Palette, Surface};
use crate::scheduling::{EventLoop, TaskHandle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Dimensions the host reads when sizing the surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Visible width in pixels
    pub width: u32,
    /// Visible height in pixels
    pub height: u32,
    /// Full scrollable document height in pixels
    pub scroll_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            scroll_height: DEFAULT_SCROLL_HEIGHT,
        }
    }
}

/// Why a run was started
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunTrigger {
    /// First paint: height follows the scrollable document
    #[default]
    Initial,
    /// Regeneration after a resize: height is left as it is
    Resize,
}

/// What happens to runs still drawing when a new one starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// The new run stops every older run
    #[default]
    Supersede,
    /// Older runs keep drawing on the shared surface
    Layered,
}

/// Identifies one run on a host
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// How a run ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Drew past its budget and stopped on its own
    Completed,
    /// Stopped because a newer run started
    Superseded,
    /// Stopped because the surface rejected a draw
    Failed {
        /// Rendered error message
        reason: String,
    },
    /// Stopped by host teardown
    TornDown,
}

/// Final record of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// The run
    pub run: RunId,
    /// What started it
    pub trigger: RunTrigger,
    /// Shape budget `N`
    pub budget: usize,
    /// Shapes actually drawn
    pub drawn: usize,
    /// How it ended
    pub outcome: RunOutcome,
}

/// Record of one drawn shape
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeEvent {
    /// Run that drew the shape
    pub run: RunId,
    /// Position of the shape within its run, from zero
    pub index: usize,
    /// Virtual time of the draw
    pub at: Duration,
    /// Palette index used for the fill
    pub color_index: usize,
}

#[derive(Debug)]
struct ActiveRun {
    token: u64,
    trigger: RunTrigger,
    budget: usize,
    drawn: usize,
    palette: Palette,
    debug_overlay: bool,
    pending: Option<TaskHandle>,
}

/// Owner of a drawing surface and of the runs painting on it
#[derive(Debug)]
pub struct PatternHost<S: Surface> {
    surface: S,
    viewport: Viewport,
    rng: StdRng,
    policy: OverlapPolicy,
    generation: u64,
    next_run: u64,
    active: BTreeMap<RunId, ActiveRun>,
    events: Vec<ShapeEvent>,
    summaries: Vec<RunSummary>,
    capture: Option<FrameCapture>,
}

impl<S: Surface + 'static> PatternHost<S> {
    /// Create a host drawing on `surface` with a seeded generator
    pub fn new(surface: S, viewport: Viewport, seed: u64) -> Self {
        Self {
            surface,
            viewport,
            rng: StdRng::seed_from_u64(seed),
            policy: OverlapPolicy::default(),
            generation: 0,
            next_run: 1,
            active: BTreeMap::new(),
            events: Vec::new(),
            summaries: Vec::new(),
            capture: None,
        }
    }

    /// Choose how overlapping runs interact
    #[must_use]
    pub fn with_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Snapshot the surface after every shape
    pub fn enable_capture(&mut self, max_edge: u32) {
        self.capture = Some(FrameCapture::new(max_edge));
    }

    /// Start a run painting a fresh pattern
    ///
    /// Sizes the surface (width from the viewport; height from the scroll
    /// height on an initial run, unchanged on a resize run), paints the white
    /// background, picks a budget `N` in `[20, 100]` and schedules the first
    /// shape. The run draws `N + 1` shapes unless stopped earlier.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be resized or painted
    #[tracing::instrument(skip(self, event_loop, palette), fields(colors = palette.len()))]
    pub fn generate_pattern(
        &mut self,
        event_loop: &mut EventLoop<Self>,
        palette: Palette,
        trigger: RunTrigger,
        debug_overlay: bool,
    ) -> Result<RunId> {
        if self.policy == OverlapPolicy::Supersede {
            self.stop_all(event_loop, &RunOutcome::Superseded);
        }
        self.generation += 1;

        let height = match trigger {
            RunTrigger::Initial => self.viewport.scroll_height,
            RunTrigger::Resize => self.surface.height(),
        };
        self.surface.resize(self.viewport.width, height)?;
        self.surface.fill_background(BACKGROUND_COLOR)?;

        let budget = random_int(&mut self.rng, BUDGET_MIN as f64, BUDGET_MAX as f64) as usize;
        let run = RunId(self.next_run);
        self.next_run += 1;

        self.active.insert(
            run,
            ActiveRun {
                token: self.generation,
                trigger,
                budget,
                drawn: 0,
                palette,
                debug_overlay,
                pending: None,
            },
        );
        info!(
            %run,
            budget,
            width = self.surface.width(),
            height = self.surface.height(),
            "pattern run started"
        );

        self.schedule_step(run, event_loop);
        Ok(run)
    }

    /// Cancel every pending callback of every run
    pub fn teardown(&mut self, event_loop: &mut EventLoop<Self>) {
        self.stop_all(event_loop, &RunOutcome::TornDown);
    }

    /// Replace the viewport read by the next run
    pub const fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current viewport
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The surface being painted
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the host and return its surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Every shape drawn so far, across runs
    pub fn events(&self) -> &[ShapeEvent] {
        &self.events
    }

    /// Runs that have ended, in the order they ended
    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    /// Runs still scheduled to draw
    pub fn active_runs(&self) -> Vec<RunId> {
        self.active.keys().copied().collect()
    }

    /// Budget of a run still drawing
    pub fn budget_of(&self, run: RunId) -> Option<usize> {
        self.active.get(&run).map(|state| state.budget)
    }

    /// Shapes drawn by a run, whether it is active or finished
    pub fn drawn_by(&self, run: RunId) -> usize {
        self.events.iter().filter(|e| e.run == run).count()
    }

    /// True when no run is drawing
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Captured frames, when capture is enabled
    pub const fn capture(&self) -> Option<&FrameCapture> {
        self.capture.as_ref()
    }

    /// Take the captured frames out of the host
    pub const fn take_capture(&mut self) -> Option<FrameCapture> {
        self.capture.take()
    }

    fn schedule_step(&mut self, run: RunId, event_loop: &mut EventLoop<Self>) {
        let frame = event_loop.request_frame(move |host: &mut Self, event_loop| {
            let timer = event_loop.set_timeout(PACING_DELAY, move |host: &mut Self, event_loop| {
                host.step(run, event_loop);
            });
            host.track(run, Some(timer));
        });
        self.track(run, Some(frame));
    }

    fn track(&mut self, run: RunId, handle: Option<TaskHandle>) {
        if let Some(state) = self.active.get_mut(&run) {
            state.pending = handle;
        }
    }

    fn is_current(&self, token: u64) -> bool {
        match self.policy {
            OverlapPolicy::Supersede => token == self.generation,
            OverlapPolicy::Layered => true,
        }
    }

    fn step(&mut self, run: RunId, event_loop: &mut EventLoop<Self>) {
        let Some(token) = self.active.get(&run).map(|state| state.token) else {
            return;
        };
        self.track(run, None);

        if !self.is_current(token) {
            self.finish(run, RunOutcome::Superseded, event_loop);
            return;
        }

        let Self {
            surface,
            rng,
            active,
            events,
            capture,
            ..
        } = self;
        let Some(state) = active.get_mut(&run) else {
            return;
        };

        let painted = match draw_shape(rng, &state.palette, surface, state.debug_overlay) {
            Ok(painted) => painted,
            Err(error) => {
                warn!(%run, %error, "shape draw failed, stopping run");
                let reason = error.to_string();
                self.finish(run, RunOutcome::Failed { reason }, event_loop);
                return;
            }
        };

        let at = event_loop.now();
        events.push(ShapeEvent {
            run,
            index: state.drawn,
            at,
            color_index: painted.color_index,
        });
        if let Some(capture) = capture.as_mut()
            && let Some(image) = surface.image()
        {
            capture.record(at, image);
        }
        debug!(
            %run,
            index = state.drawn,
            points = painted.blob.points.len(),
            radius = painted.blob.spec.radius,
            "shape drawn"
        );

        state.drawn += 1;
        if state.drawn > state.budget {
            self.finish(run, RunOutcome::Completed, event_loop);
        } else {
            self.schedule_step(run, event_loop);
        }
    }

    fn stop_all(&mut self, event_loop: &mut EventLoop<Self>, outcome: &RunOutcome) {
        let runs: Vec<RunId> = self.active.keys().copied().collect();
        for run in runs {
            self.finish(run, outcome.clone(), event_loop);
        }
    }

    fn finish(&mut self, run: RunId, outcome: RunOutcome, event_loop: &mut EventLoop<Self>) {
        let Some(state) = self.active.remove(&run) else {
            return;
        };
        if let Some(handle) = state.pending {
            event_loop.cancel(handle);
        }

        info!(
            %run,
            budget = state.budget,
            drawn = state.drawn,
            outcome = ?outcome,
            "pattern run ended"
        );
        self.summaries.push(RunSummary {
            run,
            trigger: state.trigger,
            budget: state.budget,
            drawn: state.drawn,
            outcome,
        });
    }
}
