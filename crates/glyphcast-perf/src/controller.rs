#![forbid(unsafe_code)]

//! The adaptive frame-performance controller.
//!
//! # Per-frame sequence
//!
//! Each [`step`] performs, in order:
//!
//! 1. Drain previously queued timer queries (non-blocking poll).
//! 2. If the source has presentable data, size the texture and upload the
//!    current frame.
//! 3. Begin a timer query (when the capability exists).
//! 4. Invoke the draw callback.
//! 5. End the query and park it in the pending collection; its result is
//!    never read synchronously.
//! 6. Every `adapt_every` frames, if a fresh GPU sample has landed since the
//!    last decision, propose a sampling change and write it to the store
//!    when it differs.
//! 7. Reschedule the next frame while playing.
//!
//! # Adaptation rule
//!
//! With `budget_ms = 1000 / target_fps` and `t` the last measured GPU time:
//!
//! ```text
//! t > budget_ms            →  sample + 1   (capped at max_sample)
//! t < 0.6 × budget_ms      →  sample − 1   (only while sample > MIN_SAMPLE)
//! otherwise                →  unchanged
//! ```
//!
//! Each decision consumes the freshness flag whether or not a write happens,
//! so one measurement feeds at most one decision.
//!
//! [`step`]: FrameController::step

use std::collections::VecDeque;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::context::GraphicsContext;
use crate::sched::{AnimationScheduler, ScheduleStrategy, ScheduledFrame};
use crate::source::{FrameMetadata, FrameSource, HAVE_CURRENT_DATA};
use crate::store::StateStore;

/// Lowest sampling value the controller will propose.
pub const MIN_SAMPLE: i32 = 2;

/// Fraction of the frame budget below which sampling is relaxed.
const RELAX_FACTOR: f64 = 0.6;

/// Draw callback invoked once per frame with the host timestamp and frame
/// metadata. The rendering collaborator owns what happens inside.
pub type DrawFn = Box<dyn FnMut(f64, &FrameMetadata)>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Controller tuning knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Target frame rate the budget is derived from. Default 30.
    pub target_fps: f64,
    /// Frames between adaptation checks; 0 disables adaptation. Default 5.
    pub adapt_every: u32,
    /// Upper clamp for the proposed sampling value. Default 36.
    pub max_sample: i32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            target_fps: 30.0,
            adapt_every: 5,
            max_sample: 36,
        }
    }
}

impl ControllerConfig {
    /// Frame budget in milliseconds.
    #[inline]
    pub fn budget_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drives the frame loop and throttles the sampling parameter based on
/// measured GPU time.
///
/// Owns its collaborators for the lifetime of a playback session. The host
/// calls [`play`](Self::play) / [`pause`](Self::pause) and invokes
/// [`step`](Self::step) whenever a callback it scheduled through the source
/// or the animation scheduler fires.
pub struct FrameController<G, F, A, S>
where
    G: GraphicsContext<F>,
    F: FrameSource,
    A: AnimationScheduler,
    S: StateStore,
{
    gl: G,
    video: F,
    raf: A,
    store: S,
    draw: DrawFn,
    config: ControllerConfig,
    strategy: ScheduleStrategy,
    texture: G::TextureId,
    /// Dimensions of the currently allocated texture storage, if any.
    allocated: Option<(u32, u32)>,
    /// Queries issued but not yet drained, oldest first.
    pending: VecDeque<G::QueryId>,
    playing: bool,
    scheduled: Option<ScheduledFrame>,
    frame_count: u64,
    last_gpu_ms: f64,
    /// Whether a usable measurement landed since the last adaptation.
    fresh_sample: bool,
}

impl<G, F, A, S> FrameController<G, F, A, S>
where
    G: GraphicsContext<F>,
    F: FrameSource,
    A: AnimationScheduler,
    S: StateStore,
{
    /// Create a controller with a no-op draw callback.
    ///
    /// Allocates the frame texture and caches the scheduling strategy from
    /// the source's frame-callback capability. A non-finite or non-positive
    /// `target_fps` falls back to the default.
    pub fn new(mut gl: G, video: F, raf: A, store: S, mut config: ControllerConfig) -> Self {
        if !(config.target_fps.is_finite() && config.target_fps > 0.0) {
            config.target_fps = ControllerConfig::default().target_fps;
        }
        let texture = gl.create_frame_texture();
        let strategy = if video.supports_frame_callbacks() {
            ScheduleStrategy::VideoFrame
        } else {
            ScheduleStrategy::AnimationFrame
        };
        Self {
            gl,
            video,
            raf,
            store,
            draw: Box::new(|_, _| {}),
            config,
            strategy,
            texture,
            allocated: None,
            pending: VecDeque::new(),
            playing: false,
            scheduled: None,
            frame_count: 0,
            last_gpu_ms: 0.0,
            fresh_sample: false,
        }
    }

    /// Replace the draw callback.
    #[must_use]
    pub fn with_draw(mut self, draw: DrawFn) -> Self {
        self.draw = draw;
        self
    }

    /// Match texture storage to the source's current frame size.
    ///
    /// No-op while dimensions are unknown (zero). Reallocates at most once
    /// per distinct size, not once per frame.
    pub fn ensure_texture(&mut self) {
        let size = (self.video.frame_width(), self.video.frame_height());
        if size.0 == 0 || size.1 == 0 {
            return;
        }
        if self.allocated != Some(size) {
            self.gl.allocate_texture(self.texture, size.0, size.1);
            self.allocated = Some(size);
        }
    }

    /// Poll pending timer queries and absorb completed results.
    ///
    /// Unavailable results stay pending for a future drain. Available ones
    /// update `last_gpu_ms` and set the freshness flag unless the timing
    /// stream is disjoint, in which case the measurement is discarded.
    /// Every available query is disposed either way, keeping the pending
    /// collection bounded.
    pub fn drain_gpu_queries(&mut self) {
        for _ in 0..self.pending.len() {
            let Some(query) = self.pending.pop_front() else {
                break;
            };
            if !self.gl.query_result_available(query) {
                self.pending.push_back(query);
                continue;
            }
            if self.gl.timing_disjoint() {
                // Interrupted timing stream: the result cannot be trusted.
                #[cfg(feature = "tracing")]
                trace!("discarding disjoint gpu timing sample");
            } else {
                let ns = self.gl.query_elapsed_ns(query);
                self.last_gpu_ms = ns as f64 / 1e6;
                self.fresh_sample = true;
            }
            self.gl.delete_query(query);
        }
    }

    /// Run one frame: drain, upload, draw, time, adapt, reschedule.
    ///
    /// `timestamp` and `metadata` are handed to the draw callback verbatim.
    pub fn step(&mut self, timestamp: f64, metadata: &FrameMetadata) {
        // The callback that invoked us has fired; its handle is spent.
        self.scheduled = None;

        self.drain_gpu_queries();

        if self.video.ready_state() >= HAVE_CURRENT_DATA {
            self.ensure_texture();
            self.gl.upload_frame(self.texture, &self.video);
        }

        let query = if self.gl.has_timer_queries() {
            self.gl.begin_timer_query()
        } else {
            None
        };

        (self.draw)(timestamp, metadata);

        if let Some(query) = query {
            self.gl.end_timer_query(query);
            self.pending.push_back(query);
        }

        self.frame_count += 1;
        self.maybe_adapt();

        if self.playing {
            self.schedule();
        }
    }

    /// Start playback. No effect if already playing.
    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.ensure_texture();
        self.schedule();
    }

    /// Stop playback and cancel any outstanding scheduled callback.
    ///
    /// Safe to call repeatedly or before the first `play`.
    pub fn pause(&mut self) {
        self.playing = false;
        if let Some(scheduled) = self.scheduled.take() {
            match scheduled {
                ScheduledFrame::VideoFrame(handle) => self.video.cancel_frame_callback(handle),
                ScheduledFrame::AnimationFrame(handle) => self.raf.cancel_animation_frame(handle),
            }
        }
    }

    /// Most recently measured GPU time in milliseconds (0 before any
    /// measurement lands).
    #[inline]
    pub fn last_gpu_ms(&self) -> f64 {
        self.last_gpu_ms
    }

    /// Whether the controller is in the playing state.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Frames stepped so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of queries awaiting a result.
    #[inline]
    pub fn pending_queries(&self) -> usize {
        self.pending.len()
    }

    /// The scheduling strategy cached at construction.
    #[inline]
    pub fn strategy(&self) -> ScheduleStrategy {
        self.strategy
    }

    /// The outstanding scheduled callback, if any.
    #[inline]
    pub fn scheduled(&self) -> Option<ScheduledFrame> {
        self.scheduled
    }

    /// Controller configuration.
    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Borrow the graphics context.
    pub fn graphics(&self) -> &G {
        &self.gl
    }

    /// Mutably borrow the graphics context.
    pub fn graphics_mut(&mut self) -> &mut G {
        &mut self.gl
    }

    /// Borrow the frame source.
    pub fn source(&self) -> &F {
        &self.video
    }

    /// Mutably borrow the frame source.
    pub fn source_mut(&mut self) -> &mut F {
        &mut self.video
    }

    /// Borrow the animation scheduler.
    pub fn scheduler(&self) -> &A {
        &self.raf
    }

    /// Borrow the state store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn schedule(&mut self) {
        self.scheduled = Some(match self.strategy {
            ScheduleStrategy::VideoFrame => {
                ScheduledFrame::VideoFrame(self.video.request_frame_callback())
            }
            ScheduleStrategy::AnimationFrame => {
                ScheduledFrame::AnimationFrame(self.raf.request_animation_frame())
            }
        });
    }

    fn maybe_adapt(&mut self) {
        if self.config.adapt_every == 0
            || !self.frame_count.is_multiple_of(u64::from(self.config.adapt_every))
        {
            return;
        }
        if !self.fresh_sample {
            return;
        }

        let current = self.store.sample().unwrap_or(0);
        let budget = self.config.budget_ms();
        let proposed = if self.last_gpu_ms > budget {
            (current + 1).min(self.config.max_sample)
        } else if self.last_gpu_ms < budget * RELAX_FACTOR && current > MIN_SAMPLE {
            current - 1
        } else {
            current
        };

        if proposed != current {
            #[cfg(feature = "tracing")]
            debug!(
                gpu_ms = self.last_gpu_ms,
                budget_ms = budget,
                from = current,
                to = proposed,
                "adapting sampling"
            );
            self.store.set_sample(proposed);
        }
        // One decision per measurement, written or not.
        self.fresh_sample = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
