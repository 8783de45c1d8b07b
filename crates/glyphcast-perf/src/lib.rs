#![forbid(unsafe_code)]

//! Adaptive frame-performance control for ASCII-art video playback.
//!
//! The controller drives a per-frame loop: upload the current video frame to
//! a GPU texture, invoke the renderer's draw callback, time the frame on the
//! GPU with timer queries, and every few frames nudge the player's sampling
//! parameter up or down so measured GPU time stays inside the frame budget.
//!
//! Design constraints:
//! - **Host-driven**: the embedding environment implements the collaborator
//!   traits ([`GraphicsContext`], [`FrameSource`], [`AnimationScheduler`],
//!   [`StateStore`]) and invokes [`FrameController::step`] when a scheduled
//!   callback fires. No threads, no blocking.
//! - **Non-blocking timing**: query results are polled, never awaited. A
//!   result landing late is picked up by a later frame's drain, which is why
//!   freshness is tracked explicitly instead of assumed.
//! - **Graceful degradation**: without the timer-query capability the loop
//!   still uploads and draws; adaptation simply never triggers.

pub mod context;
pub mod controller;
pub mod sched;
pub mod source;
pub mod store;

pub use context::GraphicsContext;
pub use controller::{ControllerConfig, DrawFn, FrameController, MIN_SAMPLE};
pub use sched::{AnimationScheduler, ScheduleStrategy, ScheduledFrame};
pub use source::{CallbackHandle, FrameMetadata, FrameSource, HAVE_CURRENT_DATA};
pub use store::StateStore;
