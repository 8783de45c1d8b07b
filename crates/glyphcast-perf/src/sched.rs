#![forbid(unsafe_code)]

//! Frame scheduling: preferred video-frame callbacks with a generic
//! animation-frame fallback.

use crate::source::CallbackHandle;

/// Generic per-animation-frame scheduling primitive owned by the host.
///
/// Fallback used when the frame source cannot schedule callbacks aligned to
/// presented video frames.
pub trait AnimationScheduler {
    /// Schedule a callback for the next animation frame.
    fn request_animation_frame(&mut self) -> CallbackHandle;

    /// Cancel a scheduled callback. Unknown or already-fired handles are a
    /// no-op.
    fn cancel_animation_frame(&mut self, handle: CallbackHandle);
}

/// Which scheduling mechanism the controller uses.
///
/// Chosen once at construction from the frame source's capability and cached;
/// every reschedule uses the same strategy without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStrategy {
    /// Callbacks aligned to presented video frames.
    VideoFrame,
    /// Generic animation-frame callbacks.
    AnimationFrame,
}

/// An outstanding scheduled callback, tagged with the mechanism that issued
/// it so cancellation goes to the right collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledFrame {
    /// Issued via [`FrameSource::request_frame_callback`].
    ///
    /// [`FrameSource::request_frame_callback`]: crate::source::FrameSource::request_frame_callback
    VideoFrame(CallbackHandle),
    /// Issued via [`AnimationScheduler::request_animation_frame`].
    AnimationFrame(CallbackHandle),
}
