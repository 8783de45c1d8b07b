#![forbid(unsafe_code)]

//! Frame source collaborator: a video-like object owned by the host.

/// Handle to a scheduled host callback.
pub type CallbackHandle = u64;

/// Readiness threshold: the source has data for the current frame.
///
/// Matches the `HTMLMediaElement.readyState` scale, where 2
/// (`HAVE_CURRENT_DATA`) is the lowest state with presentable pixels.
pub const HAVE_CURRENT_DATA: u8 = 2;

/// A video-like frame source.
///
/// Exposes current frame dimensions, a readiness indicator, and (optionally)
/// per-video-frame callback scheduling. Sources without frame callbacks are
/// driven by the generic [`AnimationScheduler`] fallback instead; the
/// controller checks [`supports_frame_callbacks`] once at construction.
///
/// [`AnimationScheduler`]: crate::sched::AnimationScheduler
/// [`supports_frame_callbacks`]: FrameSource::supports_frame_callbacks
pub trait FrameSource {
    /// Intrinsic width of the current frame in pixels. Zero when unknown.
    fn frame_width(&self) -> u32;

    /// Intrinsic height of the current frame in pixels. Zero when unknown.
    fn frame_height(&self) -> u32;

    /// Numeric readiness indicator; see [`HAVE_CURRENT_DATA`].
    fn ready_state(&self) -> u8;

    /// Whether the source can schedule callbacks aligned to presented
    /// video frames.
    fn supports_frame_callbacks(&self) -> bool {
        false
    }

    /// Schedule a callback for the next presented frame.
    ///
    /// Only called when [`supports_frame_callbacks`] returned true.
    ///
    /// [`supports_frame_callbacks`]: FrameSource::supports_frame_callbacks
    fn request_frame_callback(&mut self) -> CallbackHandle;

    /// Cancel a callback scheduled by
    /// [`request_frame_callback`](FrameSource::request_frame_callback).
    /// Unknown or already-fired handles are a no-op.
    fn cancel_frame_callback(&mut self, handle: CallbackHandle);
}

/// Metadata for a presented frame.
///
/// Passed through to the draw callback verbatim; the controller never
/// interprets it. Sources driven by the animation-frame fallback pass
/// `FrameMetadata::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameMetadata {
    /// Media timestamp of the presented frame, in seconds.
    pub media_time: f64,
    /// When the frame is expected to be visible, in milliseconds on the
    /// host's timeline.
    pub expected_display_time: f64,
    /// Count of frames presented so far.
    pub presented_frames: u64,
}
