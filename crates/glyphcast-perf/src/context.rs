#![forbid(unsafe_code)]

//! Graphics context collaborator: texture operations and optional GPU
//! timing.

use crate::source::FrameSource;

/// Host graphics context the controller renders through.
///
/// The texture side is mandatory. The timer-query side maps a
/// disjoint-timer-query capability and is optional: contexts without it keep
/// the default method bodies, [`has_timer_queries`] stays false, and the
/// controller never issues a query — frame upload and draw continue
/// normally.
///
/// All polls are non-blocking. The controller never waits for a query
/// result; unavailable results stay pending until a later frame.
///
/// [`has_timer_queries`]: GraphicsContext::has_timer_queries
pub trait GraphicsContext<F: FrameSource + ?Sized> {
    /// Opaque texture handle.
    type TextureId: Copy;
    /// Opaque timer-query handle.
    type QueryId: Copy;

    /// Create the frame texture with linear filtering and edge-clamp
    /// wrapping. Storage is allocated separately.
    fn create_frame_texture(&mut self) -> Self::TextureId;

    /// (Re)allocate the texture's backing storage at `width × height`
    /// (RGBA, 8 bits per channel).
    fn allocate_texture(&mut self, texture: Self::TextureId, width: u32, height: u32);

    /// Copy the source's current frame pixels into the texture.
    ///
    /// Storage was sized to the source's dimensions beforehand.
    fn upload_frame(&mut self, texture: Self::TextureId, source: &F);

    /// Whether the timer-query capability is present.
    fn has_timer_queries(&self) -> bool {
        false
    }

    /// Begin a GPU elapsed-time query scoped to the current frame.
    ///
    /// `None` when the capability is absent or a query cannot be created.
    fn begin_timer_query(&mut self) -> Option<Self::QueryId> {
        None
    }

    /// End a query begun this frame. Its result becomes available later.
    fn end_timer_query(&mut self, _query: Self::QueryId) {}

    /// Non-blocking poll: whether the query's result can be read.
    fn query_result_available(&self, _query: Self::QueryId) -> bool {
        false
    }

    /// Whether the timing stream was interrupted (context switch, power
    /// event). Available results must be discarded while this is set.
    fn timing_disjoint(&self) -> bool {
        false
    }

    /// Elapsed GPU time for a query whose result is available, in
    /// nanoseconds.
    fn query_elapsed_ns(&self, _query: Self::QueryId) -> u64 {
        0
    }

    /// Dispose of a query once its result has been consumed or discarded.
    fn delete_query(&mut self, _query: Self::QueryId) {}
}
