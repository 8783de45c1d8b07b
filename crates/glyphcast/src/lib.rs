#![forbid(unsafe_code)]

//! Glyphcast public facade crate.
//!
//! Utilities for an ASCII-art video player: character-cell metrics and
//! sizing defaults, GPU adapter/surface negotiation, and an adaptive
//! frame-performance controller. This crate re-exports the common types from
//! the concern crates and offers a lightweight prelude.

use std::fmt;

// --- Metrics re-exports ----------------------------------------------------

pub use glyphcast_metrics::{
    ApproxMeasurer, AspectDefaults, AspectRequest, ClampRange, FontMetrics, GridMetrics,
    TextMeasurer, aspect_defaults, compute_grid, measure_font,
};

// --- GPU re-exports --------------------------------------------------------

pub use glyphcast_gpu::{
    AdapterOptions, AdapterProvider, AlphaMode, DEFAULT_ATTEMPTS, DeviceProvider, PowerPreference,
    SetupError, SurfaceConfig, SurfaceSetup, SurfaceTarget, TextureFormat, acquire_adapter,
    is_secure_context, physical_surface_size, setup_surface,
};

// --- Performance-controller re-exports -------------------------------------

pub use glyphcast_perf::{
    AnimationScheduler, CallbackHandle, ControllerConfig, FrameController, FrameMetadata,
    FrameSource, GraphicsContext, HAVE_CURRENT_DATA, MIN_SAMPLE, ScheduleStrategy, ScheduledFrame,
    StateStore,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for glyphcast hosts.
#[derive(Debug)]
pub enum Error {
    /// GPU negotiation or surface setup failure.
    Gpu(String),
    /// Host/platform error with message.
    Host(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(msg) => write!(f, "{msg}"),
            Self::Host(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl<E: fmt::Display> From<SetupError<E>> for Error {
    fn from(err: SetupError<E>) -> Self {
        Self::Gpu(err.to_string())
    }
}

/// Commonly used types for embedding hosts.
pub mod prelude {
    pub use crate::{
        AdapterProvider, AnimationScheduler, AspectRequest, ControllerConfig, Error,
        FrameController, FrameMetadata, FrameSource, GraphicsContext, StateStore, SurfaceTarget,
        TextMeasurer, aspect_defaults, setup_surface,
    };
}
