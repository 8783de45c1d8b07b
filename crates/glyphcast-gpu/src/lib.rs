#![forbid(unsafe_code)]

//! GPU adapter negotiation and surface sizing for ASCII-art video playback.
//!
//! Browsers and drivers are uneven about which adapter request succeeds, so
//! acquisition is an ordered list of configuration variants tried
//! sequentially: first success wins, and an error is surfaced only when every
//! attempt has failed and at least one of them errored. Surface setup then
//! layers device acquisition and canvas configuration on top, and a couple of
//! small helpers handle device-pixel-ratio sizing and the secure-context
//! requirement.
//!
//! The actual platform calls live behind [`AdapterProvider`] /
//! [`DeviceProvider`] / [`SurfaceTarget`] traits the host implements; this
//! crate only owns the negotiation order and the failure semantics.

pub mod adapter;
pub mod surface;

pub use adapter::{
    AdapterOptions, AdapterProvider, DEFAULT_ATTEMPTS, PowerPreference, acquire_adapter,
};
pub use surface::{
    AlphaMode, DeviceProvider, SetupError, SurfaceConfig, SurfaceSetup, SurfaceTarget,
    TextureFormat, is_secure_context, physical_surface_size, setup_surface,
};
