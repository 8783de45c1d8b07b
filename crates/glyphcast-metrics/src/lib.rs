#![forbid(unsafe_code)]

//! Character-cell measurement and sizing math for ASCII-art video playback.
//!
//! ASCII output lives on a uniform character grid, so every sizing question
//! reduces to two numbers per font: the advance width of a character cell and
//! the line height. This crate measures those (through a host-provided
//! [`TextMeasurer`], with a fixed-ratio fallback for headless hosts), derives
//! grid dimensions for a CSS-pixel area, and computes default sampling and
//! font-size values that make a video's ASCII rendering fit a stage without
//! overflow while preserving aspect ratio.
//!
//! All computation is pure; reading inputs from and applying results to the
//! host UI is the embedder's job.

pub mod aspect;
pub mod font;
pub mod grid;

pub use aspect::{AspectDefaults, AspectRequest, ClampRange, aspect_defaults};
pub use font::{ApproxMeasurer, FontMetrics, TextMeasurer, measure_font, sanitize_font_px};
pub use grid::{GridMetrics, compute_grid};
