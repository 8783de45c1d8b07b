#![forbid(unsafe_code)]

//! Default sampling and font size so an ASCII frame fits its stage.
//!
//! When a video loads, the player needs a sampling value (video pixels per
//! character cell) that maps the video's intrinsic resolution onto a
//! character grid no larger than the stage, preserving aspect ratio.
//! Optionally the font size is nudged so the resulting sampling lands near a
//! preferred target (e.g. 10 px/char).
//!
//! This module computes those defaults; the host reads its UI inputs into an
//! [`AspectRequest`] and applies the returned [`AspectDefaults`] back to them.

use crate::font::{FontMetrics, TextMeasurer, measure_font, sanitize_font_px};

/// Font-size nudges smaller than this are ignored (sub-quarter-pixel).
const NUDGE_THRESHOLD_PX: f64 = 0.25;

/// Inclusive clamp range for a numeric UI input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl ClampRange {
    /// Create a range. `min` must not exceed `max`.
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Inputs for the defaults computation, mirroring the player's UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRequest<'a> {
    /// Video intrinsic width in pixels. Zero is treated as 1.
    pub video_w: u32,
    /// Video intrinsic height in pixels. Zero is treated as 1.
    pub video_h: u32,
    /// Stage width in CSS pixels. Clamped to at least 1.
    pub stage_w: f64,
    /// Stage height in CSS pixels. Clamped to at least 1.
    pub stage_h: f64,
    /// Current font size in pixels.
    pub font_px: f64,
    /// Font family used for measurement.
    pub font_family: &'a str,
    /// Half-block mode: each character cell covers two vertical video
    /// pixels, halving the required row count.
    pub half_block: bool,
    /// Preferred sampling in px/char. `None` (or a non-positive value)
    /// disables the font-size nudge.
    pub target_sample: Option<f64>,
    /// Allowed font-size range for the nudge.
    pub font_range: ClampRange,
    /// Allowed sampling range for the result.
    pub sample_range: ClampRange,
    /// The sampling value currently shown in the UI, if any. Used only to
    /// report whether the computed value differs.
    pub current_sample: Option<f64>,
}

impl<'a> AspectRequest<'a> {
    /// Default preferred sampling in px/char.
    pub const DEFAULT_TARGET_SAMPLE: f64 = 10.0;
    /// Default font-size clamp range in pixels.
    pub const DEFAULT_FONT_RANGE: ClampRange = ClampRange::new(6.0, 72.0);
    /// Default sampling clamp range in px/char.
    pub const DEFAULT_SAMPLE_RANGE: ClampRange = ClampRange::new(1.0, 100.0);

    /// Build a request with default target, ranges, and no current sample.
    pub fn new(video_w: u32, video_h: u32, stage_w: f64, stage_h: f64, font_px: f64) -> Self {
        Self {
            video_w,
            video_h,
            stage_w,
            stage_h,
            font_px,
            font_family: "monospace",
            half_block: false,
            target_sample: Some(Self::DEFAULT_TARGET_SAMPLE),
            font_range: Self::DEFAULT_FONT_RANGE,
            sample_range: Self::DEFAULT_SAMPLE_RANGE,
            current_sample: None,
        }
    }
}

/// Computed defaults for the host to apply to its UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDefaults {
    /// Sampling in px/char, clamped into the requested range.
    pub sample: f64,
    /// Font size in pixels. Rounded to a whole pixel when nudged, otherwise
    /// the caller's (sanitized) value unchanged.
    pub font_px: f64,
    /// Metrics of the font actually used for the final fit.
    pub metrics: FontMetrics,
    /// Whether `sample` differs from the request's `current_sample`.
    pub sample_changed: bool,
    /// Whether the font size was nudged.
    pub font_changed: bool,
}

/// Compute the smallest sampling at which the ASCII frame fits the stage,
/// optionally nudging the font size toward a preferred sampling target.
pub fn aspect_defaults<M>(measurer: &M, req: &AspectRequest<'_>) -> AspectDefaults
where
    M: TextMeasurer + ?Sized,
{
    let stage_w = safe_extent(req.stage_w);
    let stage_h = safe_extent(req.stage_h);
    let v_w = req.video_w.max(1) as f64;
    let v_h = req.video_h.max(1) as f64;
    // Half-block mode packs two vertical video pixels per row.
    let v_h_eff = if req.half_block { v_h / 2.0 } else { v_h };

    let font_px = sanitize_font_px(req.font_px);
    let mut metrics = measure_font(measurer, font_px, req.font_family);
    let mut sample_fit = fit_sample(v_w, v_h_eff, stage_w, stage_h, metrics.ch_w);

    let mut out_font_px = font_px;
    let mut font_changed = false;
    if let Some(target) = req.target_sample
        && target > 0.0
        && sample_fit > 0.0
    {
        let ideal_px = req.font_range.clamp(font_px * (target / sample_fit));
        if (ideal_px - font_px).abs() >= NUDGE_THRESHOLD_PX {
            metrics = measure_font(measurer, ideal_px, req.font_family);
            sample_fit = fit_sample(v_w, v_h_eff, stage_w, stage_h, metrics.ch_w);
            out_font_px = ideal_px.round();
            font_changed = true;
        }
    }

    let sample = req.sample_range.clamp(sample_fit);
    AspectDefaults {
        sample,
        font_px: out_font_px,
        metrics,
        sample_changed: req.current_sample != Some(sample),
        font_changed,
    }
}

/// Smallest whole sampling that satisfies both the width and height fits.
///
/// Sampling is px/char on both axes, so the advance width is the relevant
/// cell metric for each.
fn fit_sample(v_w: f64, v_h_eff: f64, stage_w: f64, stage_h: f64, ch_w: f64) -> f64 {
    let width_fit = (v_w * ch_w) / stage_w;
    let height_fit = (v_h_eff * ch_w) / stage_h;
    width_fit.max(height_fit).ceil()
}

fn safe_extent(extent: f64) -> f64 {
    if extent.is_finite() { extent.max(1.0) } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::ApproxMeasurer;
    use pretty_assertions::assert_eq;

    fn no_nudge(req: &mut AspectRequest<'_>) {
        req.target_sample = None;
    }

    #[test]
    fn sample_covers_both_axes() {
        // ch_w = 8.4 at 14px. Width fit: 640*8.4/800 = 6.72. Height fit:
        // 360*8.4/600 = 5.04. ceil(max) = 7.
        let mut req = AspectRequest::new(640, 360, 800.0, 600.0, 14.0);
        no_nudge(&mut req);
        let out = aspect_defaults(&ApproxMeasurer, &req);
        assert_eq!(out.sample, 7.0);
        assert!(!out.font_changed);
        assert_eq!(out.font_px, 14.0);
    }

    #[test]
    fn half_block_halves_the_height_requirement() {
        // Tall video: height-bound. Full: ceil(1080*8.4/600) = 16.
        // Half-block: ceil(540*8.4/600) = 8.
        let mut req = AspectRequest::new(100, 1080, 4000.0, 600.0, 14.0);
        no_nudge(&mut req);
        let full = aspect_defaults(&ApproxMeasurer, &req);
        req.half_block = true;
        let half = aspect_defaults(&ApproxMeasurer, &req);
        assert_eq!(full.sample, 16.0);
        assert_eq!(half.sample, 8.0);
    }

    #[test]
    fn nudges_font_toward_target_sample() {
        // Initial fit at 14px is 7 (see sample_covers_both_axes). Target 10
        // asks for 14 * 10/7 = 20px; the fit recomputed at 20px (ch_w = 12)
        // is ceil(max(640*12/800, 360*12/600)) = ceil(9.6) = 10.
        let req = AspectRequest::new(640, 360, 800.0, 600.0, 14.0);
        let out = aspect_defaults(&ApproxMeasurer, &req);
        assert!(out.font_changed);
        assert_eq!(out.font_px, 20.0);
        assert_eq!(out.sample, 10.0);
    }

    #[test]
    fn nudge_respects_font_range() {
        let mut req = AspectRequest::new(640, 360, 800.0, 600.0, 14.0);
        req.font_range = ClampRange::new(6.0, 16.0);
        let out = aspect_defaults(&ApproxMeasurer, &req);
        assert!(out.font_changed);
        assert_eq!(out.font_px, 16.0);
    }

    #[test]
    fn tiny_nudges_are_ignored() {
        // Fit already equals the target: the ideal font is unchanged.
        let mut req = AspectRequest::new(640, 360, 800.0, 600.0, 14.0);
        req.target_sample = Some(7.0);
        let out = aspect_defaults(&ApproxMeasurer, &req);
        assert!(!out.font_changed);
        assert_eq!(out.font_px, 14.0);
    }

    #[test]
    fn sample_clamped_into_range() {
        let mut req = AspectRequest::new(10_000, 10_000, 10.0, 10.0, 14.0);
        no_nudge(&mut req);
        req.sample_range = ClampRange::new(1.0, 100.0);
        let out = aspect_defaults(&ApproxMeasurer, &req);
        assert_eq!(out.sample, 100.0);

        let mut req = AspectRequest::new(1, 1, 5000.0, 5000.0, 14.0);
        no_nudge(&mut req);
        req.sample_range = ClampRange::new(2.0, 100.0);
        let out = aspect_defaults(&ApproxMeasurer, &req);
        assert_eq!(out.sample, 2.0);
    }

    #[test]
    fn reports_whether_sample_changed() {
        let mut req = AspectRequest::new(640, 360, 800.0, 600.0, 14.0);
        no_nudge(&mut req);
        req.current_sample = Some(7.0);
        assert!(!aspect_defaults(&ApproxMeasurer, &req).sample_changed);
        req.current_sample = Some(6.0);
        assert!(aspect_defaults(&ApproxMeasurer, &req).sample_changed);
        req.current_sample = None;
        assert!(aspect_defaults(&ApproxMeasurer, &req).sample_changed);
    }

    #[test]
    fn degenerate_video_and_stage_do_not_panic() {
        let mut req = AspectRequest::new(0, 0, 0.0, f64::NAN, 0.0);
        no_nudge(&mut req);
        let out = aspect_defaults(&ApproxMeasurer, &req);
        assert!(out.sample >= 1.0);
        assert_eq!(out.font_px, 14.0);
    }
}
