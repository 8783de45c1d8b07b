#![forbid(unsafe_code)]

//! Approximate character metrics for monospace-style rendering.
//!
//! Hosts that can actually measure text (a 2D canvas context, a glyph
//! rasterizer) implement [`TextMeasurer`]. Hosts that cannot, or measurements
//! that come back broken, fall through to a fixed width ratio so sizing math
//! always has something finite to work with.

/// Font size used when the caller supplies a non-finite or non-positive one.
pub const FALLBACK_FONT_PX: f64 = 14.0;

/// Glyph width as a fraction of font size when no measurement is available.
///
/// Monospace fonts typically advance at 0.55–0.65 of the em size.
pub const APPROX_WIDTH_RATIO: f64 = 0.6;

/// Host collaborator that measures glyph advance width.
pub trait TextMeasurer {
    /// Advance width in CSS pixels of the reference glyph `'M'` rendered at
    /// `font_px` in `family`.
    ///
    /// Returns `None` when the host cannot measure (e.g. no 2D context).
    fn glyph_width(&self, font_px: f64, family: &str) -> Option<f64>;
}

/// Measurer that never consults the host; always yields the ratio estimate.
///
/// Useful for tests and headless embedders.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasurer;

impl TextMeasurer for ApproxMeasurer {
    fn glyph_width(&self, _font_px: f64, _family: &str) -> Option<f64> {
        None
    }
}

/// Character cell metrics in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Advance width of one character cell.
    pub ch_w: f64,
    /// Height of one text line. Approximated as the font size; real fonts
    /// may differ, but this is sufficient for sizing calculations.
    pub line_h: f64,
}

/// Replace a non-finite or non-positive font size with [`FALLBACK_FONT_PX`].
#[inline]
pub fn sanitize_font_px(font_px: f64) -> f64 {
    if font_px.is_finite() && font_px > 0.0 {
        font_px
    } else {
        FALLBACK_FONT_PX
    }
}

/// Measure character metrics for a font size and family.
///
/// The width comes from the measurer when it returns a finite positive
/// value; otherwise `font_px ×` [`APPROX_WIDTH_RATIO`]. The line height is
/// the (sanitized) font size.
pub fn measure_font<M>(measurer: &M, font_px: f64, family: &str) -> FontMetrics
where
    M: TextMeasurer + ?Sized,
{
    let safe_px = sanitize_font_px(font_px);
    let ch_w = match measurer.glyph_width(safe_px, family) {
        Some(w) if w.is_finite() && w > 0.0 => w,
        _ => safe_px * APPROX_WIDTH_RATIO,
    };
    FontMetrics {
        ch_w,
        line_h: safe_px,
    }
}
