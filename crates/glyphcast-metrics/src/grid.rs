#![forbid(unsafe_code)]

//! Character grid dimensions for a CSS-pixel area.

use crate::font::{FontMetrics, TextMeasurer, measure_font};

/// How many character cells fit in a CSS-pixel area, and at what metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Advance width of one character cell.
    pub ch_w: f64,
    /// Height of one text line.
    pub line_h: f64,
    /// Columns that fit in the area. Never zero.
    pub cols: u32,
    /// Rows that fit in the area. Never zero.
    pub rows: u32,
}

/// Estimate character metrics and how many columns/rows fit in `css_w × css_h`.
///
/// Degenerate areas (zero, negative, non-finite) still produce a 1×1 grid so
/// downstream layout never divides by zero.
pub fn compute_grid<M>(
    measurer: &M,
    font_px: f64,
    family: &str,
    css_w: f64,
    css_h: f64,
) -> GridMetrics
where
    M: TextMeasurer + ?Sized,
{
    let FontMetrics { ch_w, line_h } = measure_font(measurer, font_px, family);
    GridMetrics {
        ch_w,
        line_h,
        cols: fit(css_w, ch_w),
        rows: fit(css_h, line_h),
    }
}

fn fit(extent: f64, cell: f64) -> u32 {
    let n = (extent / cell).floor();
    if n.is_finite() && n >= 1.0 {
        n as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::ApproxMeasurer;
    use pretty_assertions::assert_eq;

    #[test]
    fn fallback_grid_is_at_least_one_by_one() {
        let g = compute_grid(&ApproxMeasurer, 16.0, "monospace", 160.0, 80.0);
        assert!(g.ch_w > 0.0);
        assert_eq!(g.line_h, 16.0);
        assert!(g.cols >= 1);
        assert!(g.rows >= 1);
    }

    #[test]
    fn counts_whole_cells() {
        // ch_w = 0.6 * 10 = 6.0; 100 / 6 = 16.66 -> 16 cols; 55 / 10 -> 5 rows.
        let g = compute_grid(&ApproxMeasurer, 10.0, "monospace", 100.0, 55.0);
        assert_eq!(g.cols, 16);
        assert_eq!(g.rows, 5);
    }

    #[test]
    fn degenerate_area_clamps_to_one() {
        let g = compute_grid(&ApproxMeasurer, 14.0, "monospace", 0.0, -5.0);
        assert_eq!(g.cols, 1);
        assert_eq!(g.rows, 1);

        let g = compute_grid(&ApproxMeasurer, 14.0, "monospace", f64::NAN, f64::INFINITY);
        assert_eq!(g.cols, 1);
        // Infinite extent floors to infinity, which is not a representable
        // count; clamp applies there too.
        assert_eq!(g.rows, 1);
    }
}
