//! Viridis color scale with linear interpolation between stops.

use plotters::style::RGBColor;

use crate::config::DisplayRange;

/// Cells without a finite value.
pub const MISSING: RGBColor = RGBColor(255, 255, 255);

#[derive(Debug, Clone, Copy)]
struct ColorStop {
    t: f32,
    rgb: (u8, u8, u8),
}

const fn stop(t: f32, r: u8, g: u8, b: u8) -> ColorStop {
    ColorStop { t, rgb: (r, g, b) }
}

const VIRIDIS: &[ColorStop] = &[
    stop(0.000, 68, 1, 84),
    stop(0.125, 71, 44, 122),
    stop(0.250, 59, 81, 139),
    stop(0.375, 44, 113, 142),
    stop(0.500, 33, 144, 141),
    stop(0.625, 39, 173, 129),
    stop(0.750, 92, 200, 99),
    stop(0.875, 170, 220, 50),
    stop(1.000, 253, 231, 37),
];

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Color at position `t` in `[0, 1]`; out-of-range positions saturate.
pub fn evaluate(t: f32) -> RGBColor {
    let first = VIRIDIS[0];
    let last = VIRIDIS[VIRIDIS.len() - 1];

    if t.is_nan() || t <= first.t {
        let (r, g, b) = first.rgb;
        return RGBColor(r, g, b);
    }
    if t >= last.t {
        let (r, g, b) = last.rgb;
        return RGBColor(r, g, b);
    }

    let upper = VIRIDIS.iter().position(|s| t <= s.t).unwrap_or(VIRIDIS.len() - 1);
    let (lo, hi) = (VIRIDIS[upper - 1], VIRIDIS[upper]);
    let ratio = (t - lo.t) / (hi.t - lo.t);

    RGBColor(
        lerp(lo.rgb.0, hi.rgb.0, ratio),
        lerp(lo.rgb.1, hi.rgb.1, ratio),
        lerp(lo.rgb.2, hi.rgb.2, ratio),
    )
}

/// Color for a data value under a display clamp.
pub fn color_for(value: f32, range: &DisplayRange) -> RGBColor {
    if value.is_finite() {
        evaluate(range.normalize(value))
    } else {
        MISSING
    }
}
