//! Font size scaling.

use crate::manifest::ScreenConfig;

/// Computes the point size a font authored for `reference` needs on `target`.
///
/// The scale factor is the minimum of the two axis ratios, so the rasterized
/// glyphs never exceed either screen dimension's scale — the binding
/// constraint on rectangular displays. A target identical to the reference
/// yields the input size exactly.
///
/// Rounding is half-away-from-zero (`f64::round`); a half-integer result like
/// 12.5 becomes 13, not 12. Extreme downscales may legitimately round to 0.
pub fn calculate_size(reference_size: u32, reference: &ScreenConfig, target: &ScreenConfig) -> u32 {
    let scale_w = f64::from(target.width) / f64::from(reference.width);
    let scale_h = f64::from(target.height) / f64::from(reference.height);
    let scale = scale_w.min(scale_h);
    (f64::from(reference_size) * scale).round() as u32
}
