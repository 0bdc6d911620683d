use ccv_match_types::{CcvError, CcvResult};

use crate::descriptor::Descriptor;

/// Pixel-count-normalized L1 distance between two descriptors.
///
/// Each `(alpha, beta)` pair is divided by its own image's pixel count
/// before the absolute differences are summed over every channel and bin,
/// which makes the metric insensitive to image scale. Descriptors built
/// under a different bin count or channel count do not compare.
pub fn distance(first: &Descriptor, second: &Descriptor) -> CcvResult<f32> {
    if first.colors() != second.colors() {
        return Err(CcvError::mismatch(format!(
            "quantized to different bin counts ({} vs {})",
            first.colors(),
            second.colors()
        )));
    }
    if first.channels().len() != second.channels().len() {
        return Err(CcvError::mismatch(format!(
            "different channel counts ({} vs {})",
            first.channels().len(),
            second.channels().len()
        )));
    }

    let first_pixels = first.pixel_count() as f32;
    let second_pixels = second.pixel_count() as f32;
    let mut total = 0.0f32;
    for (a, b) in first.channels().iter().zip(second.channels()) {
        for (pair_a, pair_b) in a.iter().zip(b) {
            total += (pair_a.alpha as f32 / first_pixels - pair_b.alpha as f32 / second_pixels)
                .abs()
                + (pair_a.beta as f32 / first_pixels - pair_b.beta as f32 / second_pixels).abs();
        }
    }
    Ok(total)
}
