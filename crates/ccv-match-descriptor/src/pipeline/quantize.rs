use ccv_match_types::PixelPlane;

/// Maps 8-bit samples onto `colors` uniform bins: `bin = sample * colors / 256`.
///
/// `colors == 256` is the identity, `colors == 1` sends everything to bin 0,
/// and every output sample is strictly below `colors`.
pub fn quantize_plane(plane: &PixelPlane, colors: u16) -> PixelPlane {
    debug_assert!((1..=256).contains(&colors));
    let mut output = PixelPlane::zeroed(plane.width(), plane.height());
    for (bin, &sample) in output.samples_mut().iter_mut().zip(plane.samples()) {
        *bin = (sample as u32 * colors as u32 / 256) as u8;
    }
    output
}
