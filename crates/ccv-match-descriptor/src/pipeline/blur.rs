use ccv_match_types::PixelPlane;

/// 3x3 box mean, pre-smoothing that keeps single-pixel noise from
/// fragmenting components.
///
/// Border policy: the window is clipped to the plane, so corner pixels
/// average 4 samples and edge pixels 6. Division rounds half up.
pub fn box_blur_3x3(plane: &PixelPlane) -> PixelPlane {
    let width = plane.width();
    let height = plane.height();
    let mut output = PixelPlane::zeroed(width, height);
    if plane.is_empty() {
        return output;
    }
    let samples = plane.samples();
    let smoothed = output.samples_mut();
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            let mut count = 0u32;
            for ky in 0..3 {
                for kx in 0..3 {
                    let oy = y as isize + ky as isize - 1;
                    let ox = x as isize + kx as isize - 1;
                    if oy < 0 || ox < 0 || oy >= height as isize || ox >= width as isize {
                        continue;
                    }
                    sum += samples[oy as usize * width + ox as usize] as u32;
                    count += 1;
                }
            }
            smoothed[y * width + x] = ((sum + count / 2) / count) as u8;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(width: usize, height: usize, data: &[u8]) -> PixelPlane {
        PixelPlane::from_raw(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn uniform_plane_is_unchanged() {
        let input = plane(4, 3, &[77; 12]);
        assert_eq!(box_blur_3x3(&input).samples(), input.samples());
    }

    #[test]
    fn single_pixel_is_unchanged() {
        let input = plane(1, 1, &[200]);
        assert_eq!(box_blur_3x3(&input).samples(), &[200]);
    }

    #[test]
    fn impulse_spreads_with_clipped_windows() {
        let mut data = [0u8; 9];
        data[4] = 255;
        let blurred = box_blur_3x3(&plane(3, 3, &data));
        // 4 samples at corners, 6 at edges, 9 in the middle.
        assert_eq!(
            blurred.samples(),
            &[64, 43, 64, 43, 28, 43, 64, 43, 64]
        );
    }

    #[test]
    fn empty_plane_stays_empty() {
        let blurred = box_blur_3x3(&PixelPlane::zeroed(0, 0));
        assert!(blurred.is_empty());
    }
}
