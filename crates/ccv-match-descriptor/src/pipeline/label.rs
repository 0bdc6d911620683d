use ccv_match_types::{CcvError, CcvResult, PixelPlane};

use crate::disjoint_set::DisjointSetForest;

/// Label image produced by [`label_components`], same shape as its input.
///
/// After the second pass every cell holds the canonical representative of
/// its component; 0 never appears.
pub struct LabelImage {
    width: usize,
    height: usize,
    labels: Vec<u32>,
}

impl LabelImage {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn label(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.width + x]
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }
}

/// Two-pass 4-connectivity labeling of a quantized plane.
///
/// The first pass scans row-major, copying the left or top label when the
/// quantized colors match and recording left/top equivalences in a
/// disjoint-set forest; the second pass canonicalizes every label through
/// `find`. Two pixels end up with the same label iff a 4-connected path of
/// equal quantized color joins them.
///
/// Labels are 32-bit throughout, so provisional labels never truncate; a
/// plane whose pixel count does not fit the label range fails with
/// [`CcvError::LabelOverflow`] before any work is done.
pub fn label_components(quantized: &PixelPlane) -> CcvResult<LabelImage> {
    let width = quantized.width();
    let height = quantized.height();
    let pixels = quantized.len();
    if pixels == 0 {
        return Ok(LabelImage {
            width,
            height,
            labels: Vec::new(),
        });
    }
    if pixels >= u32::MAX as usize {
        return Err(CcvError::label_overflow(pixels as u64));
    }

    let samples = quantized.samples();
    let mut labels = vec![0u32; pixels];
    // One slot per possible provisional label plus the reserved 0.
    let mut forest = DisjointSetForest::new(pixels);
    let mut next_label = 0u32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = samples[idx];
            let left_matches = x > 0 && samples[idx - 1] == value;
            let top_matches = y > 0 && samples[idx - width] == value;
            labels[idx] = match (left_matches, top_matches) {
                (true, true) => {
                    let left = labels[idx - 1];
                    let top = labels[idx - width];
                    if left != top {
                        forest.union(left, top);
                    }
                    left.min(top)
                }
                (true, false) => labels[idx - 1],
                (false, true) => labels[idx - width],
                (false, false) => {
                    next_label += 1;
                    next_label
                }
            };
        }
    }

    for label in labels.iter_mut() {
        *label = forest.find(*label);
    }

    Ok(LabelImage {
        width,
        height,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantized(width: usize, height: usize, data: &[u8]) -> PixelPlane {
        PixelPlane::from_raw(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn empty_plane_has_no_labels() {
        let labeled = label_components(&PixelPlane::zeroed(0, 0)).unwrap();
        assert!(labeled.labels().is_empty());
    }

    #[test]
    fn single_pixel_gets_label_one() {
        let labeled = label_components(&quantized(1, 1, &[7])).unwrap();
        assert_eq!(labeled.labels(), &[1]);
    }

    #[test]
    fn uniform_plane_is_one_component() {
        let labeled = label_components(&quantized(5, 4, &[3; 20])).unwrap();
        let first = labeled.label(0, 0);
        assert_ne!(first, 0);
        assert!(labeled.labels().iter().all(|&l| l == first));
    }

    #[test]
    fn left_and_top_runs_merge_through_equivalence() {
        // The last pixel of the second row sees label 1 on its left and
        // label 3 above; both runs must collapse to one component.
        let labeled = label_components(&quantized(
            3,
            2,
            &[
                1, 0, 1, //
                1, 1, 1,
            ],
        ))
        .unwrap();
        let ring = labeled.label(0, 0);
        assert_eq!(labeled.label(2, 0), ring);
        assert_eq!(labeled.label(0, 1), ring);
        assert_eq!(labeled.label(1, 1), ring);
        assert_eq!(labeled.label(2, 1), ring);
        assert_ne!(labeled.label(1, 0), ring);
    }

    #[test]
    fn diagonal_neighbors_stay_separate() {
        // 4-connectivity: diagonally touching pixels of the same color are
        // distinct components.
        let labeled = label_components(&quantized(
            2,
            2,
            &[
                1, 0, //
                0, 1,
            ],
        ))
        .unwrap();
        assert_ne!(labeled.label(0, 0), labeled.label(1, 1));
        assert_ne!(labeled.label(1, 0), labeled.label(0, 1));
    }

    #[test]
    fn labels_are_sound_on_a_scrambled_plane() {
        // Deterministic pseudo-random plane over three colors.
        let width = 9;
        let height = 7;
        let mut state = 0x2545f491u32;
        let data: Vec<u8> = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                (state >> 24) as u8 % 3
            })
            .collect();
        let plane = quantized(width, height, &data);
        let labeled = label_components(&plane).unwrap();

        assert!(labeled.labels().iter().all(|&l| l != 0));
        for y in 0..height {
            for x in 0..width {
                if x + 1 < width {
                    let same_color = plane.sample(x, y) == plane.sample(x + 1, y);
                    let same_label = labeled.label(x, y) == labeled.label(x + 1, y);
                    if same_color {
                        assert!(same_label, "equal horizontal neighbors split at ({x},{y})");
                    } else {
                        assert!(!same_label, "unequal horizontal neighbors merged at ({x},{y})");
                    }
                }
                if y + 1 < height {
                    let same_color = plane.sample(x, y) == plane.sample(x, y + 1);
                    let same_label = labeled.label(x, y) == labeled.label(x, y + 1);
                    if same_color {
                        assert!(same_label, "equal vertical neighbors split at ({x},{y})");
                    } else {
                        assert!(!same_label, "unequal vertical neighbors merged at ({x},{y})");
                    }
                }
            }
        }
    }
}
