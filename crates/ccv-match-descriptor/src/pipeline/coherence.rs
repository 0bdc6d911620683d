use std::collections::HashMap;

use serde::Serialize;

use ccv_match_types::PixelPlane;

use crate::pipeline::label::LabelImage;

/// Pixel count and quantized color of one connected component.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComponentStat {
    pub color: u8,
    pub size: u64,
}

/// Coherent (`alpha`) and incoherent (`beta`) pixel totals for one color bin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CoherencePair {
    pub alpha: u64,
    pub beta: u64,
}

/// Reduces a label image to per-component color and size.
///
/// The first pixel seen for a label records the component color; the
/// labeler guarantees every later pixel of that label carries the same
/// quantized color, so only the count grows.
pub fn tally_components(labels: &LabelImage, quantized: &PixelPlane) -> HashMap<u32, ComponentStat> {
    let mut components = HashMap::new();
    for (&label, &color) in labels.labels().iter().zip(quantized.samples()) {
        components
            .entry(label)
            .and_modify(|stat: &mut ComponentStat| stat.size += 1)
            .or_insert(ComponentStat { color, size: 1 });
    }
    components
}

/// Folds component stats into `colors` dense `(alpha, beta)` pairs.
///
/// Components of size `>= coherence_threshold` add to alpha, smaller ones
/// to beta; bins no component touched stay `(0, 0)`. The pair totals over
/// all bins always equal the plane's pixel count.
pub fn assemble_ccv(
    components: &HashMap<u32, ComponentStat>,
    colors: u16,
    coherence_threshold: u32,
) -> Vec<CoherencePair> {
    let mut bins = vec![CoherencePair::default(); colors as usize];
    for stat in components.values() {
        let bin = &mut bins[stat.color as usize];
        if stat.size >= coherence_threshold as u64 {
            bin.alpha += stat.size;
        } else {
            bin.beta += stat.size;
        }
    }
    bins
}
