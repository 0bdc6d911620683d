use rayon::prelude::*;
use serde::Serialize;

use ccv_match_types::{CcvResult, CcvSettings, ImageFrame, PixelPlane};

use crate::pipeline::coherence::CoherencePair;
use crate::pipeline::{
    assemble_ccv, box_blur_3x3, label_components, quantize_plane, tally_components,
};

/// Channel pipelines share nothing, so three-channel frames at or above
/// this pixel count run them in parallel.
const PARALLEL_MIN_PIXELS: u64 = 4096;

/// One channel's coherence vector: a dense `(alpha, beta)` pair per bin.
pub type ChannelCcv = Vec<CoherencePair>;

/// Per-channel color coherence vectors of one image.
///
/// Value-like and freely shareable; channels appear in the native order of
/// the source buffer.
#[derive(Clone, Debug, Serialize)]
pub struct Descriptor {
    colors: u16,
    pixel_count: u64,
    channels: Vec<ChannelCcv>,
}

impl Descriptor {
    /// Runs the blur → quantize → label → tally → assemble pipeline over
    /// every channel of `frame`.
    pub fn from_frame(frame: &ImageFrame, settings: &CcvSettings) -> CcvResult<Self> {
        settings.validate()?;
        let planes = frame.planes();
        let pixel_count = frame.pixel_count();
        let channels = if planes.len() > 1 && pixel_count >= PARALLEL_MIN_PIXELS {
            planes
                .par_iter()
                .map(|plane| channel_ccv(plane, settings))
                .collect::<CcvResult<Vec<_>>>()?
        } else {
            planes
                .iter()
                .map(|plane| channel_ccv(plane, settings))
                .collect::<CcvResult<Vec<_>>>()?
        };
        Ok(Self {
            colors: settings.colors,
            pixel_count,
            channels,
        })
    }

    /// Number of quantization bins each channel was reduced to.
    pub fn colors(&self) -> u16 {
        self.colors
    }

    /// `W * H` of the originating image.
    pub fn pixel_count(&self) -> u64 {
        self.pixel_count
    }

    pub fn channels(&self) -> &[ChannelCcv] {
        &self.channels
    }
}

fn channel_ccv(plane: &PixelPlane, settings: &CcvSettings) -> CcvResult<ChannelCcv> {
    let smoothed = box_blur_3x3(plane);
    let quantized = quantize_plane(&smoothed, settings.colors);
    let labeled = label_components(&quantized)?;
    let components = tally_components(&labeled, &quantized);
    Ok(assemble_ccv(
        &components,
        settings.colors,
        settings.coherence_threshold,
    ))
}
