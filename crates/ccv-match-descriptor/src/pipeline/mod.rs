//! Per-channel descriptor pipeline: blur, quantize, label, tally, assemble.

pub mod blur;
pub mod coherence;
pub mod label;
pub mod quantize;

pub use blur::box_blur_3x3;
pub use coherence::{assemble_ccv, tally_components, ComponentStat};
pub use label::{label_components, LabelImage};
pub use quantize::quantize_plane;
