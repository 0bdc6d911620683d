//! Shared domain models for the ccv-match workspace.
//!
//! This crate centralizes the lightweight data structures used by the
//! descriptor crate and the CLI: pixel buffers, settings, and the error
//! type. Keep it free of image codecs and other heavy dependencies so
//! every crate can depend on it cheaply.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

pub type CcvResult<T> = Result<T, CcvError>;

#[derive(Debug, Error)]
pub enum CcvError {
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("label space exhausted: {pixels} pixels do not fit the 32-bit label range")]
    LabelOverflow { pixels: u64 },

    #[error("descriptor mismatch: {reason}")]
    Mismatch { reason: String },
}

impl CcvError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn label_overflow(pixels: u64) -> Self {
        Self::LabelOverflow { pixels }
    }

    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::Mismatch {
            reason: reason.into(),
        }
    }
}

/// Quantization and coherence parameters for descriptor construction.
///
/// `colors` is the number of per-channel quantization bins and must lie in
/// `1..=256`. `coherence_threshold` is the minimum connected-component size
/// (in pixels) for its pixels to count as coherent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CcvSettings {
    pub colors: u16,
    pub coherence_threshold: u32,
}

impl CcvSettings {
    pub fn validate(&self) -> CcvResult<()> {
        if self.colors == 0 || self.colors > 256 {
            return Err(CcvError::configuration(format!(
                "colors must be in 1..=256, got {}",
                self.colors
            )));
        }
        Ok(())
    }
}

/// Owned interleaved 8-bit image buffer, channel-last layout.
///
/// Cheap to clone; the payload is shared.
#[derive(Clone)]
pub struct ImageFrame {
    width: u32,
    height: u32,
    channels: u8,
    data: Arc<[u8]>,
}

impl ImageFrame {
    pub fn from_owned(width: u32, height: u32, channels: u8, data: Vec<u8>) -> CcvResult<Self> {
        if width == 0 || height == 0 {
            return Err(CcvError::configuration(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if channels != 1 && channels != 3 {
            return Err(CcvError::configuration(format!(
                "unsupported channel count {channels}; expected 1 or 3"
            )));
        }
        let required = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels as usize))
            .ok_or_else(|| {
                CcvError::configuration("calculated buffer length overflowed".to_string())
            })?;
        if data.len() != required {
            return Err(CcvError::configuration(format!(
                "buffer holds {} bytes, expected {required} for {width}x{height}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data: Arc::from(data.into_boxed_slice()),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Extracts channel `channel` as an owned plane, or `None` when the
    /// index is out of range.
    pub fn plane(&self, channel: u8) -> Option<PixelPlane> {
        if channel >= self.channels {
            return None;
        }
        let stride = self.channels as usize;
        let samples = self.data[channel as usize..]
            .iter()
            .step_by(stride)
            .copied()
            .collect();
        Some(PixelPlane {
            width: self.width as usize,
            height: self.height as usize,
            data: samples,
        })
    }

    /// All channel planes in buffer order.
    pub fn planes(&self) -> Vec<PixelPlane> {
        (0..self.channels).filter_map(|c| self.plane(c)).collect()
    }
}

impl fmt::Debug for ImageFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Single-channel rectangular plane of 8-bit samples, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelPlane {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelPlane {
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> CcvResult<Self> {
        let required = width.checked_mul(height).ok_or_else(|| {
            CcvError::configuration("calculated plane length overflowed".to_string())
        })?;
        if data.len() != required {
            return Err(CcvError::configuration(format!(
                "plane holds {} samples, expected {required} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn sample(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for PixelPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelPlane")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
