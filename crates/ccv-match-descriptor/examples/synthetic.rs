use std::error::Error;

use ccv_match_descriptor::{distance, Descriptor};
use ccv_match_types::{CcvSettings, ImageFrame};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;

fn banded_frame(band_height: u32) -> Result<ImageFrame, Box<dyn Error>> {
    let mut data = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        let shade = if (y / band_height) % 2 == 0 { 40 } else { 215 };
        data.extend(std::iter::repeat(shade).take(WIDTH as usize));
    }
    Ok(ImageFrame::from_owned(WIDTH, HEIGHT, 1, data)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = CcvSettings {
        colors: 8,
        coherence_threshold: 32,
    };

    let wide_bands = banded_frame(12)?;
    let narrow_bands = banded_frame(4)?;

    let wide = Descriptor::from_frame(&wide_bands, &settings)?;
    let narrow = Descriptor::from_frame(&narrow_bands, &settings)?;

    for (name, descriptor) in [("wide", &wide), ("narrow", &narrow)] {
        println!("{name} bands:");
        for (bin, pair) in descriptor.channels()[0].iter().enumerate() {
            if pair.alpha != 0 || pair.beta != 0 {
                println!("  bin {bin:3}: alpha={:5} beta={:5}", pair.alpha, pair.beta);
            }
        }
    }

    println!("distance: {:.6}", distance(&wide, &narrow)?);
    Ok(())
}
