use std::error::Error;
use std::ffi::OsString;
use std::path::Path;

use ccv_match_descriptor::{distance, Descriptor};
use ccv_match_types::{CcvSettings, ImageFrame};
use image::DynamicImage;

fn usage() {
    println!("usage: ccv-match [--dump-ccv] <first image> <second image> <colors> <threshold>");
    println!("       colors:    quantization bins per channel, 1..=256");
    println!("       threshold: minimum component size in pixels counted as coherent");
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args_os();
    let _ = args.next();
    let mut dump_ccv = false;
    let mut positional: Vec<OsString> = Vec::new();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            usage();
            return Ok(());
        } else if arg == "--dump-ccv" {
            dump_ccv = true;
        } else {
            positional.push(arg);
        }
    }

    if positional.len() != 4 {
        usage();
        std::process::exit(2);
    }

    let colors = match positional[2].to_str().and_then(|s| s.parse::<u16>().ok()) {
        Some(value) if (1..=256).contains(&value) => value,
        _ => {
            eprintln!("ccv-match: colors must be an integer in 1..=256");
            usage();
            std::process::exit(2);
        }
    };
    let coherence_threshold = match positional[3].to_str().and_then(|s| s.parse::<u32>().ok()) {
        Some(value) => value,
        None => {
            eprintln!("ccv-match: threshold must be a non-negative integer");
            usage();
            std::process::exit(2);
        }
    };
    let settings = CcvSettings {
        colors,
        coherence_threshold,
    };

    let frame_a = load_frame(Path::new(&positional[0]))?;
    let frame_b = load_frame(Path::new(&positional[1]))?;

    let descriptor_a = Descriptor::from_frame(&frame_a, &settings)?;
    let descriptor_b = Descriptor::from_frame(&frame_b, &settings)?;

    if dump_ccv {
        dump_descriptor("first", &descriptor_a);
        dump_descriptor("second", &descriptor_b);
    }

    println!("{:.6}", distance(&descriptor_a, &descriptor_b)?);
    Ok(())
}

/// Decodes an image into an interleaved frame. Grayscale-typed files stay
/// single-channel; everything else is normalized to RGB8 so both sides of
/// a comparison share channel order.
fn load_frame(path: &Path) -> Result<ImageFrame, Box<dyn Error>> {
    let decoded = image::open(path)?;
    let frame = match decoded {
        DynamicImage::ImageLuma8(gray) => {
            let (width, height) = gray.dimensions();
            ImageFrame::from_owned(width, height, 1, gray.into_raw())?
        }
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            ImageFrame::from_owned(width, height, 3, rgb.into_raw())?
        }
    };
    Ok(frame)
}

fn dump_descriptor(which: &str, descriptor: &Descriptor) {
    for (index, bins) in descriptor.channels().iter().enumerate() {
        println!("{which} image, channel {index}:");
        for (bin, pair) in bins.iter().enumerate() {
            println!("  {bin:3}: ({}, {})", pair.alpha, pair.beta);
        }
    }
}
