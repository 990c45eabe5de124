//! Fuzz target for overlay drawing.
//!
//! Parses arbitrary input as VOC XML and draws whatever boxes come out onto a
//! small downscaled canvas, checking that out-of-range geometry neither panics
//! nor hangs.

#![no_main]

use image::RgbImage;
use libfuzzer_sys::fuzz_target;
use vocview::annotation::io_voc_xml::from_voc_xml_slice;
use vocview::render::{DisplayImage, DisplaySize, OverlayStyle};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(set) = from_voc_xml_slice(data) else {
        return;
    };

    let mut display = DisplayImage::from_rgb(RgbImage::new(64, 48), DisplaySize::fixed(32, 32));
    display.draw(&set, &OverlayStyle::with_thickness(3));
});
