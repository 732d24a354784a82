//! Image I/O

use crate::geometry::*;
use crate::pbrt::*;
use exr::prelude::*;
use image::{ImageBuffer, ImageFormat, Rgb};
use std::path::Path;
use std::result::Result;

/// Write the output image to given path. The format is chosen from the file
/// extension: `.exr` is written linear, `.png` and `.tga` are gamma corrected
/// to 8 bits.
///
/// * `path`       - Output file path.
/// * `rgb`        - Floating point RGB pixel data, row major.
/// * `resolution` - Image resolution.
pub fn write_image(path: &str, rgb: &[Float], resolution: &Point2i) -> Result<(), String> {
    if resolution.x <= 0 || resolution.y <= 0 {
        return Err(format!("Invalid image resolution {resolution}"));
    }
    let res_x = resolution.x as u32;
    let res_y = resolution.y as u32;
    if rgb.len() != 3 * (res_x * res_y) as usize {
        return Err(format!(
            "Expected {} RGB values for {res_x}x{res_y} image but got {}",
            3 * res_x * res_y,
            rgb.len()
        ));
    }

    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("exr") => write_exr(path, rgb, res_x, res_y),
        Some("tga") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Tga),
        Some("png") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Png),
        Some(extension) => Err(format!("Extension .{extension} is not supported")),
        None => Err(format!("Can't determine file type from suffix of filename {path}")),
    }
}

/// Writes the image in OpenEXR format.
///
/// * `path`  - Output file path.
/// * `rgb`   - Floating point RGB pixel data.
/// * `res_x` - X resolution.
/// * `res_y` - Y resolution.
fn write_exr(path: &str, rgb: &[Float], res_x: u32, res_y: u32) -> Result<(), String> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let width = res_x as usize;
    write_rgb_file(path, width, res_y as usize, |x, y| {
        let offset = 3 * (y * width + x);
        (rgb[offset], rgb[offset + 1], rgb[offset + 2])
    })
    .map_err(|err| format!("Error saving output image {path}: {err}"))
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `rgb`          - Floating point RGB pixel data.
/// * `res_x`        - X resolution.
/// * `res_y`        - Y resolution.
/// * `image_format` - Image format.
fn write_8_bit(path: &str, rgb: &[Float], res_x: u32, res_y: u32, image_format: ImageFormat) -> Result<(), String> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let imgbuf = ImageBuffer::from_fn(res_x, res_y, |x, y| {
        let offset = 3 * (y * res_x + x) as usize;
        Rgb(apply_gamma(&[rgb[offset], rgb[offset + 1], rgb[offset + 2]]))
    });

    imgbuf
        .save_with_format(path, image_format)
        .map_err(|err| format!("Error saving output image {path}: {err}."))
}

/// Apply gamma correction to a RGB floating point pixel and return the clamped 8-bit values.
///
/// * `rgb` - RGB floating point pixel value.
#[inline]
pub fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    [clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2])]
}

/// Clamp floating point value to 8-bit range [0, 255].
///
/// * `v` - Value to clamp.
#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}
