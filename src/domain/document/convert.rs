// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/convert.rs
//
// Conversions between image buffers and tiny_skia pixmaps.

use image::RgbaImage;
use resvg::tiny_skia::{ColorU8, IntSize, Pixmap};

/// Convert a straight-alpha RgbaImage into a premultiplied Pixmap.
pub fn rgba_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;

    let mut data = Vec::with_capacity(image.as_raw().len());
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let color = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    Pixmap::from_vec(data, size)
}

/// Convert a tiny_skia Pixmap back into a straight-alpha RgbaImage.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let (width, height) = (pixmap.width(), pixmap.height());

    // tiny_skia stores premultiplied alpha, image expects straight alpha.
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        pixels.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(width, height, pixels).unwrap_or_else(|| RgbaImage::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn opaque_pixels_survive_roundtrip() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([10, 20, 30, 255]));

        let pixmap = rgba_to_pixmap(&img).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (3, 2));
        assert_eq!(pixmap_to_rgba(&pixmap), img);
    }

    #[test]
    fn pixmap_is_premultiplied() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([200, 100, 0, 0]));

        let pixmap = rgba_to_pixmap(&img).unwrap();
        assert_eq!(pixmap.data(), &[0, 0, 0, 0]);
    }
}
