// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/export.rs
//
// Export of the selected square as a standalone PNG.

use std::fmt;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use image::RgbaImage;
use resvg::tiny_skia::PixmapPaint;

use crate::constant::EXPORT_MIME;
use crate::domain::crop::CropSquare;
use crate::domain::document::SourceImage;
use crate::error::{BoundsViolation, CropError, CropResult};
use crate::ui::{CenterTransform, DrawingSurface};

/// A cropped image whose source is a self-contained PNG data URI.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedImage {
    width: u32,
    height: u32,
    png: Vec<u8>,
    data_uri: String,
}

impl fmt::Debug for ExportedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExportedImage({}x{}, {} bytes)",
            self.width,
            self.height,
            self.png.len()
        )
    }
}

impl ExportedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Encoded PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// `data:image/png;base64,...`
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Decode the PNG back into pixels.
    pub fn to_rgba(&self) -> CropResult<RgbaImage> {
        Ok(image::load_from_memory(&self.png)?.to_rgba8())
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.png)
    }
}

/// Rasterize `square` of `source` into a `side` x `side` image.
///
/// The side is truncated to whole pixels. The source is only translated,
/// never scaled; parts of the square outside the image come out transparent.
pub fn export_square(source: &SourceImage, square: CropSquare) -> CropResult<ExportedImage> {
    let side = square
        .pixel_side()
        .ok_or(CropError::ConstraintOutOfBounds(BoundsViolation::NonPositiveSide))?;

    let mut surface = DrawingSurface::new(side, side)?;
    let view = CenterTransform::for_export(square, side);
    surface.pixmap_mut().draw_pixmap(
        0,
        0,
        source.pixmap(),
        &PixmapPaint::default(),
        view.image(),
        None,
    );

    let png = surface.encode_png()?;
    let data_uri = format!(
        "data:{EXPORT_MIME};base64,{}",
        general_purpose::STANDARD.encode(&png)
    );

    log::debug!("Exported {side}x{side} crop at ({}, {})", square.x, square.y);

    Ok(ExportedImage {
        width: side,
        height: side,
        png,
        data_uri,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> SourceImage {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        SourceImage::from_rgba(img).unwrap()
    }

    #[test]
    fn output_is_side_by_side() {
        let source = gradient(120, 80);
        for square in [
            CropSquare::new(0.0, 0.0, 80.0),
            CropSquare::new(10.0, 5.0, 33.0),
            CropSquare::new(3.7, 1.2, 40.9),
            CropSquare::new(100.0, 70.0, 50.0),
        ] {
            let exported = export_square(&source, square).unwrap();
            let expected = square.side as u32;
            assert_eq!(exported.dimensions(), (expected, expected));
            let pixels = exported.to_rgba().unwrap();
            assert_eq!(pixels.dimensions(), (expected, expected));
        }
    }

    #[test]
    fn export_is_pure_translation() {
        let source = gradient(120, 80);
        let pixels = export_square(&source, CropSquare::new(10.0, 20.0, 30.0))
            .unwrap()
            .to_rgba()
            .unwrap();

        assert_eq!(pixels.get_pixel(0, 0), &Rgba([10, 20, 7, 255]));
        assert_eq!(pixels.get_pixel(29, 29), &Rgba([39, 49, 7, 255]));
    }

    #[test]
    fn outside_image_is_transparent() {
        let source = gradient(20, 20);
        let pixels = export_square(&source, CropSquare::new(10.0, 10.0, 20.0))
            .unwrap()
            .to_rgba()
            .unwrap();
        assert_eq!(pixels.get_pixel(15, 15)[3], 0);
    }

    #[test]
    fn data_uri_wraps_png() {
        let exported = export_square(&gradient(10, 10), CropSquare::new(0.0, 0.0, 4.0)).unwrap();
        let payload = exported
            .data_uri()
            .strip_prefix("data:image/png;base64,")
            .unwrap();
        assert_eq!(general_purpose::STANDARD.decode(payload).unwrap(), exported.png());
    }

    #[test]
    fn empty_square_is_rejected() {
        let err = export_square(&gradient(10, 10), CropSquare::new(0.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            CropError::ConstraintOutOfBounds(BoundsViolation::NonPositiveSide)
        );
    }
}
