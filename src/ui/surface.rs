// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/surface.rs
//
// Drawing surface owned by a crop engine.

use std::fmt;
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{ImageFormat, RgbaImage};
use resvg::tiny_skia::{Color, Pixmap, PixmapMut};

use crate::domain::document::convert::pixmap_to_rgba;
use crate::error::{CropError, CropResult};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a drawing surface inside a host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Premultiplied RGBA surface.
pub struct DrawingSurface {
    id: SurfaceId,
    pixmap: Pixmap,
}

impl fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DrawingSurface({:?}, {}x{})",
            self.id,
            self.pixmap.width(),
            self.pixmap.height()
        )
    }
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32) -> CropResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(CropError::InvalidImageDimensions { width, height })?;
        Ok(Self {
            id: SurfaceId::next(),
            pixmap,
        })
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> PixmapMut<'_> {
        self.pixmap.as_mut()
    }

    /// Straight-alpha copy of the surface.
    pub fn to_rgba(&self) -> RgbaImage {
        pixmap_to_rgba(&self.pixmap)
    }

    /// Lossless PNG encoding of the surface.
    pub fn encode_png(&self) -> CropResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.to_rgba()
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| CropError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_get_distinct_ids() {
        let a = DrawingSurface::new(1, 1).unwrap();
        let b = DrawingSurface::new(1, 1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert_eq!(
            DrawingSurface::new(0, 5).unwrap_err(),
            CropError::InvalidImageDimensions { width: 0, height: 5 }
        );
    }

    #[test]
    fn png_decodes_to_same_size() {
        let surface = DrawingSurface::new(6, 4).unwrap();
        let png = surface.encode_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }
}
