// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/transform.rs
//
// Center-on-crop coordinate frame shared by redraw and export.

use resvg::tiny_skia::Transform;

use crate::domain::crop::CropSquare;

/// Maps image space onto a surface so that the crop square's center sits
/// at the surface center.
///
/// The redraw paints into a surface the size of the image; the export paints
/// into a surface the size of the square. Both go through [`Self::image`], so
/// for the export the mapping reduces to a plain `(-x, -y)` translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterTransform {
    width: f32,
    height: f32,
    square: CropSquare,
}

impl CenterTransform {
    pub fn new(width: u32, height: u32, square: CropSquare) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            square,
        }
    }

    /// Frame for a `side` x `side` export surface. The square's side is
    /// replaced by the integer surface side so the crop is never rescaled.
    pub fn for_export(square: CropSquare, side: u32) -> Self {
        Self::new(side, side, CropSquare { side: side as f32, ..square })
    }

    /// Origin moved to the surface center. Boundary, overlay and caption are
    /// laid out in this frame.
    pub fn frame(&self) -> Transform {
        Transform::from_translate(self.width / 2.0, self.height / 2.0)
    }

    /// Offset of the image's top-left corner inside [`Self::frame`].
    pub fn image_offset(&self) -> (f32, f32) {
        let (cx, cy) = self.square.center();
        (-cx, -cy)
    }

    /// Full image-space to surface-space transform.
    pub fn image(&self) -> Transform {
        let (dx, dy) = self.image_offset();
        self.frame().pre_translate(dx, dy)
    }
}
