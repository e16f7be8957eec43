// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/overlay.rs
//
// Dimming overlay around the crop square.

use resvg::tiny_skia::{self, Paint, PixmapMut, Transform};

/// Axis-aligned band in the centered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Band {
    fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    fn rect(&self) -> Option<tiny_skia::Rect> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Left, right, top and bottom bands covering everything outside a
/// `side` square centered on a `width` x `height` surface.
///
/// Left and right span the full height; top and bottom fill the gap between
/// them. The stroke width widens the uncovered area so the boundary stays
/// visible.
pub fn overlay_bands(width: f32, height: f32, side: f32, line_width: f32) -> [Band; 4] {
    let left_w = (width - side) / 2.0 - line_width;
    let right_w = (width - side) / 2.0 + line_width / 2.0;
    let top_h = (height - side) / 2.0 - line_width;
    let bottom_h = (height - side) / 2.0 + line_width / 2.0;

    let (half_w, half_h) = (width / 2.0, height / 2.0);
    let inner_w = side + line_width / 2.0;

    [
        Band::new(-half_w, -half_h, left_w, height),
        Band::new(half_w - right_w, -half_h, right_w, height),
        Band::new(-half_w + left_w, -half_h, inner_w, top_h),
        Band::new(-half_w + left_w, half_h - bottom_h, inner_w, bottom_h),
    ]
}

/// Fill the bands in semi-transparent black. Bands with no area are skipped.
pub fn fill_overlay(pixmap: &mut PixmapMut<'_>, bands: &[Band], alpha: f32, frame: Transform) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8);

    for band in bands {
        if let Some(rect) = band.rect() {
            pixmap.fill_rect(rect, &paint, frame, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_match_layout() {
        let [left, right, top, bottom] = overlay_bands(400.0, 300.0, 200.0, 4.0);

        assert_eq!(left, Band::new(-200.0, -150.0, 96.0, 300.0));
        assert_eq!(right, Band::new(98.0, -150.0, 102.0, 300.0));
        assert_eq!(top, Band::new(-104.0, -150.0, 202.0, 46.0));
        assert_eq!(bottom, Band::new(-104.0, 98.0, 202.0, 52.0));
    }

    #[test]
    fn oversized_square_yields_empty_bands() {
        let bands = overlay_bands(100.0, 100.0, 120.0, 4.0);
        assert!(bands[0].rect().is_none());
        assert!(bands[2].rect().is_none());
    }
}
