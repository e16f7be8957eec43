// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/pipeline.rs
//
// Redraw pipeline: image, boundary, overlay and caption on the surface.

use resvg::tiny_skia::{FillRule, Paint, PathBuilder, PixmapMut, PixmapPaint, Stroke, Transform};

use super::caption::CaptionRenderer;
use super::overlay::{fill_overlay, overlay_bands};
use super::surface::DrawingSurface;
use super::transform::CenterTransform;
use super::zigzag::{ZigzagBorder, dotted_border};
use crate::config::{BorderStyle, EngineConfig};
use crate::domain::crop::CropSquare;
use crate::domain::document::SourceImage;

pub struct RedrawPipeline {
    line_width: f32,
    tooth_size: f32,
    border_style: BorderStyle,
    border_color: [u8; 4],
    overlay_alpha: f32,
    caption: CaptionRenderer,
}

impl RedrawPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            line_width: config.line_width,
            tooth_size: config.tooth_size,
            border_style: config.border_style,
            border_color: config.border_color,
            overlay_alpha: config.overlay_alpha,
            caption: CaptionRenderer::new(config),
        }
    }

    /// Repaint the whole surface for `square`.
    ///
    /// Everything after the clear is laid out in the centered frame, so the
    /// crop square always sits in the middle of the surface and the image
    /// pans underneath it.
    pub fn redraw(&self, surface: &mut DrawingSurface, source: &SourceImage, square: CropSquare) {
        surface.clear();

        let (width, height) = (surface.width(), surface.height());
        let view = CenterTransform::new(width, height, square);
        let frame = view.frame();
        let mut pixmap = surface.pixmap_mut();

        pixmap.draw_pixmap(0, 0, source.pixmap(), &PixmapPaint::default(), view.image(), None);

        let lw = self.line_width;
        if border_in_view(width, height, square.side, lw, self.tooth_size) {
            let corner = -square.side / 2.0 - lw / 2.0;
            self.draw_border(&mut pixmap, corner, square.side, frame);
        } else {
            log::warn!("Crop side {} puts the border outside the surface", square.side);
        }

        let bands = overlay_bands(width as f32, height as f32, square.side, lw);
        fill_overlay(&mut pixmap, &bands, self.overlay_alpha, frame);

        let baseline = -square.side / 2.0 - self.caption.font_size();
        self.caption
            .draw(&mut pixmap, source.dimensions(), 0.0, baseline, frame);

        log::trace!("Redrew {width}x{height} surface for {square:?}");
    }

    fn draw_border(
        &self,
        pixmap: &mut PixmapMut<'_>,
        corner: f32,
        side: f32,
        frame: Transform,
    ) {
        let [r, g, b, a] = self.border_color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        match self.border_style {
            BorderStyle::Zigzag => {
                let border = ZigzagBorder::new(corner, corner, side, self.line_width, self.tooth_size);
                if let Some(path) = border.to_path() {
                    let stroke = Stroke {
                        width: self.line_width,
                        ..Default::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, frame, None);
                }
            }
            BorderStyle::Dotted => {
                let radius = self.line_width / 2.0;
                let mut pb = PathBuilder::new();
                for (cx, cy) in dotted_border(corner, corner, side, self.line_width) {
                    pb.push_circle(cx, cy, radius);
                }
                if let Some(path) = pb.finish() {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, frame, None);
                }
            }
        }
    }
}

/// Whether any part of the border around a centered square of `side` can
/// land on a `width` x `height` surface. Teeth point inward by at most
/// `tooth`, strokes and dots spread by at most `line_width`.
fn border_in_view(width: u32, height: u32, side: f32, line_width: f32, tooth: f32) -> bool {
    if !side.is_finite() {
        return false;
    }
    let nearest = side / 2.0 - 2.0 * line_width - tooth.max(0.0);
    nearest <= width.max(height) as f32 / 2.0
}
