// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/caption.rs
//
// Caption above the crop boundary, rendered through usvg text layout.

use std::sync::Arc;

use resvg::tiny_skia::{PixmapMut, Transform};
use resvg::usvg::{Options, Tree, fontdb};

use crate::config::EngineConfig;

/// Renders centered single-line captions.
///
/// The font database is loaded once per engine; without any fonts the
/// caption is silently skipped.
pub struct CaptionRenderer {
    fontdb: Arc<fontdb::Database>,
    font_size: f32,
    font_family: String,
    color: [u8; 4],
}

impl CaptionRenderer {
    pub fn new(config: &EngineConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }
        log::debug!("Caption font database holds {} faces", db.len());

        Self {
            fontdb: Arc::new(db),
            font_size: config.caption_font_size,
            font_family: config.caption_font_family.clone(),
            color: config.caption_color,
        }
    }

    pub fn has_fonts(&self) -> bool {
        !self.fontdb.is_empty()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Draw the size caption for a `width` x `height` image centered on `x`,
    /// with its baseline at `baseline`, both in the coordinate frame given by
    /// `frame`.
    pub fn draw(
        &self,
        pixmap: &mut PixmapMut<'_>,
        (width, height): (u32, u32),
        x: f32,
        baseline: f32,
        frame: Transform,
    ) {
        if !self.has_fonts() {
            return;
        }

        let text = caption_text(width, height);
        let svg = self.svg(pixmap.width(), pixmap.height(), &text, x, baseline);

        let mut options = Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        options.font_family = self.font_family.clone();

        match Tree::from_str(&svg, &options) {
            Ok(tree) => resvg::render(&tree, frame, pixmap),
            Err(e) => log::warn!("Failed to lay out caption {text:?}: {e}"),
        }
    }

    fn svg(&self, width: u32, height: u32, text: &str, x: f32, baseline: f32) -> String {
        let [r, g, b, a] = self.color;
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" overflow="visible">"#,
                r#"<text x="{x}" y="{y}" text-anchor="middle" "#,
                r#"font-size="{size}" fill="rgb({r},{g},{b})" fill-opacity="{alpha}">{text}</text>"#,
                "</svg>"
            ),
            w = width,
            h = height,
            x = x,
            y = baseline,
            size = self.font_size,
            r = r,
            g = g,
            b = b,
            alpha = f32::from(a) / 255.0,
            text = text,
        )
    }
}

/// Caption text for an image of the given natural size.
pub fn caption_text(width: u32, height: u32) -> String {
    format!("{width} x {height}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> CaptionRenderer {
        CaptionRenderer::new(&EngineConfig {
            load_system_fonts: false,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn caption_shows_natural_size() {
        assert_eq!(caption_text(1024, 768), "1024 x 768");
    }

    #[test]
    fn svg_places_centered_text() {
        let svg = renderer().svg(10, 10, "4 x 3", 0.0, -62.0);
        assert!(svg.contains(r#"<text x="0" y="-62" text-anchor="middle" "#));
        assert!(svg.contains(">4 x 3</text>"));
        assert!(svg.contains("fill-opacity=\"1\""));
    }

    #[test]
    fn no_fonts_means_no_caption() {
        let caption = renderer();
        assert!(!caption.has_fonts());

        let mut pixmap = resvg::tiny_skia::Pixmap::new(20, 20).unwrap();
        caption.draw(&mut pixmap.as_mut(), (1, 1), 10.0, 10.0, Transform::identity());
        assert!(pixmap.data().iter().all(|&b| b == 0));
    }
}
