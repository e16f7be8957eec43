// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Engine configuration: boundary style, colors and caption settings.

use std::path::PathBuf;

use crate::constant::{
    BORDER_COLOR, CAPTION_COLOR, CAPTION_FONT_FAMILY, CAPTION_FONT_SIZE, INITIAL_SIDE_RATIO,
    LINE_WIDTH, OVERLAY_ALPHA, TOOTH_SIZE,
};

/// How the crop boundary is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Zigzag,
    Dotted,
}

/// Configuration for one crop engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Initial crop side as a fraction of the shorter image side.
    pub initial_side_ratio: f32,
    /// Boundary stroke width in pixels.
    pub line_width: f32,
    /// Zigzag tooth size in pixels.
    pub tooth_size: f32,
    pub border_style: BorderStyle,
    /// Boundary color as straight RGBA.
    pub border_color: [u8; 4],
    /// Opacity of the black overlay (0.0 - 1.0).
    pub overlay_alpha: f32,
    pub caption_font_size: f32,
    pub caption_font_family: String,
    /// Caption color as straight RGBA.
    pub caption_color: [u8; 4],
    /// Load system fonts for the caption. Without fonts the caption is skipped.
    pub load_system_fonts: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_side_ratio: INITIAL_SIDE_RATIO,
            line_width: LINE_WIDTH,
            tooth_size: TOOTH_SIZE,
            border_style: BorderStyle::Zigzag,
            border_color: BORDER_COLOR,
            overlay_alpha: OVERLAY_ALPHA,
            caption_font_size: CAPTION_FONT_SIZE,
            caption_font_family: CAPTION_FONT_FAMILY.to_string(),
            caption_color: CAPTION_COLOR,
            load_system_fonts: true,
        }
    }
}

/// Directory exported crops are written to when no output path is given.
pub fn default_output_dir() -> Option<PathBuf> {
    dirs::picture_dir().or_else(dirs::home_dir)
}
