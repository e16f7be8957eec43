// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Engine constants that should not be changed by the user.

/// Initial crop side as a fraction of the shorter image side.
pub const INITIAL_SIDE_RATIO: f32 = 0.75;

/// Stroke width of the crop boundary in pixels.
pub const LINE_WIDTH: f32 = 4.0;

/// Tooth size of the zigzag boundary in pixels.
pub const TOOTH_SIZE: f32 = 10.0;

/// Gap between dots of the dotted boundary in pixels.
pub const DOT_INDENT: f32 = 10.0;

/// Boundary stroke color (#ffe753).
pub const BORDER_COLOR: [u8; 4] = [0xff, 0xe7, 0x53, 0xff];

/// Opacity of the dimming overlay outside the crop square.
pub const OVERLAY_ALPHA: f32 = 0.8;

/// Caption font size in pixels.
pub const CAPTION_FONT_SIZE: f32 = 12.0;

/// Caption font family.
pub const CAPTION_FONT_FAMILY: &str = "Open Sans";

/// Caption fill color.
pub const CAPTION_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Minimum pixmap size (prevents 0x0 surfaces).
pub const MIN_PIXMAP_SIZE: u32 = 1;

/// MIME type of exported images.
pub const EXPORT_MIME: &str = "image/png";

/// Suffix appended to the input stem for exported files.
pub const EXPORT_SUFFIX: &str = "-crop";
