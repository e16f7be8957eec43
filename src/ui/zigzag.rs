// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/zigzag.rs
//
// Crop boundary geometry: zigzag and dotted borders.

use resvg::tiny_skia::{self, PathBuilder};

use crate::constant::DOT_INDENT;

pub type Point = (f32, f32);

/// Trimmed edge length and tooth count for one zigzag edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZigzagLayout {
    /// Drawn length, a whole number of `2 * tooth` periods.
    pub length: f32,
    /// Inset applied at each end so the trimmed part is centered.
    pub half_remainder: f32,
    pub teeth: u32,
}

impl ZigzagLayout {
    /// Layout for an edge of `edge` pixels with teeth of `tooth` pixels.
    /// One tooth length is reserved at each end for the corner connectors.
    pub fn new(edge: f32, tooth: f32) -> Self {
        if tooth <= 0.0 || tooth.is_nan() {
            return Self {
                length: 0.0,
                half_remainder: 0.0,
                teeth: 0,
            };
        }

        let period = tooth * 2.0;
        let usable = (edge - period).max(0.0);
        let remainder = usable % period;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let teeth = ((usable - remainder) / period).round() as u32;

        Self {
            length: teeth as f32 * period,
            half_remainder: remainder / 2.0,
            teeth,
        }
    }
}

/// Polyline of one edge: start point followed by two points per tooth.
///
/// `turn_over` mirrors the starting phase; it is used for the bottom and
/// right edges so that opposite edges stay consistent.
pub fn zigzag_edge(
    origin: Point,
    teeth: u32,
    size: f32,
    vertical: bool,
    turn_over: bool,
) -> Vec<Point> {
    let (x, y) = origin;
    let mut points = Vec::with_capacity(1 + teeth as usize * 2);

    let start = match (turn_over, vertical) {
        (false, _) => (x, y),
        (true, true) => (x + size, y),
        (true, false) => (x, y + size),
    };
    points.push(start);

    let first = if vertical { y + size } else { x + size };
    for i in 0..teeth {
        let position = first + i as f32 * size * 2.0;

        let peak = match (turn_over, vertical) {
            (false, true) => (x + size, position),
            (false, false) => (position, y + size),
            (true, true) => (x, position),
            (true, false) => (position, y),
        };
        let valley = match (turn_over, vertical) {
            (false, true) => (x, position + size),
            (false, false) => (position + size, y),
            (true, true) => (x + size, position + size),
            (true, false) => (position + size, y + size),
        };

        points.push(peak);
        points.push(valley);
    }

    points
}

/// The four edges of a zigzag boundary plus the corner connectors.
#[derive(Debug, Clone, PartialEq)]
pub struct ZigzagBorder {
    pub layout: ZigzagLayout,
    pub top: Vec<Point>,
    pub bottom: Vec<Point>,
    pub left: Vec<Point>,
    pub right: Vec<Point>,
    pub connectors: [(Point, Point); 4],
}

impl ZigzagBorder {
    /// Boundary of the square with top-left `(x, y)` and side `side`.
    pub fn new(x: f32, y: f32, side: f32, line_width: f32, tooth: f32) -> Self {
        let layout = ZigzagLayout::new(side, tooth);
        let inset = tooth + layout.half_remainder;
        let length = layout.length;

        let top = (x + inset, y);
        let bottom = (x + inset, y + side - line_width / 2.0 - tooth);
        let left = (x, y + inset);
        let right = (x + side - line_width / 2.0 - tooth, y + inset);

        let connectors = [
            (top, left),
            ((top.0 + length, top.1), (right.0 + tooth, right.1)),
            ((left.0, left.1 + length), (bottom.0, bottom.1 + tooth)),
            (
                (right.0 + tooth, right.1 + length),
                (bottom.0 + length, bottom.1 + tooth),
            ),
        ];

        Self {
            layout,
            top: zigzag_edge(top, layout.teeth, tooth, false, false),
            bottom: zigzag_edge(bottom, layout.teeth, tooth, false, true),
            left: zigzag_edge(left, layout.teeth, tooth, true, false),
            right: zigzag_edge(right, layout.teeth, tooth, true, true),
            connectors,
        }
    }

    /// Stroke path of the whole boundary.
    pub fn to_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();

        for edge in [&self.top, &self.bottom, &self.left, &self.right] {
            let mut points = edge.iter();
            if let Some(&(sx, sy)) = points.next() {
                pb.move_to(sx, sy);
                for &(px, py) in points {
                    pb.line_to(px, py);
                }
            }
        }

        for ((ax, ay), (bx, by)) in self.connectors {
            pb.move_to(ax, ay);
            pb.line_to(bx, by);
        }

        pb.finish()
    }
}

/// Dot centers of a dotted boundary; dots have radius `line_width / 2`.
pub fn dotted_border(x: f32, y: f32, side: f32, line_width: f32) -> Vec<Point> {
    let radius = line_width / 2.0;
    let mut dots = Vec::new();

    let lines = [
        ((x, y), false),
        ((x, y + side - radius), false),
        ((x, y), true),
        ((x + side - radius, y), true),
    ];

    for ((lx, ly), vertical) in lines {
        let mut position = if vertical { ly } else { lx };
        let end = position + side;
        let step = radius + DOT_INDENT;
        if step <= 0.0 || step.is_nan() {
            continue;
        }

        while position + radius < end {
            dots.push(if vertical { (lx, position) } else { (position, ly) });
            position += step;
        }
    }

    dots
}
