// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/square.rs
//
// Crop square domain model.

use crate::error::{BoundsViolation, CropError, CropResult};

/// Square crop region in image coordinates.
///
/// Pure domain model - top-left origin, fractional pixels allowed.
/// Bounds are not enforced here; see [`CropSquare::check_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropSquare {
    pub x: f32,
    pub y: f32,
    pub side: f32,
}

impl CropSquare {
    pub fn new(x: f32, y: f32, side: f32) -> Self {
        Self { x, y, side }
    }

    /// Centered square whose side is `ratio` of the shorter image side.
    pub fn centered(width: u32, height: u32, ratio: f32) -> CropResult<Self> {
        if width == 0 || height == 0 {
            return Err(CropError::InvalidImageDimensions { width, height });
        }

        let (w, h) = (width as f32, height as f32);
        let side = (w * ratio).min(h * ratio);
        Ok(Self {
            x: w / 2.0 - side / 2.0,
            y: h / 2.0 - side / 2.0,
            side,
        })
    }

    /// Center of the square in image coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.side / 2.0, self.y + self.side / 2.0)
    }

    /// Side in whole pixels, truncating like a canvas size assignment.
    /// `None` when less than one pixel is left.
    pub fn pixel_side(&self) -> Option<u32> {
        if self.side >= 1.0 && self.side.is_finite() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(self.side as u32)
        } else {
            None
        }
    }

    /// Check that the square lies inside a `width` x `height` image.
    ///
    /// Rules are checked in order: x, y, side, right edge, bottom edge.
    /// The first violated rule is reported.
    pub fn check_bounds(&self, width: u32, height: u32) -> CropResult<()> {
        let violation = if self.x < 0.0 {
            Some(BoundsViolation::NegativeX)
        } else if self.y < 0.0 {
            Some(BoundsViolation::NegativeY)
        } else if self.side <= 0.0 || self.side.is_nan() {
            Some(BoundsViolation::NonPositiveSide)
        } else if self.x + self.side > width as f32 {
            Some(BoundsViolation::ExceedsWidth)
        } else if self.y + self.side > height as f32 {
            Some(BoundsViolation::ExceedsHeight)
        } else {
            None
        };

        match violation {
            Some(v) => Err(CropError::ConstraintOutOfBounds(v)),
            None => Ok(()),
        }
    }
}

/// Pointer position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorPoint {
    pub x: f32,
    pub y: f32,
}

impl CursorPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_landscape() {
        let sq = CropSquare::centered(800, 600, 0.75).unwrap();
        assert_eq!(sq.side, 450.0);
        assert_eq!(sq.x, 175.0);
        assert_eq!(sq.y, 75.0);
    }

    #[test]
    fn centered_portrait() {
        let sq = CropSquare::centered(300, 1000, 0.75).unwrap();
        assert_eq!(sq.side, 225.0);
        assert_eq!(sq.x, 37.5);
        assert_eq!(sq.y, 387.5);
    }

    #[test]
    fn centered_rejects_zero_dimensions() {
        assert_eq!(
            CropSquare::centered(0, 10, 0.75),
            Err(CropError::InvalidImageDimensions { width: 0, height: 10 })
        );
        assert!(CropSquare::centered(10, 0, 0.75).is_err());
    }

    #[test]
    fn bounds_in_order() {
        let check = |x, y, side| CropSquare::new(x, y, side).check_bounds(100, 80);

        assert_eq!(check(0.0, 0.0, 80.0), Ok(()));
        assert_eq!(
            check(-1.0, -1.0, 0.0),
            Err(CropError::ConstraintOutOfBounds(BoundsViolation::NegativeX))
        );
        assert_eq!(
            check(0.0, -1.0, 0.0),
            Err(CropError::ConstraintOutOfBounds(BoundsViolation::NegativeY))
        );
        assert_eq!(
            check(0.0, 0.0, 0.0),
            Err(CropError::ConstraintOutOfBounds(BoundsViolation::NonPositiveSide))
        );
        assert_eq!(
            check(30.0, 0.0, 75.0),
            Err(CropError::ConstraintOutOfBounds(BoundsViolation::ExceedsWidth))
        );
        assert_eq!(
            check(0.0, 10.0, 75.0),
            Err(CropError::ConstraintOutOfBounds(BoundsViolation::ExceedsHeight))
        );
    }

    #[test]
    fn pixel_side_truncates() {
        assert_eq!(CropSquare::new(10.7, 3.2, 99.9).pixel_side(), Some(99));
        assert_eq!(CropSquare::new(0.0, 0.0, 0.5).pixel_side(), None);
        assert_eq!(CropSquare::new(0.0, 0.0, f32::INFINITY).pixel_side(), None);
    }
}
