// SPDX-License-Identifier: GPL-3.0-or-later
// src/error.rs
//
// Error taxonomy of the crop engine.

use std::fmt;

/// Result alias used across the library.
pub type CropResult<T> = Result<T, CropError>;

/// Which bounds rule a crop square violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsViolation {
    NegativeX,
    NegativeY,
    NonPositiveSide,
    ExceedsWidth,
    ExceedsHeight,
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeX => write!(f, "x must not be negative"),
            Self::NegativeY => write!(f, "y must not be negative"),
            Self::NonPositiveSide => write!(f, "side must be positive"),
            Self::ExceedsWidth => write!(f, "x + side exceeds the image width"),
            Self::ExceedsHeight => write!(f, "y + side exceeds the image height"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CropError {
    /// The source image reports a zero width or height.
    InvalidImageDimensions { width: u32, height: u32 },
    /// The image source could not be read or decoded.
    ImageLoadFailed(String),
    /// A crop square lies partly outside the image or has no area.
    ConstraintOutOfBounds(BoundsViolation),
    /// The engine was removed from its container.
    Detached,
    /// PNG encoding of an export failed.
    Encode(String),
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImageDimensions { width, height } => {
                write!(f, "invalid image dimensions {width}x{height}")
            }
            Self::ImageLoadFailed(reason) => write!(f, "failed to load image: {reason}"),
            Self::ConstraintOutOfBounds(violation) => {
                write!(f, "crop square out of bounds: {violation}")
            }
            Self::Detached => write!(f, "crop engine has been removed"),
            Self::Encode(reason) => write!(f, "failed to encode image: {reason}"),
        }
    }
}

impl std::error::Error for CropError {}

impl From<image::ImageError> for CropError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoadFailed(err.to_string())
    }
}
