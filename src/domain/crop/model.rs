// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/model.rs
//
// Geometry model: owns the current crop square.

use super::square::CropSquare;
use crate::error::CropResult;

/// Sole owner and mutator of the crop square.
///
/// Updates are not bounds-checked. Whoever feeds values into the model
/// (forms, command line) validates them with [`CropSquare::check_bounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct CropModel {
    square: CropSquare,
}

impl CropModel {
    /// Centered default square for an image of the given natural size.
    pub fn initialize(width: u32, height: u32, side_ratio: f32) -> CropResult<Self> {
        let square = CropSquare::centered(width, height, side_ratio)?;
        Ok(Self { square })
    }

    pub fn get(&self) -> CropSquare {
        self.square
    }

    /// Overwrite the provided fields, keep the others.
    pub fn set(&mut self, x: Option<f32>, y: Option<f32>, side: Option<f32>) {
        if let Some(x) = x {
            self.square.x = x;
        }
        if let Some(y) = y {
            self.square.y = y;
        }
        if let Some(side) = side {
            self.square.side = side;
        }
    }

    /// Shift by the provided deltas; omitted deltas count as zero.
    pub fn shift(&mut self, dx: Option<f32>, dy: Option<f32>, dside: Option<f32>) {
        let current = self.square;
        self.set(
            Some(current.x + dx.unwrap_or(0.0)),
            Some(current.y + dy.unwrap_or(0.0)),
            Some(current.side + dside.unwrap_or(0.0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_omitted_fields() {
        let mut model = CropModel::initialize(400, 200, 0.75).unwrap();
        let before = model.get();

        model.set(Some(5.0), None, None);
        assert_eq!(model.get(), CropSquare::new(5.0, before.y, before.side));

        model.set(None, None, Some(42.0));
        assert_eq!(model.get(), CropSquare::new(5.0, before.y, 42.0));
    }

    #[test]
    fn set_does_not_validate() {
        let mut model = CropModel::initialize(100, 100, 0.75).unwrap();
        model.set(Some(-50.0), Some(500.0), Some(-3.0));
        assert_eq!(model.get(), CropSquare::new(-50.0, 500.0, -3.0));
    }

    #[test]
    fn shift_is_additive() {
        let deltas = [(3.0, -2.0, 1.0), (-7.0, 4.0, 0.0), (1.0, 1.0, -2.0), (10.0, 0.0, 5.0)];

        let mut stepped = CropModel::initialize(640, 480, 0.75).unwrap();
        let mut summed = stepped.clone();
        let start = stepped.get();

        for (dx, dy, ds) in deltas {
            stepped.shift(Some(dx), Some(dy), Some(ds));
        }

        let (sx, sy, ss) = deltas
            .iter()
            .fold((0.0, 0.0, 0.0), |acc, d| (acc.0 + d.0, acc.1 + d.1, acc.2 + d.2));
        summed.set(Some(start.x + sx), Some(start.y + sy), Some(start.side + ss));

        assert_eq!(stepped.get(), summed.get());
    }

    #[test]
    fn shift_defaults_missing_deltas_to_zero() {
        let mut model = CropModel::initialize(100, 100, 0.75).unwrap();
        let before = model.get();
        model.shift(Some(2.0), None, None);
        assert_eq!(model.get(), CropSquare::new(before.x + 2.0, before.y, before.side));
    }
}
