// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mod.rs
//
// Crop domain: square geometry, model and drag state.

mod drag;
mod model;
mod square;

pub use drag::{DragController, DragDelta, DragState};
pub use model::CropModel;
pub use square::{CropSquare, CursorPoint};
