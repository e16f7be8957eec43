// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/mod.rs
//
// Rendering: coordinate frames, boundary geometry and the redraw pipeline.

pub mod caption;
pub mod overlay;
pub mod pipeline;
pub mod surface;
pub mod transform;
pub mod zigzag;

pub use pipeline::RedrawPipeline;
pub use surface::{DrawingSurface, SurfaceId};
pub use transform::CenterTransform;
