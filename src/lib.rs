// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Square crop selection engine.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
pub mod error;
pub mod ui;

pub use app::{
    CropEngine, EngineMessage, ExportedImage, HostContainer, HostHandle, ListenerTarget,
    MemoryHost, PointerEvent, SubscriptionId,
};
pub use config::{BorderStyle, EngineConfig};
pub use domain::crop::{CropModel, CropSquare, DragState};
pub use domain::document::{ImageSource, SourceImage, SourceKind};
pub use error::{BoundsViolation, CropError, CropResult};
