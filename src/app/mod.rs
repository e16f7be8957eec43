// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Engine layer: lifecycle, input handling, repaint scheduling and export.

pub mod engine;
pub mod export;
pub mod host;
pub mod message;
pub mod observer;
pub mod scheduler;

pub use engine::CropEngine;
pub use export::ExportedImage;
pub use host::{HostContainer, HostHandle, ListenerId, ListenerTarget, MemoryHost, PointerEvent};
pub use message::EngineMessage;
pub use observer::SubscriptionId;
