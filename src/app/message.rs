// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Engine messages: pointer input and display ticks delivered by the host.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineMessage {
    // Pointer input (screen coordinates).
    PointerPressed { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerReleased,

    /// The input surface lost visibility or focus; ends any drag.
    Cancel,

    /// Display refresh tick.
    Frame,
}
