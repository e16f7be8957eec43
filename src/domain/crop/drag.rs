// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/drag.rs
//
// Drag state machine: turns pointer motion into crop square deltas.

use super::square::CursorPoint;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Last seen pointer position while the drag is active.
    Dragging(CursorPoint),
}

/// Offset to apply to the crop square for one pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDelta {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn cursor(&self) -> Option<CursorPoint> {
        match self.state {
            DragState::Dragging(point) => Some(point),
            DragState::Idle => None,
        }
    }

    /// Pointer pressed on the drawing surface. Returns `true` when this
    /// entered drag mode; a press while already dragging only moves the anchor.
    pub fn press(&mut self, x: f32, y: f32) -> bool {
        let entered = !self.is_dragging();
        self.state = DragState::Dragging(CursorPoint::new(x, y));
        entered
    }

    /// Pointer moved to `(x, y)`.
    ///
    /// The image moves under a fixed viewport, so the delta is the previous
    /// position minus the current one. The stored point advances every call.
    pub fn drag_to(&mut self, x: f32, y: f32) -> Option<DragDelta> {
        let DragState::Dragging(previous) = self.state else {
            return None;
        };

        self.state = DragState::Dragging(CursorPoint::new(x, y));
        Some(DragDelta {
            dx: previous.x - x,
            dy: previous.y - y,
        })
    }

    /// Pointer released, or the drag was cancelled. Returns `true` when a
    /// drag was actually ended.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}
