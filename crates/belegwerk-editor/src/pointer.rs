// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified pointer input. Mouse and touch both arrive as pointer events; a
// touch is just a pointer whose `is_primary` flag marks the first finger.

use belegwerk_core::geometry::DisplayPoint;

/// Phase of a single-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Mouse button pressed or finger touched down.
    Down,
    Move,
    /// Button released or finger lifted.
    Up,
    /// Pointer left the drawing surface.
    Leave,
    /// Platform aborted the gesture (e.g. touch interrupted).
    Cancel,
}

/// One pointer sample in display coordinates relative to the surface origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: DisplayPoint,
    /// Platform pointer identifier; distinguishes simultaneous touches.
    pub pointer_id: i32,
    /// False for the second and later fingers of a multi-touch.
    pub is_primary: bool,
}

impl PointerEvent {
    /// Primary mouse-style event, the common case.
    pub fn primary(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: DisplayPoint::new(x, y),
            pointer_id: 1,
            is_primary: true,
        }
    }
}
