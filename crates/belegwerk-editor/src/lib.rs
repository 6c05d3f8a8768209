// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// belegwerk-editor — Interactive quadrilateral editor.
//
// Lets a user drag the four corners of a detected receipt outline over the
// displayed photo. Geometry is stored in image space; all pointer input
// arrives in display space and is mapped through `belegwerk_core::geometry`.

pub mod editor;
pub mod pointer;
pub mod surface;

pub use editor::ContourEditor;
pub use pointer::{PointerEvent, PointerPhase};
pub use surface::{Color, DrawCommand, DrawList, Surface};
