// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour editor — owns a four-point outline, draws it over the photo, and
// turns pointer gestures into vertex moves.

use belegwerk_core::error::Result;
use belegwerk_core::geometry::{self, DisplayPoint};
use belegwerk_core::{Contour, ImagePayload};
use tracing::{debug, instrument, trace};

use crate::pointer::{PointerEvent, PointerPhase};
use crate::surface::{Color, Surface};

/// Default hit-test radius in display pixels.
pub const DEFAULT_PICK_RADIUS: f64 = 30.0;

const OUTLINE_WIDTH: f64 = 3.0;
const HANDLE_OUTER_RADIUS: f64 = 12.0;
const HANDLE_INNER_RADIUS: f64 = 8.0;

/// The vertex currently being dragged and the pointer dragging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDrag {
    vertex: usize,
    pointer_id: Option<i32>,
}

/// Interactive editor for a single receipt outline.
///
/// The editor never owns the workflow: every edit is handed back to the
/// caller as the full updated [`Contour`], which the caller forwards to the
/// workflow controller.
///
/// With no contour loaded the editor still draws the photo but no overlay,
/// and hit testing always misses.
#[derive(Debug, Clone)]
pub struct ContourEditor {
    /// Native `(width, height)` of the photo.
    image_size: (u32, u32),
    container_width: f64,
    pick_radius: f64,
    contour: Option<Contour>,
    active: Option<ActiveDrag>,
}

impl ContourEditor {
    // -- Construction ---------------------------------------------------------

    pub fn new(image_size: (u32, u32), container_width: f64, contour: Option<Contour>) -> Self {
        Self {
            image_size,
            container_width,
            pick_radius: DEFAULT_PICK_RADIUS,
            contour,
            active: None,
        }
    }

    /// Build an editor for `image`, reading its native size from the payload.
    #[instrument(skip(image, contour), fields(payload_len = image.len()))]
    pub fn for_image(
        image: &ImagePayload,
        container_width: f64,
        contour: Option<Contour>,
    ) -> Result<Self> {
        let size = image.dimensions()?;
        debug!(width = size.0, height = size.1, container_width, "contour editor created");
        Ok(Self::new(size, container_width, contour))
    }

    pub fn with_pick_radius(mut self, pick_radius: f64) -> Self {
        self.pick_radius = pick_radius;
        self
    }

    // -- Accessors ------------------------------------------------------------

    pub fn contour(&self) -> Option<&Contour> {
        self.contour.as_ref()
    }

    pub fn active_vertex(&self) -> Option<usize> {
        self.active.map(|a| a.vertex)
    }

    /// Current display scale: `min(1, container_width / image_width)`.
    pub fn scale(&self) -> f64 {
        geometry::fit_scale(self.container_width, f64::from(self.image_size.0))
    }

    /// Size the photo is drawn at.
    pub fn display_size(&self) -> (f64, f64) {
        geometry::display_size(self.image_size, self.scale())
    }

    // -- External updates -----------------------------------------------------

    /// Track a new container width (window resize). Stored geometry is in
    /// image space, so nothing else changes.
    pub fn set_container_width(&mut self, container_width: f64) {
        self.container_width = container_width;
    }

    // -- Rendering ------------------------------------------------------------

    /// Draw the photo, the closed outline, and one numbered handle per
    /// vertex. Call again whenever the image, contour, or container changes.
    pub fn render<S: Surface>(&self, surface: &mut S, image: &ImagePayload) {
        let scale = self.scale();
        let (width, height) = self.display_size();
        surface.set_size(width, height);
        surface.draw_image(image, width, height);

        let Some(contour) = self.contour.as_ref() else {
            return;
        };
        let projected = geometry::project_contour(contour, scale);
        surface.stroke_polygon(&projected, Color::ACCENT, OUTLINE_WIDTH);

        for (index, &center) in projected.iter().enumerate() {
            surface.fill_circle(center, HANDLE_OUTER_RADIUS, Color::ACCENT);
            surface.fill_circle(center, HANDLE_INNER_RADIUS, Color::WHITE);
            surface.fill_text(&(index + 1).to_string(), center, Color::ACCENT);
        }
    }

    // -- Hit testing ----------------------------------------------------------

    /// Index of the vertex nearest `point` within the pick radius.
    ///
    /// Comparison happens in display space. On an exact tie the lower index
    /// wins.
    pub fn hit_test(&self, point: DisplayPoint) -> Option<usize> {
        let contour = self.contour.as_ref()?;
        let projected = geometry::project_contour(contour, self.scale());

        let mut best: Option<(usize, f64)> = None;
        for (index, vertex) in projected.iter().enumerate() {
            let distance = vertex.distance_to(point);
            if distance >= self.pick_radius {
                continue;
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    // -- Dragging -------------------------------------------------------------

    /// Start dragging `vertex`. Refused (returns `false`) while another drag
    /// is active, with no contour loaded, or for an out-of-range index.
    pub fn begin_drag(&mut self, vertex: usize) -> bool {
        self.begin_drag_with(vertex, None)
    }

    fn begin_drag_with(&mut self, vertex: usize, pointer_id: Option<i32>) -> bool {
        if self.active.is_some() {
            debug!(vertex, "begin_drag refused: a vertex is already active");
            return false;
        }
        match self.contour {
            Some(contour) if contour.vertex(vertex).is_some() => {
                debug!(vertex, "drag started");
                self.active = Some(ActiveDrag { vertex, pointer_id });
                true
            }
            _ => false,
        }
    }

    /// Move the active vertex to the image-space position under `point`.
    ///
    /// Returns the updated outline to forward to the controller, or `None`
    /// when nothing is being dragged.
    pub fn update_drag(&mut self, point: DisplayPoint) -> Option<Contour> {
        let active = self.active?;
        let contour = self.contour?;
        let target = geometry::to_image(point, self.scale());
        let updated = contour.with_vertex(active.vertex, target)?;
        trace!(vertex = active.vertex, x = target.x, y = target.y, "vertex moved");
        self.contour = Some(updated);
        Some(updated)
    }

    /// Release the active vertex. No snapping is applied.
    pub fn end_drag(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(vertex = active.vertex, "drag ended");
        }
    }

    // -- Pointer input --------------------------------------------------------

    /// Feed one pointer sample through the begin/update/end gesture.
    ///
    /// Only the primary pointer can start a drag, and only the pointer that
    /// started it can move or end it. Returns the updated outline on every
    /// move of an active drag.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Contour> {
        match event.phase {
            PointerPhase::Down => {
                if !event.is_primary {
                    return None;
                }
                if let Some(vertex) = self.hit_test(event.position) {
                    self.begin_drag_with(vertex, Some(event.pointer_id));
                }
                None
            }
            PointerPhase::Move => {
                if self.owns(event) {
                    self.update_drag(event.position)
                } else {
                    None
                }
            }
            PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel => {
                if self.owns(event) {
                    self.end_drag();
                }
                None
            }
        }
    }

    fn owns(&self, event: PointerEvent) -> bool {
        match self.active {
            Some(ActiveDrag {
                pointer_id: Some(id),
                ..
            }) => id == event.pointer_id,
            Some(ActiveDrag {
                pointer_id: None, ..
            }) => event.is_primary,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};
    use belegwerk_core::Point;

    fn receipt() -> Contour {
        Contour::new([
            Point::new(10.0, 10.0),
            Point::new(100.0, 10.0),
            Point::new(100.0, 200.0),
            Point::new(10.0, 200.0),
        ])
    }

    /// 2000px wide photo in a 1000px container: scale 0.5.
    fn half_scale_editor() -> ContourEditor {
        ContourEditor::new((2000, 1000), 1000.0, Some(receipt()))
    }

    fn payload() -> ImagePayload {
        ImagePayload::from_data_uri("data:image/png;base64,AAAA")
    }

    #[test]
    fn scale_is_capped_at_one() {
        let editor = ContourEditor::new((400, 300), 1200.0, None);
        assert_eq!(editor.scale(), 1.0);
        assert_eq!(half_scale_editor().scale(), 0.5);
    }

    #[test]
    fn hit_test_misses_outside_radius() {
        let editor = half_scale_editor();
        // Vertex 0 projects to (5, 5); 30px below it is exactly on the radius.
        assert_eq!(editor.hit_test(DisplayPoint::new(5.0, 35.0)), None);
        assert_eq!(editor.hit_test(DisplayPoint::new(300.0, 300.0)), None);
    }

    #[test]
    fn hit_test_finds_single_vertex() {
        let editor = half_scale_editor();
        assert_eq!(editor.hit_test(DisplayPoint::new(7.0, 9.0)), Some(0));
        assert_eq!(editor.hit_test(DisplayPoint::new(48.0, 98.0)), Some(2));
    }

    #[test]
    fn hit_test_prefers_strictly_closer() {
        // Vertices 20px apart in display space, both within radius.
        let contour = Contour::new([
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(500.0, 500.0),
            Point::new(0.0, 500.0),
        ]);
        let editor = ContourEditor::new((800, 800), 800.0, Some(contour));
        assert_eq!(editor.hit_test(DisplayPoint::new(14.0, 0.0)), Some(1));
        assert_eq!(editor.hit_test(DisplayPoint::new(6.0, 0.0)), Some(0));
    }

    #[test]
    fn hit_test_tie_goes_to_first_index() {
        let contour = Contour::new([
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(500.0, 500.0),
            Point::new(0.0, 500.0),
        ]);
        let editor = ContourEditor::new((800, 800), 800.0, Some(contour));
        assert_eq!(editor.hit_test(DisplayPoint::new(10.0, 0.0)), Some(0));
    }

    #[test]
    fn no_contour_means_no_hits_and_no_overlay() {
        let mut editor = ContourEditor::new((2000, 1000), 1000.0, None);
        assert_eq!(editor.hit_test(DisplayPoint::new(5.0, 5.0)), None);
        assert!(!editor.begin_drag(0));

        let mut list = DrawList::new();
        editor.render(&mut list, &payload());
        assert_eq!(
            list.commands(),
            &[DrawCommand::Image {
                width: 1000.0,
                height: 500.0
            }]
        );
    }

    #[test]
    fn drag_moves_only_the_active_vertex() {
        let mut editor = half_scale_editor();
        let original = receipt();
        assert!(editor.begin_drag(1));
        let updated = editor
            .update_drag(DisplayPoint::new(60.0, 12.5))
            .expect("drag active");
        editor.end_drag();

        assert_eq!(updated.vertex(1), Some(Point::new(120.0, 25.0)));
        for i in [0, 2, 3] {
            assert_eq!(
                updated.vertex(i).map(|p| (p.x.to_bits(), p.y.to_bits())),
                original.vertex(i).map(|p| (p.x.to_bits(), p.y.to_bits()))
            );
        }
        assert_eq!(editor.contour(), Some(&updated));
        assert_eq!(editor.active_vertex(), None);
    }

    #[test]
    fn every_move_emits_an_update() {
        let mut editor = half_scale_editor();
        editor.begin_drag(3);
        let first = editor.update_drag(DisplayPoint::new(10.0, 90.0));
        let second = editor.update_drag(DisplayPoint::new(11.0, 91.0));
        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn second_begin_drag_is_refused() {
        let mut editor = half_scale_editor();
        assert!(editor.begin_drag(0));
        assert!(!editor.begin_drag(2));
        assert_eq!(editor.active_vertex(), Some(0));
        editor.end_drag();
        assert!(editor.begin_drag(2));
    }

    #[test]
    fn update_without_drag_is_noop() {
        let mut editor = half_scale_editor();
        assert_eq!(editor.update_drag(DisplayPoint::new(1.0, 1.0)), None);
        assert_eq!(editor.contour(), Some(&receipt()));
    }

    #[test]
    fn pointer_gesture_round_trip() {
        let mut editor = half_scale_editor();
        assert_eq!(
            editor.handle_pointer(PointerEvent::primary(PointerPhase::Down, 50.0, 5.0)),
            None
        );
        assert_eq!(editor.active_vertex(), Some(1));

        let moved = editor
            .handle_pointer(PointerEvent::primary(PointerPhase::Move, 70.0, 20.0))
            .expect("move emits contour");
        assert_eq!(moved.vertex(1), Some(Point::new(140.0, 40.0)));

        editor.handle_pointer(PointerEvent::primary(PointerPhase::Leave, 70.0, 20.0));
        assert_eq!(editor.active_vertex(), None);
        assert_eq!(
            editor.handle_pointer(PointerEvent::primary(PointerPhase::Move, 0.0, 0.0)),
            None
        );
    }

    #[test]
    fn secondary_touch_is_ignored() {
        let mut editor = half_scale_editor();
        let first = PointerEvent {
            phase: PointerPhase::Down,
            position: DisplayPoint::new(5.0, 5.0),
            pointer_id: 7,
            is_primary: true,
        };
        editor.handle_pointer(first);
        assert_eq!(editor.active_vertex(), Some(0));

        let second_finger = PointerEvent {
            phase: PointerPhase::Move,
            position: DisplayPoint::new(300.0, 300.0),
            pointer_id: 8,
            is_primary: false,
        };
        assert_eq!(editor.handle_pointer(second_finger), None);

        let lift_second = PointerEvent {
            phase: PointerPhase::Up,
            ..second_finger
        };
        editor.handle_pointer(lift_second);
        assert_eq!(editor.active_vertex(), Some(0));
    }

    #[test]
    fn render_draws_outline_and_numbered_handles() {
        let editor = half_scale_editor();
        let mut list = DrawList::new();
        editor.render(&mut list, &payload());

        assert_eq!((list.width(), list.height()), (1000.0, 500.0));
        let polygons: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Polygon { points, .. } => Some(points.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0][2], DisplayPoint::new(50.0, 100.0));

        let labels: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["1", "2", "3", "4"]);

        let circles = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 8);
    }

    #[test]
    fn resize_keeps_image_space_geometry() {
        let mut editor = half_scale_editor();
        editor.set_container_width(500.0);
        assert_eq!(editor.scale(), 0.25);
        // Vertex 2 at (100, 200) now projects to (25, 50).
        assert_eq!(editor.hit_test(DisplayPoint::new(25.0, 50.0)), Some(2));
        assert_eq!(editor.contour(), Some(&receipt()));
    }
}
