use log::trace;

use crate::surface::{DrawingSurface, StrokeStyle};
use crate::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
}

/// Device-independent pointer input in surface-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(point: Point, phase: PointerPhase) -> Self {
        Self {
            x: point.x,
            y: point.y,
            phase,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.is_finite() {
        return None;
    }
    Some(point)
}

/// Maps a client-space position onto the surface whose bounding box starts
/// at `origin`.
pub fn to_local(client: Point, origin: Point) -> Option<Point> {
    normalize_point(Point::new(client.x - origin.x, client.y - origin.y))
}

/// Turns a drag gesture into independent straight segments. Only the last
/// point of the active stroke is kept.
#[derive(Clone, Debug)]
pub struct FreehandCapture {
    style: StrokeStyle,
    last: Option<Point>,
}

impl Default for FreehandCapture {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

impl FreehandCapture {
    pub fn new(style: StrokeStyle) -> Self {
        Self { style, last: None }
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Starts a stroke at `point`, abandoning any stroke already in flight.
    pub fn begin(&mut self, point: Point) {
        let Some(point) = normalize_point(point) else {
            return;
        };
        if self.last.is_some() {
            trace!("stroke restarted at ({}, {})", point.x, point.y);
        }
        self.last = Some(point);
    }

    /// Strokes from the last point to `point`. Returns whether the surface
    /// was painted.
    pub fn extend<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S, point: Point) -> bool {
        let Some(point) = normalize_point(point) else {
            return false;
        };
        let Some(last) = self.last else {
            return false;
        };
        surface.stroke_segment(last, point, &self.style);
        self.last = Some(point);
        true
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn handle<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: PointerEvent,
    ) -> bool {
        match event.phase {
            PointerPhase::Down => {
                self.begin(event.point());
                false
            }
            PointerPhase::Move => self.extend(surface, event.point()),
            PointerPhase::Up | PointerPhase::Leave => {
                self.end();
                false
            }
        }
    }
}
