use log::{debug, trace};

use crate::capture::{FreehandCapture, PointerEvent};
use crate::error::SurfaceError;
use crate::export::{export, ExportArtifact, Feature};
use crate::stamp::{render_stamp, StampFields, StampLayout};
use crate::surface::{DrawingSurface, StrokeStyle};
use crate::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeState {
    Blank,
    StampRendered,
    SigningActive,
}

/// Signature drawn on top of a generated stamp.
///
/// Strokes reach the surface only in [`CompositeState::SigningActive`].
/// Generating (or clearing, which is the same thing) repaints the whole
/// stamp, so no stroke survives it.
pub struct Composite<S> {
    surface: Option<S>,
    layout: StampLayout,
    fields: StampFields,
    capture: FreehandCapture,
    state: CompositeState,
}

impl<S: DrawingSurface> Default for Composite<S> {
    fn default() -> Self {
        Self::new(StampLayout::default(), StrokeStyle::default())
    }
}

impl<S: DrawingSurface> Composite<S> {
    pub fn new(layout: StampLayout, pen: StrokeStyle) -> Self {
        Self {
            surface: None,
            layout,
            fields: StampFields::default(),
            capture: FreehandCapture::new(pen),
            state: CompositeState::Blank,
        }
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn state(&self) -> CompositeState {
        self.state
    }

    /// Form edits only take effect on the next generate or clear.
    pub fn fields_mut(&mut self) -> &mut StampFields {
        &mut self.fields
    }

    /// Clear and Download are only offered once a stamp exists.
    pub fn can_export(&self) -> bool {
        self.state != CompositeState::Blank
    }

    pub fn generate(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            trace!("generate ignored: no surface");
            return;
        };
        render_stamp(surface, &self.fields, &self.layout);
        self.capture.end();
        self.transition(CompositeState::StampRendered);
    }

    /// Arms the surface for signing. The click point is only logged: it does
    /// not seed the stroke and nothing is painted. Signing starts with the
    /// next pointer-down.
    pub fn activate(&mut self, point: Point) {
        if self.surface.is_none() || self.state != CompositeState::StampRendered {
            trace!("activate ignored in {:?}", self.state);
            return;
        }
        self.capture.end();
        debug!("signing armed at ({}, {})", point.x, point.y);
        self.transition(CompositeState::SigningActive);
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        if self.state != CompositeState::SigningActive {
            trace!("pointer {:?} dropped in {:?}", event.phase, self.state);
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        self.capture.handle(surface, event)
    }

    /// Erases the signature by regenerating the stamp from the current
    /// fields.
    pub fn clear(&mut self) {
        if self.state == CompositeState::Blank {
            trace!("clear ignored: nothing generated");
            return;
        }
        self.generate();
    }

    pub fn download(&self) -> Result<Option<ExportArtifact>, SurfaceError> {
        if !self.can_export() {
            return Ok(None);
        }
        match &self.surface {
            Some(surface) => export(surface, Feature::SignatureOnStamp).map(Some),
            None => Ok(None),
        }
    }

    fn transition(&mut self, next: CompositeState) {
        if self.state != next {
            debug!("composite {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PointerPhase;
    use crate::testing::RecordingSurface;

    fn composite() -> Composite<RecordingSurface> {
        let mut composite = Composite::default();
        composite.attach(RecordingSurface::new(300, 300));
        *composite.fields_mut() = StampFields::new("acme corp", "12345", "");
        composite
    }

    fn drag(composite: &mut Composite<RecordingSurface>, points: &[(f32, f32)]) {
        let (x, y) = points[0];
        composite.pointer(PointerEvent::new(Point::new(x, y), PointerPhase::Down));
        for &(x, y) in &points[1..] {
            composite.pointer(PointerEvent::new(Point::new(x, y), PointerPhase::Move));
        }
        composite.pointer(PointerEvent::new(Point::new(x, y), PointerPhase::Up));
    }

    fn segment_count(composite: &Composite<RecordingSurface>) -> usize {
        composite.surface().map(|s| s.segments().len()).unwrap_or(0)
    }

    #[test]
    fn blank_ignores_activate_clear_and_download() {
        let mut composite = composite();
        composite.activate(Point::new(10.0, 10.0));
        assert_eq!(composite.state(), CompositeState::Blank);
        composite.clear();
        assert_eq!(composite.state(), CompositeState::Blank);
        assert!(composite.download().unwrap().is_none());
        assert!(!composite.can_export());
        assert!(composite.surface().unwrap().calls.is_empty());
    }

    #[test]
    fn strokes_need_activation() {
        let mut composite = composite();
        composite.generate();
        assert_eq!(composite.state(), CompositeState::StampRendered);

        drag(&mut composite, &[(50.0, 50.0), (60.0, 60.0)]);
        assert_eq!(segment_count(&composite), 0);

        composite.activate(Point::new(50.0, 50.0));
        assert_eq!(composite.state(), CompositeState::SigningActive);
        assert_eq!(segment_count(&composite), 0);

        drag(&mut composite, &[(50.0, 50.0), (60.0, 60.0), (70.0, 55.0)]);
        assert_eq!(segment_count(&composite), 2);
        assert_eq!(composite.state(), CompositeState::SigningActive);
    }

    #[test]
    fn hover_after_activation_does_not_paint() {
        let mut composite = composite();
        composite.generate();
        composite.activate(Point::new(50.0, 50.0));
        composite.pointer(PointerEvent::new(Point::new(80.0, 80.0), PointerPhase::Move));
        assert_eq!(segment_count(&composite), 0);
    }

    #[test]
    fn activation_click_does_not_start_the_stroke() {
        let mut composite = composite();
        composite.generate();
        composite.activate(Point::new(20.0, 20.0));
        drag(&mut composite, &[(100.0, 100.0), (120.0, 110.0)]);
        assert_eq!(
            composite.surface().unwrap().segments(),
            vec![(Point::new(100.0, 100.0), Point::new(120.0, 110.0))]
        );
    }

    #[test]
    fn regenerate_and_clear_discard_strokes() {
        for regenerate in [true, false] {
            let mut composite = composite();
            composite.generate();
            composite.activate(Point::ORIGIN);
            drag(&mut composite, &[(50.0, 50.0), (60.0, 60.0)]);
            assert_eq!(segment_count(&composite), 1);

            if regenerate {
                composite.generate();
            } else {
                composite.clear();
            }
            assert_eq!(composite.state(), CompositeState::StampRendered);
            assert_eq!(segment_count(&composite), 0);

            drag(&mut composite, &[(50.0, 50.0), (60.0, 60.0)]);
            assert_eq!(segment_count(&composite), 0);
        }
    }

    #[test]
    fn clear_uses_the_latest_fields() {
        let mut composite = composite();
        composite.generate();
        composite.fields_mut().name = "globex".to_string();
        composite.clear();
        let texts = composite.surface().unwrap().texts();
        assert_eq!(texts[0].0, "GLOBEX");
    }

    #[test]
    fn download_keeps_state() {
        let mut composite = composite();
        composite.generate();
        composite.activate(Point::ORIGIN);
        let artifact = composite.download().unwrap().unwrap();
        assert_eq!(artifact.filename, "signature_on_stamp.png");
        assert_eq!(composite.state(), CompositeState::SigningActive);
    }

    #[test]
    fn missing_surface_keeps_everything_blank() {
        let mut composite: Composite<RecordingSurface> = Composite::default();
        composite.generate();
        composite.activate(Point::ORIGIN);
        assert_eq!(composite.state(), CompositeState::Blank);
        assert!(composite.download().unwrap().is_none());
    }
}
