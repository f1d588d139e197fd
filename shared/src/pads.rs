use log::trace;

use crate::capture::{FreehandCapture, PointerEvent};
use crate::error::SurfaceError;
use crate::export::{export, ExportArtifact, Feature};
use crate::stamp::{render_stamp, StampFields, StampLayout};
use crate::surface::{DrawingSurface, StrokeStyle};

/// Standalone freehand signature.
pub struct SignaturePad<S> {
    surface: Option<S>,
    capture: FreehandCapture,
}

impl<S: DrawingSurface> Default for SignaturePad<S> {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

impl<S: DrawingSurface> SignaturePad<S> {
    pub fn new(pen: StrokeStyle) -> Self {
        Self {
            surface: None,
            capture: FreehandCapture::new(pen),
        }
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            trace!("pointer ignored: no surface");
            return false;
        };
        self.capture.handle(surface, event)
    }

    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        self.capture.end();
    }

    pub fn download(&self) -> Result<Option<ExportArtifact>, SurfaceError> {
        match &self.surface {
            Some(surface) => export(surface, Feature::Signature).map(Some),
            None => Ok(None),
        }
    }
}

/// Standalone stamp generator. Download exports whatever the surface holds,
/// a blank surface included.
pub struct StampPad<S> {
    surface: Option<S>,
    layout: StampLayout,
    fields: StampFields,
}

impl<S: DrawingSurface> Default for StampPad<S> {
    fn default() -> Self {
        Self::new(StampLayout::default())
    }
}

impl<S: DrawingSurface> StampPad<S> {
    pub fn new(layout: StampLayout) -> Self {
        Self {
            surface: None,
            layout,
            fields: StampFields::default(),
        }
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn fields_mut(&mut self) -> &mut StampFields {
        &mut self.fields
    }

    pub fn generate(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            trace!("generate ignored: no surface");
            return;
        };
        render_stamp(surface, &self.fields, &self.layout);
    }

    pub fn download(&self) -> Result<Option<ExportArtifact>, SurfaceError> {
        match &self.surface {
            Some(surface) => export(surface, Feature::Stamp).map(Some),
            None => Ok(None),
        }
    }
}
