mod capture;
mod composite;
mod error;
mod export;
mod pads;
#[cfg(feature = "raster")]
mod raster;
mod stamp;
mod surface;
#[cfg(test)]
mod testing;

use serde::{Deserialize, Serialize};

pub use capture::{normalize_point, to_local, FreehandCapture, PointerEvent, PointerPhase};
pub use composite::{Composite, CompositeState};
pub use error::SurfaceError;
pub use export::{decode_png_data_url, export, ExportArtifact, Feature};
pub use pads::{SignaturePad, StampPad};
#[cfg(feature = "raster")]
pub use raster::RasterSurface;
pub use stamp::{render_stamp, wrap_description, StampFields, StampLayout, TextLine};
pub use surface::{
    Color, DrawingSurface, FontSpec, FontWeight, LineCap, ShapeStyle, StrokeStyle,
    TextStyle,
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}
