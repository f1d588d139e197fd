use crate::error::SurfaceError;
use crate::surface::{DrawingSurface, FontSpec, ShapeStyle, StrokeStyle, TextStyle};
use crate::{Bounds, Point};

/// Every glyph advances by half an em.
pub const ADVANCE_EM: f32 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear,
    RoundedRect { bounds: Bounds, radius: f32 },
    Segment { from: Point, to: Point },
    Text { text: String, anchor: Point, size: f32 },
}

/// Records paint calls instead of rasterizing them.
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<(String, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Text { text, size, .. } => Some((text.clone(), *size)),
                _ => None,
            })
            .collect()
    }

    pub fn segments(&self) -> Vec<(Point, Point)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Segment { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(Call::Clear);
    }

    fn draw_rounded_rect(&mut self, bounds: Bounds, radius: f32, _style: &ShapeStyle) {
        self.calls.push(Call::RoundedRect { bounds, radius });
    }

    fn stroke_segment(&mut self, from: Point, to: Point, _style: &StrokeStyle) {
        self.calls.push(Call::Segment { from, to });
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            anchor,
            size: style.font.size,
        });
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * ADVANCE_EM
    }

    fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        Ok(format!("{:?}", self.calls).into_bytes())
    }
}
