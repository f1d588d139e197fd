use std::cell::Cell;

use fontdue::{Font, FontSettings};
use log::warn;
use tiny_skia::{
    FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Stroke, Transform,
};

use crate::error::SurfaceError;
use crate::surface::{
    Color, DrawingSurface, FontSpec, FontWeight, LineCap, ShapeStyle, StrokeStyle,
    TextStyle,
};
use crate::{Bounds, Point};

/// Advance used to measure text when no font is loaded.
const FALLBACK_ADVANCE_EM: f32 = 0.55;

/// In-memory surface backed by a tiny-skia pixmap. Text needs a TrueType
/// font; without one, runs are still measured but not painted.
pub struct RasterSurface {
    pixmap: Pixmap,
    regular: Option<Font>,
    bold: Option<Font>,
    warned_no_font: Cell<bool>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            regular: None,
            bold: None,
            warned_no_font: Cell::new(false),
        })
    }

    /// Loads the faces used for text. Bold runs use `regular` when no bold
    /// face is given.
    pub fn with_fonts(
        mut self,
        regular: &[u8],
        bold: Option<&[u8]>,
    ) -> Result<Self, SurfaceError> {
        self.regular = Some(load_font(regular)?);
        self.bold = bold.map(load_font).transpose()?;
        Ok(self)
    }

    /// Premultiplied RGBA8, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn font(&self, weight: FontWeight) -> Option<&Font> {
        match weight {
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontWeight::Regular => self.regular.as_ref(),
        }
    }

    fn warn_no_font(&self) {
        if !self.warned_no_font.replace(true) {
            warn!("no font loaded: text is measured but not painted");
        }
    }

    fn draw_coverage(
        &mut self,
        left: i32,
        top: i32,
        width: usize,
        height: usize,
        coverage: &[u8],
        color: Color,
    ) {
        let Some(mut glyph) = Pixmap::new(width as u32, height as u32) else {
            return;
        };
        for (pixel, &alpha) in glyph.pixels_mut().iter_mut().zip(coverage) {
            let a = scale(alpha, color.a);
            let (r, g, b) = (scale(color.r, a), scale(color.g, a), scale(color.b, a));
            if let Some(value) = PremultipliedColorU8::from_rgba(r, g, b, a) {
                *pixel = value;
            }
        }
        self.pixmap.draw_pixmap(
            left,
            top,
            glyph.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

fn load_font(bytes: &[u8]) -> Result<Font, SurfaceError> {
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|error| SurfaceError::Font(error.to_string()))
}

fn scale(value: u8, alpha: u8) -> u8 {
    (value as u16 * alpha as u16 / 255) as u8
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn stroke(style: &StrokeStyle) -> Stroke {
    let line_cap = match style.cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    };
    Stroke {
        width: style.width,
        line_cap,
        ..Stroke::default()
    }
}

fn rounded_rect_path(bounds: Bounds, radius: f32) -> Option<tiny_skia::Path> {
    let (x, y) = (bounds.min_x, bounds.min_y);
    let (w, h) = (bounds.width(), bounds.height());
    let r = radius.min(w.min(h) / 2.0).max(0.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

impl DrawingSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn draw_rounded_rect(&mut self, bounds: Bounds, radius: f32, style: &ShapeStyle) {
        let Some(path) = rounded_rect_path(bounds, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(style.fill),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        self.pixmap.stroke_path(
            &path,
            &paint(style.outline.color),
            &stroke(&style.outline),
            Transform::identity(),
            None,
        );
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &paint(style.color),
            &stroke(style),
            Transform::identity(),
            None,
        );
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let width = self.measure_text(text, &style.font);
        let glyphs = {
            let Some(font) = self.font(style.font.weight) else {
                self.warn_no_font();
                return;
            };
            text.chars()
                .map(|ch| font.rasterize(ch, style.font.size))
                .collect::<Vec<_>>()
        };
        let mut pen_x = anchor.x - width / 2.0;
        for (metrics, coverage) in glyphs {
            if metrics.width > 0 && metrics.height > 0 {
                let left = (pen_x + metrics.xmin as f32).round() as i32;
                let ascent = (metrics.ymin + metrics.height as i32) as f32;
                let top = (anchor.y - ascent).round() as i32;
                self.draw_coverage(
                    left,
                    top,
                    metrics.width,
                    metrics.height,
                    &coverage,
                    style.color,
                );
            }
            pen_x += metrics.advance_width;
        }
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        match self.font(font.weight) {
            Some(face) => text
                .chars()
                .map(|ch| face.metrics(ch, font.size).advance_width)
                .sum(),
            None => text.chars().count() as f32 * font.size * FALLBACK_ADVANCE_EM,
        }
    }

    fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap
            .encode_png()
            .map_err(|error| SurfaceError::Encode(error.to_string()))
    }
}
