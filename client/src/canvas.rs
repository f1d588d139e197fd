use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use sigstamp_shared::{
    decode_png_data_url, Bounds, DrawingSurface, FontSpec, Point, ShapeStyle, StrokeStyle,
    SurfaceError, TextStyle,
};

/// `DrawingSurface` over an HTML canvas. Each call sets the context style it
/// needs inside a `save`/`restore` pair.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SurfaceError::Unavailable)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_stroke(&self, style: &StrokeStyle) {
        self.ctx.set_stroke_style_str(&style.color.to_css());
        self.ctx.set_line_width(style.width as f64);
        self.ctx.set_line_cap(style.cap.as_css());
    }
}

impl DrawingSurface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
    }

    fn draw_rounded_rect(&mut self, bounds: Bounds, radius: f32, style: &ShapeStyle) {
        let x = bounds.min_x as f64;
        let y = bounds.min_y as f64;
        let w = bounds.width() as f64;
        let h = bounds.height() as f64;
        let r = (radius as f64).min(w.min(h) / 2.0).max(0.0);

        let ctx = &self.ctx;
        ctx.save();
        ctx.set_fill_style_str(&style.fill.to_css());
        self.apply_stroke(&style.outline);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        ctx.line_to(x + w, y + h - r);
        ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        ctx.line_to(x + r, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        ctx.line_to(x, y + r);
        ctx.quadratic_curve_to(x, y, x + r, y);
        ctx.close_path();
        ctx.fill();
        ctx.stroke();
        ctx.restore();
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let ctx = &self.ctx;
        ctx.save();
        self.apply_stroke(style);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
        ctx.restore();
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_font(&style.font.to_css());
        ctx.set_fill_style_str(&style.color.to_css());
        ctx.set_text_align("center");
        let _ = ctx.fill_text(text, anchor.x as f64, anchor.y as f64);
        ctx.restore();
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> f32 {
        self.ctx.save();
        self.ctx.set_font(&font.to_css());
        let width = self
            .ctx
            .measure_text(text)
            .map(|metrics| metrics.width() as f32)
            .unwrap_or(0.0);
        self.ctx.restore();
        width
    }

    fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let url = self
            .canvas
            .to_data_url_with_type("image/png")
            .map_err(|_| SurfaceError::Unavailable)?;
        decode_png_data_url(&url)
    }
}
