use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::{Bounds, Point};

/// An 8-bit, non-premultiplied RGBA color. Serialized as a `#rrggbb` /
/// `#rrggbbaa` hex string so layouts stay readable as JSON.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const STAMP_FILL: Color = Color::rgb(0xf0, 0xf0, 0xf0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn parse_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |index: usize| u8::from_str_radix(&digits[index..index + 2], 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    pub fn to_css(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value).ok_or_else(|| format!("invalid color {value:?}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_css(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub cap: LineCap,
}

impl Default for StrokeStyle {
    /// The pen used for signatures: 2px, round cap, black.
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 2.0,
            cap: LineCap::Round,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    pub fill: Color,
    pub outline: StrokeStyle,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn regular(size: f32) -> Self {
        Self {
            family: "Arial".to_string(),
            size,
            weight: FontWeight::Regular,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..Self::regular(size)
        }
    }

    /// CSS shorthand understood by `CanvasRenderingContext2d::set_font`.
    pub fn to_css(&self) -> String {
        match self.weight {
            FontWeight::Regular => format!("{}px {}", self.size, self.family),
            FontWeight::Bold => format!("bold {}px {}", self.size, self.family),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Color,
}

/// A fixed-size pixel buffer with stateless paint operations.
///
/// Every call carries its own style; implementations must not leak style
/// from one call into the next. Coordinates are surface-local pixels.
pub trait DrawingSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    fn draw_rounded_rect(&mut self, bounds: Bounds, radius: f32, style: &ShapeStyle);

    /// Strokes one straight, independent segment. No path state is carried
    /// over between calls, so consecutive segments never join.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Paints `text` centered on `anchor.x` with its baseline at `anchor.y`.
    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle);

    fn measure_text(&self, text: &str, font: &FontSpec) -> f32;

    /// Encodes the current pixel buffer. The returned bytes are a snapshot:
    /// later paint calls do not affect them.
    fn export_png(&self) -> Result<Vec<u8>, SurfaceError>;
}
