use log::debug;
use serde::{Deserialize, Serialize};

use crate::surface::{
    Color, DrawingSurface, FontSpec, LineCap, ShapeStyle, StrokeStyle, TextStyle,
};
use crate::{Bounds, Point};

/// The three form inputs. Any string is accepted, empty ones included.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StampFields {
    pub name: String,
    pub registration_number: String,
    #[serde(default)]
    pub description: String,
}

impl StampFields {
    pub fn new(
        name: impl Into<String>,
        registration_number: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            registration_number: registration_number.into(),
            description: description.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextLine {
    pub font: FontSpec,
    pub baseline: f32,
}

/// Fixed geometry of a stamp. Defaults describe a 300x300 stamp; any field
/// can be overridden from JSON, the rest keep their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StampLayout {
    pub size: u32,
    pub margin: f32,
    pub corner_radius: f32,
    pub fill: Color,
    pub outline: StrokeStyle,
    pub text_color: Color,
    pub name: TextLine,
    pub number: TextLine,
    pub description: TextLine,
    pub max_line_width: f32,
    pub line_height: f32,
}

impl Default for StampLayout {
    fn default() -> Self {
        Self {
            size: 300,
            margin: 10.0,
            corner_radius: 20.0,
            fill: Color::STAMP_FILL,
            outline: StrokeStyle {
                color: Color::BLACK,
                width: 2.0,
                cap: LineCap::Butt,
            },
            text_color: Color::BLACK,
            name: TextLine {
                font: FontSpec::bold(24.0),
                baseline: 80.0,
            },
            number: TextLine {
                font: FontSpec::regular(18.0),
                baseline: 120.0,
            },
            description: TextLine {
                font: FontSpec::regular(16.0),
                baseline: 160.0,
            },
            max_line_width: 260.0,
            line_height: 24.0,
        }
    }
}

impl StampLayout {
    pub fn border(&self) -> Bounds {
        let side = self.size as f32 - 2.0 * self.margin;
        Bounds::from_xywh(self.margin, self.margin, side, side)
    }

    pub fn center_x(&self) -> f32 {
        self.size as f32 / 2.0
    }

    fn text_style(&self, font: &FontSpec) -> TextStyle {
        TextStyle {
            font: font.clone(),
            color: self.text_color,
        }
    }
}

/// Greedy line fill. Every word is followed by one space, and lines are
/// measured and emitted with that trailing space. A word joins the current
/// line unless the widened line would exceed `max_width` and the line
/// already holds a word; then the line is flushed and the word opens the
/// next one. The last line is always emitted, even when empty. A single
/// word wider than `max_width` sits alone on its own line.
pub fn wrap_description<S: DrawingSurface + ?Sized>(
    surface: &S,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = format!("{line}{word} ");
        if !line.is_empty() && surface.measure_text(&candidate, font) > max_width {
            lines.push(std::mem::replace(&mut line, format!("{word} ")));
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

/// Clears the surface and paints the stamp. Identical fields always give
/// identical pixels.
pub fn render_stamp<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    fields: &StampFields,
    layout: &StampLayout,
) {
    surface.clear();

    let shape = ShapeStyle {
        fill: layout.fill,
        outline: layout.outline,
    };
    surface.draw_rounded_rect(layout.border(), layout.corner_radius, &shape);

    let center = layout.center_x();
    surface.fill_text(
        &fields.name.to_uppercase(),
        Point::new(center, layout.name.baseline),
        &layout.text_style(&layout.name.font),
    );
    surface.fill_text(
        &fields.registration_number,
        Point::new(center, layout.number.baseline),
        &layout.text_style(&layout.number.font),
    );

    if fields.description.is_empty() {
        debug!("stamp rendered without description");
        return;
    }
    let font = &layout.description.font;
    let lines = wrap_description(&*surface, &fields.description, font, layout.max_line_width);
    let style = layout.text_style(font);
    let mut y = layout.description.baseline;
    for line in &lines {
        surface.fill_text(line, Point::new(center, y), &style);
        y += layout.line_height;
    }
    debug!("stamp rendered with {} description line(s)", lines.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingSurface};

    fn description_texts(surface: &RecordingSurface) -> Vec<String> {
        let size = StampLayout::default().description.font.size;
        surface
            .texts()
            .into_iter()
            .filter(|(_, s)| *s == size)
            .map(|(text, _)| text)
            .collect()
    }

    #[test]
    fn name_is_upper_cased_and_empty_description_draws_nothing() {
        let mut surface = RecordingSurface::new(300, 300);
        let fields = StampFields::new("acme corp", "12345", "");
        render_stamp(&mut surface, &fields, &StampLayout::default());

        let texts = surface.texts();
        assert_eq!(
            texts,
            vec![("ACME CORP".to_string(), 24.0), ("12345".to_string(), 18.0)]
        );
        assert_eq!(surface.calls[0], Call::Clear);
        assert_eq!(
            surface.calls[1],
            Call::RoundedRect {
                bounds: Bounds::from_xywh(10.0, 10.0, 280.0, 280.0),
                radius: 20.0
            }
        );
    }

    #[test]
    fn forty_words_wrap_onto_three_lines() {
        let mut surface = RecordingSurface::new(300, 300);
        let description = vec!["a"; 40].join(" ");
        let fields = StampFields::new("acme", "1", description);
        let layout = StampLayout::default();
        render_stamp(&mut surface, &fields, &layout);

        let lines = description_texts(&surface);
        assert_eq!(lines.len(), 3);
        let font = &layout.description.font;
        let last = surface.measure_text(&lines[2], font);
        assert!(last < layout.max_line_width);

        let baselines: Vec<f32> = surface
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Text { anchor, size, .. } if *size == font.size => Some(anchor.y),
                _ => None,
            })
            .collect();
        assert_eq!(baselines, vec![160.0, 184.0, 208.0]);
    }

    #[test]
    fn wrapped_lines_fit_unless_single_word() {
        let surface = RecordingSurface::new(300, 300);
        let font = FontSpec::regular(16.0);
        let text = "Registered supplier of industrial fasteners antidisestablishmentarianismandmore \
                    and precision tooling for the aerospace and  automotive   sectors since 1987";
        let lines = wrap_description(&surface, text, &font, 260.0);
        assert!(lines.len() > 1);
        for line in &lines {
            let width = surface.measure_text(line, &font);
            let words = line.split_whitespace().count();
            assert!(width <= 260.0 || words == 1, "line {line:?} is {width}px");
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn over_wide_first_word_stays_alone() {
        let surface = RecordingSurface::new(300, 300);
        let font = FontSpec::regular(16.0);
        let long = "x".repeat(40);
        let lines = wrap_description(&surface, &format!("{long} ok"), &font, 260.0);
        assert_eq!(lines, vec![format!("{long} "), "ok ".to_string()]);
    }

    #[test]
    fn trailing_space_counts_toward_the_break() {
        let surface = RecordingSurface::new(300, 300);
        let font = FontSpec::regular(16.0);
        // 15 + 1 + 16 chars fit at 256px, but the trailing space makes 264px.
        let text = format!("{} {}", "a".repeat(15), "b".repeat(16));
        let lines = wrap_description(&surface, &text, &font, 260.0);
        assert_eq!(
            lines,
            vec![format!("{} ", "a".repeat(15)), format!("{} ", "b".repeat(16))]
        );
        for line in &lines {
            assert!(surface.measure_text(line, &font) <= 260.0);
        }
    }

    #[test]
    fn whitespace_only_description_flushes_one_empty_line() {
        let mut surface = RecordingSurface::new(300, 300);
        let fields = StampFields::new("", "", "   ");
        render_stamp(&mut surface, &fields, &StampLayout::default());
        assert_eq!(description_texts(&surface), vec![String::new()]);
    }

    #[test]
    fn rendering_twice_records_the_same_calls() {
        let mut surface = RecordingSurface::new(300, 300);
        let fields = StampFields::new("acme", "42", "tools and dies");
        let layout = StampLayout::default();
        render_stamp(&mut surface, &fields, &layout);
        let first = surface.calls.clone();
        render_stamp(&mut surface, &fields, &layout);
        assert_eq!(surface.calls, first);
    }

    #[test]
    fn partial_layout_json_keeps_defaults() {
        let layout: StampLayout =
            serde_json::from_str(r##"{"corner_radius": 8, "fill": "#ffeedd"}"##).unwrap();
        assert_eq!(layout.corner_radius, 8.0);
        assert_eq!(layout.fill, Color::rgb(0xff, 0xee, 0xdd));
        assert_eq!(layout.size, 300);
        assert_eq!(layout.max_line_width, 260.0);
    }
}
