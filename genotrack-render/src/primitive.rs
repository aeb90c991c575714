/*!
# Drawable Primitives

The closed set of shapes the track renderers emit. Renderers return fresh,
ordered lists (background, then features, then axis) in track-local
coordinates; the composer translates them into canvas space before handing
them to a [`DrawingSurface`](crate::surface::DrawingSurface).
*/

use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, RenderError};

/// What a primitive depicts. Doubles as its SVG class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveRole {
    Background,
    Base,
    AxisDomain,
    AxisTick,
    AxisLabel,
    Overview,
    Exon,
    Intron,
    Cds,
}

impl PrimitiveRole {
    pub fn class_name(&self) -> &'static str {
        match self {
            PrimitiveRole::Background => "sequence-background",
            PrimitiveRole::Base => "nucleotide",
            PrimitiveRole::AxisDomain => "axis-domain",
            PrimitiveRole::AxisTick => "axis-tick",
            PrimitiveRole::AxisLabel => "axis-label",
            PrimitiveRole::Overview => "sequence-overview",
            PrimitiveRole::Exon => "exon",
            PrimitiveRole::Intron => "intron",
            PrimitiveRole::Cds => "cds",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
    pub fill: String,
    pub anchor: TextAnchor,
    /// Baseline shift in em units
    pub dy_em: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectanglePrimitive {
    pub role: PrimitiveRole,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub fill_opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub role: PrimitiveRole,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

/// A glyph group: an optional filled box with text centered in it.
///
/// Axis labels use a zero-sized box so the text sits exactly at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGlyph {
    pub role: PrimitiveRole,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
    pub text: String,
    pub style: TextStyle,
}

impl TextGlyph {
    pub fn text_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn text_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawablePrimitive {
    Rectangle(RectanglePrimitive),
    Line(LinePrimitive),
    TextGlyph(TextGlyph),
}

impl DrawablePrimitive {
    pub fn role(&self) -> PrimitiveRole {
        match self {
            DrawablePrimitive::Rectangle(r) => r.role,
            DrawablePrimitive::Line(l) => l.role,
            DrawablePrimitive::TextGlyph(g) => g.role,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, DrawablePrimitive::Line(_))
    }

    pub fn is_glyph(&self) -> bool {
        matches!(self, DrawablePrimitive::TextGlyph(_))
    }

    /// Horizontal extent `(min_x, max_x)`.
    pub fn x_extent(&self) -> (f64, f64) {
        match self {
            DrawablePrimitive::Rectangle(r) => (r.x, r.x + r.width),
            DrawablePrimitive::Line(l) => (l.x1.min(l.x2), l.x1.max(l.x2)),
            DrawablePrimitive::TextGlyph(g) => (g.x, g.x + g.width),
        }
    }

    /// Copy shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            DrawablePrimitive::Rectangle(r) => {
                r.x += dx;
                r.y += dy;
            }
            DrawablePrimitive::Line(l) => {
                l.x1 += dx;
                l.x2 += dx;
                l.y1 += dy;
                l.y2 += dy;
            }
            DrawablePrimitive::TextGlyph(g) => {
                g.x += dx;
                g.y += dy;
            }
        }
        moved
    }

    /// Reject geometry no renderer should ever produce: non-finite coordinates
    /// or negative sizes.
    pub fn validate(&self) -> Result<(), RenderError> {
        let (coords, sizes): (Vec<f64>, Vec<f64>) = match self {
            DrawablePrimitive::Rectangle(r) => (vec![r.x, r.y], vec![r.width, r.height]),
            DrawablePrimitive::Line(l) => (vec![l.x1, l.y1, l.x2, l.y2], vec![l.stroke.width]),
            DrawablePrimitive::TextGlyph(g) => (vec![g.x, g.y], vec![g.width, g.height, g.style.size]),
        };
        if let Some(v) = coords.iter().chain(sizes.iter()).find(|v| !v.is_finite()) {
            return Err(RenderError::invalid_geometry(self.role(), format!("non-finite value {}", v)));
        }
        if let Some(v) = sizes.iter().find(|v| **v < 0.0) {
            return Err(RenderError::invalid_geometry(self.role(), format!("negative size {}", v)));
        }
        Ok(())
    }
}

/// Primitives produced by one render call, plus anything that made the track
/// draw less than asked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackOutput {
    pub primitives: Vec<DrawablePrimitive>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TrackOutput {
    pub fn new(primitives: Vec<DrawablePrimitive>) -> Self {
        Self { primitives, diagnostics: Vec::new() }
    }

    /// Nothing to draw. The diagnostic is logged, not raised.
    pub fn nothing(diagnostic: Diagnostic) -> Self {
        log::warn!("{}", diagnostic);
        Self {
            primitives: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn count_role(&self, role: PrimitiveRole) -> usize {
        self.primitives.iter().filter(|p| p.role() == role).count()
    }
}
