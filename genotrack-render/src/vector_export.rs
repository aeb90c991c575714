/*!
# Vector Export

SVG drawing surface. Rectangles become `<rect>`, lines become `<line>` and
text glyphs become a `<g>` holding an optional filled `<rect>` and a centered
`<text>`. Every element carries its role as the `class` attribute so the
output can be restyled with CSS.
*/

use std::path::Path;

use serde::{Deserialize, Serialize};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::node::Comment;
use svg::Document;

use crate::error::RenderError;
use crate::primitive::{DrawablePrimitive, FontWeight, LinePrimitive, RectanglePrimitive, TextGlyph};
use crate::surface::DrawingSurface;

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub provenance_comment: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 400,
            background_color: "#ffffff".to_string(),
            provenance_comment: None,
        }
    }
}

pub struct SvgSurface {
    document: Document,
    element_count: usize,
}

impl SvgSurface {
    pub fn new(config: &ExportConfig) -> Self {
        let mut document = Document::new()
            .set("width", config.width)
            .set("height", config.height)
            .set("viewBox", (0, 0, config.width, config.height));

        if let Some(comment) = &config.provenance_comment {
            for line in comment.lines() {
                document = document.add(Comment::new(format!(" {} ", line)));
            }
        }

        let document = document.add(
            Rectangle::new()
                .set("class", "canvas-background")
                .set("width", config.width)
                .set("height", config.height)
                .set("fill", config.background_color.as_str()),
        );

        Self {
            document,
            element_count: 0,
        }
    }

    /// Primitives appended so far.
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        svg::save(path.as_ref(), &self.document)?;
        log::info!("Wrote {} elements to {}", self.element_count, path.as_ref().display());
        Ok(())
    }

    fn push<T: Into<Box<dyn svg::Node>>>(&mut self, node: T) {
        let document = std::mem::replace(&mut self.document, Document::new());
        self.document = document.add(node);
        self.element_count += 1;
    }
}

fn rect_element(r: &RectanglePrimitive) -> Rectangle {
    let mut element = Rectangle::new()
        .set("class", r.role.class_name())
        .set("x", r.x)
        .set("y", r.y)
        .set("width", r.width)
        .set("height", r.height)
        .set("fill", r.fill.as_str());
    if let Some(opacity) = r.fill_opacity {
        element = element.set("fill-opacity", opacity);
    }
    element
}

fn line_element(l: &LinePrimitive) -> Line {
    Line::new()
        .set("class", l.role.class_name())
        .set("x1", l.x1)
        .set("y1", l.y1)
        .set("x2", l.x2)
        .set("y2", l.y2)
        .set("stroke", l.stroke.color.as_str())
        .set("stroke-width", l.stroke.width)
}

fn glyph_element(g: &TextGlyph) -> Group {
    let mut group = Group::new().set("class", g.role.class_name());
    if let Some(fill) = &g.fill {
        group = group.add(
            Rectangle::new()
                .set("x", g.x)
                .set("y", g.y)
                .set("width", g.width)
                .set("height", g.height)
                .set("fill", fill.as_str()),
        );
    }
    let text = Text::new(g.text.as_str())
        .set("x", g.text_x())
        .set("y", g.text_y())
        .set("dy", format!("{}em", g.style.dy_em))
        .set("font-family", g.style.family.as_str())
        .set("font-size", g.style.size)
        .set(
            "font-weight",
            match g.style.weight {
                FontWeight::Normal => "normal",
                FontWeight::Bold => "bold",
            },
        )
        .set("fill", g.style.fill.as_str())
        .set("text-anchor", g.style.anchor.as_str());
    group.add(text)
}

impl DrawingSurface for SvgSurface {
    fn append(&mut self, primitive: &DrawablePrimitive) -> Result<(), RenderError> {
        primitive.validate()?;
        match primitive {
            DrawablePrimitive::Rectangle(r) => self.push(rect_element(r)),
            DrawablePrimitive::Line(l) => self.push(line_element(l)),
            DrawablePrimitive::TextGlyph(g) => self.push(glyph_element(g)),
        }
        Ok(())
    }
}
