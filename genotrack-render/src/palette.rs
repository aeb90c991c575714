//! Base colors and track styling
//!
//! Both are plain values handed to the renderers, so a theme can be swapped
//! (or loaded from configuration) without touching rendering code.

use serde::{Deserialize, Serialize};

/// Default nucleotide colors.
pub const DEFAULT_BASE_COLORS: [(u8, &str); 5] = [
    (b'A', "#A0D6B9"), // adenine, green
    (b'T', "#F5A286"), // thymine, red
    (b'G', "#F8D90C"), // guanine, yellow
    (b'C', "#317BC5"), // cytosine, blue
    (b'U', "#F5A286"), // uracil, same as thymine
];

pub const DEFAULT_UNKNOWN_BASE_COLOR: &str = "#CCCCCC";

/// Nucleotide to fill color. Lookup ignores case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasePalette {
    #[serde(default = "default_a")]
    pub a: String,
    #[serde(default = "default_t")]
    pub t: String,
    #[serde(default = "default_g")]
    pub g: String,
    #[serde(default = "default_c")]
    pub c: String,
    #[serde(default = "default_u")]
    pub u: String,
    #[serde(default = "default_unknown")]
    pub unknown: String,
}

fn default_color(base: u8) -> String {
    DEFAULT_BASE_COLORS
        .iter()
        .find(|(b, _)| *b == base)
        .map(|(_, color)| color.to_string())
        .unwrap_or_else(|| DEFAULT_UNKNOWN_BASE_COLOR.to_string())
}

fn default_a() -> String { default_color(b'A') }
fn default_t() -> String { default_color(b'T') }
fn default_g() -> String { default_color(b'G') }
fn default_c() -> String { default_color(b'C') }
fn default_u() -> String { default_color(b'U') }
fn default_unknown() -> String { DEFAULT_UNKNOWN_BASE_COLOR.to_string() }

impl Default for BasePalette {
    fn default() -> Self {
        Self {
            a: default_a(),
            t: default_t(),
            g: default_g(),
            c: default_c(),
            u: default_u(),
            unknown: default_unknown(),
        }
    }
}

impl BasePalette {
    pub fn color_for(&self, base: u8) -> &str {
        match base.to_ascii_uppercase() {
            b'A' => &self.a,
            b'T' => &self.t,
            b'G' => &self.g,
            b'C' => &self.c,
            b'U' => &self.u,
            _ => &self.unknown,
        }
    }
}

/// Colors, stroke widths and height ratios shared by the tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackStyle {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_background_opacity")]
    pub background_opacity: f64,
    #[serde(default = "default_glyph_text")]
    pub glyph_text: String,
    #[serde(default = "default_glyph_font")]
    pub glyph_font: String,
    #[serde(default = "default_axis_font")]
    pub axis_font: String,
    #[serde(default = "default_axis_color")]
    pub axis_color: String,
    #[serde(default = "default_exon")]
    pub exon: String,
    #[serde(default = "default_cds")]
    pub cds: String,
    #[serde(default = "default_intron")]
    pub intron: String,
    #[serde(default = "default_intron_width")]
    pub intron_width: f64,
    #[serde(default = "default_overview")]
    pub overview: String,
    #[serde(default = "default_overview_width")]
    pub overview_width: f64,
    /// Exon height as a fraction of track height
    #[serde(default = "default_exon_height_ratio")]
    pub exon_height_ratio: f64,
    /// CDS height as a fraction of track height
    #[serde(default = "default_cds_height_ratio")]
    pub cds_height_ratio: f64,
}

fn default_background() -> String { "#f7f7f7".to_string() }
fn default_background_opacity() -> f64 { 0.75 }
fn default_glyph_text() -> String { "#333".to_string() }
fn default_glyph_font() -> String { "monospace".to_string() }
fn default_axis_font() -> String { "sans-serif".to_string() }
fn default_axis_color() -> String { "#000000".to_string() }
fn default_exon() -> String { "#4A88CA".to_string() }
fn default_cds() -> String { "#F2C14E".to_string() }
fn default_intron() -> String { "#280274".to_string() }
fn default_intron_width() -> f64 { 1.0 }
fn default_overview() -> String { "black".to_string() }
fn default_overview_width() -> f64 { 2.0 }
fn default_exon_height_ratio() -> f64 { 0.5 }
fn default_cds_height_ratio() -> f64 { 0.75 }

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            background: default_background(),
            background_opacity: default_background_opacity(),
            glyph_text: default_glyph_text(),
            glyph_font: default_glyph_font(),
            axis_font: default_axis_font(),
            axis_color: default_axis_color(),
            exon: default_exon(),
            cds: default_cds(),
            intron: default_intron(),
            intron_width: default_intron_width(),
            overview: default_overview(),
            overview_width: default_overview_width(),
            exon_height_ratio: default_exon_height_ratio(),
            cds_height_ratio: default_cds_height_ratio(),
        }
    }
}
