use crate::{colour::Colour, raster::Raster, TokenError};
use image::{Rgba, RgbaImage};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OutlineBuilder, OwnedFace};
use std::path::Path;
use tiny_skia::{FillRule, Paint, Path as SkPath, PathBuilder, Pixmap, Transform};

/// The measured extent of a run of text at a particular font size, in pixels.
/// Measurements are never cached: changing the font size means measuring again.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
}

/// Something that can measure and draw a single line of text.
///
/// [Font] is the real implementation; the seam exists so that the fitting and
/// curving logic only ever depends on measurements and line rasters.
pub trait Typeface {
    /// Measure `text` set on a single line at `size` pixels
    fn measure(&self, text: &str, size: f32) -> GlyphMetrics;

    /// Distance from the top of a line to its baseline at `size` pixels
    fn ascent(&self, size: f32) -> f32;

    /// Draw `text` on a single line into a tightly sized raster whose width and
    /// height are the rounded-up [GlyphMetrics] of the text
    fn render_line(&self, text: &str, size: f32, colour: Colour) -> Raster;
}

/// A parsed TTF or OTF font
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TokenError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Read and parse a font file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Font, TokenError> {
        Font::load(std::fs::read(path)?)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: f32) -> f32 {
        size / self.face().units_per_em() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: f32) -> f32 {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Calculate the default line height of the font for the given size
    pub fn line_height(&self, size: f32) -> f32 {
        self.scaling(size) * self.face().line_gap() as f32 + self.ascent(size) - self.descent(size)
    }

    /// Look up the glyph for a character, falling back on the replacement
    /// character and then on `?`
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
    }

    /// The horizontal advance of every drawable character, in pixels
    fn advances<'a>(&'a self, text: &'a str, size: f32) -> impl Iterator<Item = (GlyphId, f32)> + 'a {
        let scaling = self.scaling(size);
        text.chars().filter_map(move |ch| {
            let gid = self.glyph_id(ch)?;
            let advance = self.face().glyph_hor_advance(gid).unwrap_or_default() as f32;
            Some((gid, advance * scaling))
        })
    }
}

impl Typeface for Font {
    fn measure(&self, text: &str, size: f32) -> GlyphMetrics {
        GlyphMetrics {
            width: self.advances(text, size).map(|(_, advance)| advance).sum(),
            height: self.ascent(size) - self.descent(size),
        }
    }

    fn ascent(&self, size: f32) -> f32 {
        self.scaling(size) * self.face().ascender() as f32
    }

    fn render_line(&self, text: &str, size: f32, colour: Colour) -> Raster {
        let metrics = self.measure(text, size);
        let width = metrics.width.ceil().max(1.0) as u32;
        let height = metrics.height.ceil().max(1.0) as u32;
        let Some(mut pixmap) = Pixmap::new(width, height) else {
            return Raster::empty();
        };

        let mut paint = Paint::default();
        paint.set_color(colour.into());
        paint.anti_alias = true;

        let baseline = self.ascent(size);
        let scaling = self.scaling(size);
        let mut x = 0.0;
        for (gid, advance) in self.advances(text, size) {
            let mut builder = GlyphPathBuilder::new(x, baseline, scaling);
            if self.face().outline_glyph(gid, &mut builder).is_some() {
                if let Some(path) = builder.finish() {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            x += advance;
        }

        Raster::from_rgba(pixmap_to_rgba(&pixmap))
    }
}

/// Converts font-unit outlines into pixel space paths, flipping the y axis so
/// that the baseline sits `origin_y` pixels below the top of the line
struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(origin_x: f32, origin_y: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            origin_y,
            scale,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }

    fn finish(self) -> Option<SkPath> {
        self.builder.finish()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// tiny-skia stores premultiplied colour, rasters are straight alpha
fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}
