use crate::colour::Colour;
use crate::error::TokenError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::Path;

/// An owned RGBA pixel buffer with a transparent background. Every renderer in
/// this crate hands back a fresh [Raster]; nothing is shared between tokens, so
/// dropping a raster releases it.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pixels: RgbaImage,
}

impl Raster {
    /// Create a fully transparent raster. Zero dimensions are bumped to 1
    pub fn new(width: u32, height: u32) -> Raster {
        Raster {
            pixels: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    /// The degenerate 1×1 transparent raster returned for empty text. Callers
    /// treat it as "nothing to composite"
    pub fn empty() -> Raster {
        Raster::new(1, 1)
    }

    /// Create a raster where every pixel is `colour`
    pub fn filled(width: u32, height: u32, colour: Colour) -> Raster {
        Raster {
            pixels: RgbaImage::from_pixel(width.max(1), height.max(1), colour.into()),
        }
    }

    pub fn from_image(image: DynamicImage) -> Raster {
        Raster {
            pixels: image.to_rgba8(),
        }
    }

    pub fn from_rgba(pixels: RgbaImage) -> Raster {
        Raster { pixels }
    }

    /// Load and decode an image from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Raster, TokenError> {
        Ok(Raster::from_image(image::open(path)?))
    }

    /// Encode the raster to disk, the format is picked from the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TokenError> {
        self.pixels.save(path)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Whether this is the 1×1 transparent placeholder
    pub fn is_empty(&self) -> bool {
        self.dimensions() == (1, 1) && self.pixels.get_pixel(0, 0).0[3] == 0
    }

    /// Read a single pixel. Returns [None] outside of the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|p| Colour::from(p.0))
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }

    /// Alpha-composite `top` over this raster with its top-left corner at
    /// `(x, y)`. Anything falling outside of this raster is clipped
    pub fn composite(&mut self, top: &Raster, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, &top.pixels, x, y);
    }

    /// Resize to exactly `width × height`, ignoring the aspect ratio
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.dimensions() == (width, height) {
            return;
        }
        self.pixels = imageops::resize(&self.pixels, width, height, FilterType::Lanczos3);
    }

    /// Scale, keeping the aspect ratio, to the largest size that fits inside the
    /// box
    pub fn fit_within(&mut self, width: f32, height: f32) {
        let scale = (width / self.width() as f32).min(height / self.height() as f32);
        self.scale_by(scale);
    }

    /// Scale, keeping the aspect ratio, to the smallest size that covers the box
    pub fn cover(&mut self, width: f32, height: f32) {
        let scale = (width / self.width() as f32).max(height / self.height() as f32);
        self.scale_by(scale);
    }

    fn scale_by(&mut self, scale: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        let width = (self.width() as f32 * scale).round() as u32;
        let height = (self.height() as f32 * scale).round() as u32;
        self.resize(width, height);
    }

    pub fn rotate_180(&mut self) {
        self.pixels = imageops::rotate180(&self.pixels);
    }

    /// Bend the raster along a circular arc spanning `angle_deg` degrees.
    ///
    /// The middle row keeps its length, so it lies on a circle of radius
    /// `width / angle`. The top row lands on the outer edge of the arc and the
    /// bottom row on the inner edge. Angles grow clockwise (y points down) and
    /// the arc is centred on `rotation_deg - 90°`, so a rotation of 0 bows the
    /// raster over the top of the circle and 180 bows it under the bottom. The
    /// result is cropped to the bounding box of the arc.
    pub fn arc_distort(&self, angle_deg: f32, rotation_deg: f32) -> Raster {
        if angle_deg <= 0.0 || self.is_empty() {
            return self.clone();
        }

        let (width, height) = (self.width() as f32, self.height() as f32);
        let arc = angle_deg.to_radians().min(TAU);
        let outer = width / arc + height / 2.0;
        let inner = (outer - height).max(0.0);
        let start = rotation_deg.to_radians() - FRAC_PI_2 - arc / 2.0;

        let (min_x, min_y, max_x, max_y) = sector_bounds(start, arc, inner, outer);
        let out_width = (max_x - min_x).ceil().max(1.0) as u32;
        let out_height = (max_y - min_y).ceil().max(1.0) as u32;

        let mut out = RgbaImage::new(out_width, out_height);
        for (px, py, pixel) in out.enumerate_pixels_mut() {
            let dx = px as f32 + 0.5 + min_x;
            let dy = py as f32 + 0.5 + min_y;
            let radius = dx.hypot(dy);
            if radius > outer || radius < inner {
                continue;
            }
            let theta = (dy.atan2(dx) - start).rem_euclid(TAU);
            if theta > arc {
                continue;
            }
            let sx = theta / arc * width - 0.5;
            let sy = outer - radius - 0.5;
            *pixel = sample_bilinear(&self.pixels, sx, sy);
        }

        Raster { pixels: out }
    }
}

impl From<DynamicImage> for Raster {
    fn from(image: DynamicImage) -> Self {
        Raster::from_image(image)
    }
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of an annular sector centred on
/// the origin
fn sector_bounds(start: f32, arc: f32, inner: f32, outer: f32) -> (f32, f32, f32, f32) {
    let mut points: Vec<(f32, f32)> = Vec::with_capacity(8);
    for radius in [inner, outer] {
        for angle in [start, start + arc] {
            points.push((radius * angle.cos(), radius * angle.sin()));
        }
    }
    // the outer edge bulges past the end points wherever it crosses an axis
    for quadrant in 0..4 {
        let angle = quadrant as f32 * FRAC_PI_2;
        if (angle - start).rem_euclid(TAU) <= arc {
            points.push((outer * angle.cos(), outer * angle.sin()));
        }
    }

    points.iter().fold(
        (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
        |(min_x, min_y, max_x, max_y), &(x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    )
}

/// Bilinear sample on premultiplied colour; samples outside the image are
/// transparent
fn sample_bilinear(image: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let taps = [
        (0, 0, (1.0 - fx) * (1.0 - fy)),
        (1, 0, fx * (1.0 - fy)),
        (0, 1, (1.0 - fx) * fy),
        (1, 1, fx * fy),
    ];

    let mut acc = [0.0f32; 4];
    for (ox, oy, weight) in taps {
        if weight <= 0.0 {
            continue;
        }
        let sx = x0 as i64 + ox;
        let sy = y0 as i64 + oy;
        if sx < 0 || sy < 0 || sx >= image.width() as i64 || sy >= image.height() as i64 {
            continue;
        }
        let [r, g, b, a] = image.get_pixel(sx as u32, sy as u32).0;
        let alpha = a as f32 / 255.0 * weight;
        acc[0] += r as f32 * alpha;
        acc[1] += g as f32 * alpha;
        acc[2] += b as f32 * alpha;
        acc[3] += alpha;
    }

    if acc[3] <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgba([
        channel(acc[0] / acc[3]),
        channel(acc[1] / acc[3]),
        channel(acc[2] / acc[3]),
        channel(acc[3] * 255.0),
    ])
}
