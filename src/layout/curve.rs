use super::{shrink, MAX_SHRINK_STEPS, MIN_FONT_SIZE};
use crate::colour::{colours, Colour};
use crate::font::Typeface;
use crate::raster::Raster;

/// Fraction of the token diameter kept clear around curved text
pub const CURVE_INSET: f32 = 0.1;

/// Curved text is shrunk until it is no wider than this multiple of the
/// effective diameter
pub const MAX_CHORD_RATIO: f32 = 1.6;

/// Which kind of token the curved text is for. The style picks the base font
/// size, the fill colour and the letter case
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextStyle {
    /// Reminder tokens: larger light text
    Reminder,
    /// Role tokens: smaller dark text, always upper-case
    Role,
}

impl TextStyle {
    /// Base font size as a fraction of the effective diameter
    pub fn font_scale(self) -> f32 {
        match self {
            TextStyle::Reminder => 0.15,
            TextStyle::Role => 0.1,
        }
    }

    pub fn colour(self) -> Colour {
        match self {
            TextStyle::Reminder => colours::PARCHMENT,
            TextStyle::Role => colours::INK,
        }
    }

    /// Apply the style's letter case
    pub fn apply_case(self, text: &str) -> String {
        match self {
            TextStyle::Reminder => text.to_string(),
            TextStyle::Role => text.to_uppercase(),
        }
    }
}

/// The diameter curved text is laid out against: the token diameter less a 10%
/// inset, truncated to whole pixels
pub fn effective_diameter(token_diameter: u32) -> f32 {
    let diameter = token_diameter as f32;
    (diameter - diameter * CURVE_INSET).trunc()
}

/// The angle, in whole degrees, that a run of text `chord` pixels wide subtends
/// when bent around a circle `diameter` pixels across.
///
/// Half the chord and the radius form a right triangle, so the angle is
/// `2·asin(chord / diameter)`. A chord longer than the diameter wraps past a
/// semicircle: the diameter is taken off the chord and 180° added on.
pub fn curve_angle(chord: f32, diameter: f32) -> i32 {
    if chord <= 0.0 || diameter <= 0.0 {
        return 0;
    }
    let (chord, additional) = if chord > diameter {
        (chord - diameter, 180)
    } else {
        (chord, 0)
    };
    let ratio = (chord / diameter).min(1.0);
    (2.0 * ratio.asin()).to_degrees().round() as i32 + additional
}

/// The font size curved text ends up at: the style's base size, shrunk by 10%
/// at a time until the text is at most [MAX_CHORD_RATIO] effective diameters
/// wide or [MIN_FONT_SIZE] is reached
pub fn curved_font_size<F: Typeface + ?Sized>(
    text: &str,
    style: TextStyle,
    token_diameter: u32,
    face: &F,
) -> f32 {
    let diameter = effective_diameter(token_diameter);
    let limit = MAX_CHORD_RATIO * diameter;
    let mut size = (diameter * style.font_scale()).max(MIN_FONT_SIZE);

    for _ in 0..MAX_SHRINK_STEPS {
        let width = face.measure(text, size).width;
        if width <= limit {
            return size;
        }
        if size <= MIN_FONT_SIZE {
            break;
        }
        log::trace!("curved text {width:.1}px wide at {size:.2}px, limit {limit:.1}px");
        size = shrink(size);
    }

    log::warn!("curved text {text:?} still too wide at {size:.2}px");
    size
}

/// Render a single line of text bent along the bottom of a token `token_diameter`
/// pixels across. Empty text gives the 1×1 placeholder.
///
/// The text is drawn flat into a tight buffer, turned upside down and then arced
/// around the bottom of the circle so it reads left to right along the rim.
pub fn curved_text_to_image<F: Typeface + ?Sized>(
    text: &str,
    style: TextStyle,
    token_diameter: u32,
    face: &F,
) -> Raster {
    if text.trim().is_empty() {
        return Raster::empty();
    }

    let text = style.apply_case(text);
    let diameter = effective_diameter(token_diameter);
    let size = curved_font_size(&text, style, token_diameter, face);
    let metrics = face.measure(&text, size);
    let width = metrics.width.trunc();
    let height = metrics.height.trunc();

    let line = face.render_line(&text, size, style.colour());
    let mut flat = Raster::new(width as u32, (height * 1.2) as u32);
    flat.composite(&line, 0, 0);

    let angle = curve_angle(width, diameter);
    log::debug!("curving {text:?} through {angle} degrees at {size:.2}px");
    flat.rotate_180();
    flat.arc_distort(angle as f32, 180.0)
}
