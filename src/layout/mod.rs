//! Text layout for token faces.
//!
//! Two strategies are available, both driven purely by [`Typeface`](crate::Typeface)
//! measurements and a shrinking font size:
//!
//! - [`fit_ability_text`](crate::layout::fit_ability_text) - greedy word wrap into a
//!   trapezoid whose lines grow wider by a fixed step, capped at [`MAX_LINES`] lines
//! - [`curved_text_to_image`](crate::layout::curved_text_to_image) - a single line bent
//!   along the rim of a token
//!
//! Both loops shrink the font by 10% per attempt and stop at [`MIN_FONT_SIZE`] or
//! after [`MAX_SHRINK_STEPS`] attempts, whichever comes first, returning the best
//! effort layout at that point.
//!
//! # Example
//!
//! ```
//! use token_gen::{Colour, GlyphMetrics, Raster, Typeface};
//! use token_gen::layout::fit_lines;
//!
//! struct Mono;
//!
//! impl Typeface for Mono {
//!     fn measure(&self, text: &str, size: f32) -> GlyphMetrics {
//!         GlyphMetrics { width: text.chars().count() as f32 * size / 2.0, height: size }
//!     }
//!     fn ascent(&self, size: f32) -> f32 { size * 0.8 }
//!     fn render_line(&self, text: &str, size: f32, colour: Colour) -> Raster {
//!         let m = self.measure(text, size);
//!         Raster::filled(m.width.ceil() as u32, m.height.ceil() as u32, colour)
//!     }
//! }
//!
//! let block = fit_lines("You start knowing a fact", 10.0, 60.0, 10.0, &Mono);
//! assert!(block.lines.len() <= 4);
//! ```

mod curve;
mod text;

pub use curve::*;
pub use text::*;

/// The most lines ability text may wrap onto
pub const MAX_LINES: usize = 4;

/// Font sizes are never shrunk below this many pixels
pub const MIN_FONT_SIZE: f32 = 4.0;

/// Upper bound on font-shrink attempts for a single layout
pub const MAX_SHRINK_STEPS: usize = 64;

/// Each shrink attempt multiplies the font size by this factor
pub const SHRINK_FACTOR: f32 = 0.9;

/// Shrink `size` by one step without going below [MIN_FONT_SIZE]
pub(crate) fn shrink(size: f32) -> f32 {
    (size * SHRINK_FACTOR).max(MIN_FONT_SIZE)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::{Colour, GlyphMetrics, Raster, Typeface};

    /// Every character advances by half the font size and lines are exactly
    /// one font size tall. Glyphs are drawn as solid blocks
    pub struct BlockFace;

    impl Typeface for BlockFace {
        fn measure(&self, text: &str, size: f32) -> GlyphMetrics {
            GlyphMetrics {
                width: text.chars().count() as f32 * size * 0.5,
                height: size,
            }
        }

        fn ascent(&self, size: f32) -> f32 {
            size * 0.8
        }

        fn render_line(&self, text: &str, size: f32, colour: Colour) -> Raster {
            let m = self.measure(text, size);
            Raster::filled(m.width.ceil() as u32, m.height.ceil() as u32, colour)
        }
    }
}
