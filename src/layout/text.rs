use super::{shrink, MAX_LINES, MAX_SHRINK_STEPS, MIN_FONT_SIZE};
use crate::colour::{colours, Colour};
use crate::font::{GlyphMetrics, Typeface};
use crate::raster::Raster;

/// Extra vertical room given to a block of lines, left below the last line
const BLOCK_PADDING: f32 = 0.2;

/// A single wrapped line and its measured size
#[derive(Clone, PartialEq, Debug)]
pub struct TextLine {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

/// The result of fitting a paragraph: the wrapped lines, the font size they were
/// measured at, and the bounding box of the whole block (widest line by the sum
/// of line heights plus 20%)
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub font_size: f32,
    pub width: f32,
    pub height: f32,
}

impl TextBlock {
    fn from_lines(lines: Vec<TextLine>, font_size: f32) -> TextBlock {
        let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let height: f32 = lines.iter().map(|l| l.height).sum();
        TextBlock {
            lines,
            font_size,
            width,
            height: height * (1.0 + BLOCK_PADDING),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Draw every line centred horizontally within the block, stacked from the
    /// top. An empty block renders to the 1×1 placeholder
    pub fn render<F: Typeface + ?Sized>(&self, face: &F, colour: Colour) -> Raster {
        if self.is_empty() {
            return Raster::empty();
        }

        let mut canvas = Raster::new(self.width.ceil() as u32, self.height as u32);
        let mut y = 0.0f32;
        for line in self.lines.iter() {
            let rendered = face.render_line(&line.text, self.font_size, colour);
            let x = ((self.width - line.width) / 2.0) as i64;
            canvas.composite(&rendered, x, y as i64);
            y += line.height;
        }
        canvas
    }
}

/// Wrap `text` into at most [MAX_LINES] lines where the first line is at most
/// `first_line_width` wide and every following line may be `step` pixels wider
/// than the one before it.
///
/// Words are never split: a word that is wider than its line is placed on a line
/// of its own and overflows. If the text needs more than [MAX_LINES] lines the
/// font is shrunk by 10% and the whole paragraph is wrapped again. Once the font
/// reaches [MIN_FONT_SIZE] everything past the third line goes on the last one.
pub fn fit_lines<F: Typeface + ?Sized>(
    text: &str,
    font_size: f32,
    first_line_width: f32,
    step: f32,
    face: &F,
) -> TextBlock {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return TextBlock {
            font_size,
            ..Default::default()
        };
    }

    let mut size = font_size.max(MIN_FONT_SIZE);
    let mut attempts = 0;
    loop {
        attempts += 1;
        let (lines, rest) = wrap_lines(&text, size, first_line_width, step, face, MAX_LINES);
        if rest.is_empty() {
            log::trace!("fit {} lines at {size:.2}px after {attempts} attempts", lines.len());
            return TextBlock::from_lines(lines, size);
        }
        if size <= MIN_FONT_SIZE || attempts >= MAX_SHRINK_STEPS {
            log::warn!("text still needs more than {MAX_LINES} lines at {size:.2}px, overflowing the last line");
            let (mut lines, rest) =
                wrap_lines(&text, size, first_line_width, step, face, MAX_LINES - 1);
            lines.push(measured_line(rest, size, face));
            return TextBlock::from_lines(lines, size);
        }
        log::trace!("more than {MAX_LINES} lines at {size:.2}px, shrinking");
        size = shrink(size);
    }
}

/// Fit ability text and draw it in black. Empty text gives the 1×1 placeholder
pub fn fit_ability_text<F: Typeface + ?Sized>(
    text: &str,
    font_size: f32,
    first_line_width: f32,
    step: f32,
    face: &F,
) -> Raster {
    fit_lines(text, font_size, first_line_width, step, face).render(face, colours::INK)
}

/// Greedily break whitespace-normalised text into at most `limit` lines of
/// growing width, returning the lines and whatever text did not fit
fn wrap_lines<'t, F: Typeface + ?Sized>(
    text: &'t str,
    size: f32,
    first_line_width: f32,
    step: f32,
    face: &F,
    limit: usize,
) -> (Vec<TextLine>, &'t str) {
    let mut lines: Vec<TextLine> = Vec::with_capacity(limit);
    let mut remaining = text;
    let mut target = first_line_width;

    while !remaining.is_empty() && lines.len() < limit {
        let (line, metrics) = longest_prefix(remaining, size, target, face);
        lines.push(TextLine {
            text: line.to_string(),
            width: metrics.width,
            height: metrics.height,
        });
        remaining = remaining[line.len()..].trim_start();
        target += step;
    }

    (lines, remaining)
}

/// The most whole words from the front of `text` that fit in `width`, found by
/// galloping then bisecting over word ends. A lone word is taken as-is even if
/// it overflows
fn longest_prefix<'t, F: Typeface + ?Sized>(
    text: &'t str,
    size: f32,
    width: f32,
    face: &F,
) -> (&'t str, GlyphMetrics) {
    let ends: Vec<usize> = text
        .match_indices(' ')
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let measure = |k: usize| face.measure(&text[..ends[k]], size);

    let mut best = measure(0);
    if best.width > width || ends.len() == 1 {
        return (&text[..ends[0]], best);
    }

    // ends[lo] fits, ends[hi] (if any) does not
    let mut lo = 0;
    let mut hi = 1;
    while hi < ends.len() {
        let metrics = measure(hi);
        if metrics.width > width {
            break;
        }
        lo = hi;
        best = metrics;
        hi *= 2;
    }
    let mut hi = hi.min(ends.len());
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        let metrics = measure(mid);
        if metrics.width <= width {
            lo = mid;
            best = metrics;
        } else {
            hi = mid;
        }
    }

    (&text[..ends[lo]], best)
}

fn measured_line<F: Typeface + ?Sized>(text: &str, size: f32, face: &F) -> TextLine {
    let metrics = face.measure(text, size);
    TextLine {
        text: text.to_string(),
        width: metrics.width,
        height: metrics.height,
    }
}
