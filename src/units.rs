use derive_more::{Add, AddAssign, Display, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};

/// PDF points (1/72 of an inch). Pages are rasterised in pixels, so points only
/// show up when sizing the media box of a written document.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Sum,
    From,
    Into,
    Display,
)]
pub struct Pt(pub f32);

impl Pt {
    /// Convert a pixel length at the given resolution into points
    pub fn from_pixels(pixels: u32, dpi: u32) -> Pt {
        Pt(pixels as f32 * 72.0 / dpi as f32)
    }
}
