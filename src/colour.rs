/// A straight (non-premultiplied) RGBA colour with 8 bits per channel
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a fully opaque colour from its red, green and blue components
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b, a: 255 }
    }

    /// Create a colour with an explicit alpha component
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Colour {
        Colour { r, g, b, a }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Colour::new_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Colour::new_rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        }
    }
}

impl From<Colour> for image::Rgba<u8> {
    fn from(c: Colour) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Colour> for tiny_skia::Color {
    fn from(c: Colour) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb(c.0, c.1, c.2)
    }
}

impl From<[u8; 4]> for Colour {
    fn from(c: [u8; 4]) -> Self {
        let [r, g, b, a] = c;
        Colour::new_rgba(r, g, b, a)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const TRANSPARENT: Colour = Colour::new_rgba(0, 0, 0, 0);
    pub const BLACK: Colour = Colour::new_rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::new_rgb(255, 255, 255);
    /// Dark ink used for ability text and role names
    pub const INK: Colour = BLACK;
    /// Light fill used for reminder text, `#ECEAED`
    pub const PARCHMENT: Colour = Colour::new_rgb(0xEC, 0xEA, 0xED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Colour::from_hex("#ECEAED"), Some(colours::PARCHMENT));
        assert_eq!(Colour::from_hex("000000"), Some(colours::BLACK));
        assert_eq!(
            Colour::from_hex("#10203040"),
            Some(Colour::new_rgba(0x10, 0x20, 0x30, 0x40))
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Colour::from_hex("#ECEAE"), None);
        assert_eq!(Colour::from_hex("#GGGGGG"), None);
        assert_eq!(Colour::from_hex("#éééé"), None);
    }
}
