use crate::{packing::PagePacker, TokenError};
use serde::{Deserialize, Serialize};

/// Settings for printable sheets. The defaults are a US letter page at 300 dpi
/// with 74 pixels of printer margin taken off every side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintableConfig {
    pub page_width: u32,
    pub page_height: u32,
    /// Gap between tokens, in pixels
    pub padding: u32,
    /// Fixed cell size for role tokens; taken from the first token if unset
    pub role_diameter: Option<u32>,
    /// Fixed cell size for reminder tokens; taken from the first token if unset
    pub reminder_diameter: Option<u32>,
    pub dpi: u32,
}

impl Default for PrintableConfig {
    fn default() -> Self {
        PrintableConfig {
            page_width: 2402,
            page_height: 3152,
            padding: 0,
            role_diameter: None,
            reminder_diameter: None,
            dpi: 300,
        }
    }
}

impl PrintableConfig {
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.page_width == 0 || self.page_height == 0 {
            return Err(TokenError::InvalidConfiguration(format!(
                "page size {}x{} is empty",
                self.page_width, self.page_height
            )));
        }
        if self.dpi == 0 {
            return Err(TokenError::InvalidConfiguration("dpi must be positive".into()));
        }
        let diameters = [
            ("role_diameter", self.role_diameter),
            ("reminder_diameter", self.reminder_diameter),
        ];
        for (name, diameter) in diameters {
            match diameter {
                Some(0) => {
                    return Err(TokenError::InvalidConfiguration(format!(
                        "{name} must be positive"
                    )))
                }
                Some(d) if d > self.page_width || d > self.page_height => {
                    return Err(TokenError::InvalidConfiguration(format!(
                        "{name} of {d}px does not fit on a {}x{} page",
                        self.page_width, self.page_height
                    )))
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn role_packer(&self) -> PagePacker {
        PagePacker::new(
            self.page_width,
            self.page_height,
            self.padding,
            self.role_diameter,
        )
    }

    pub fn reminder_packer(&self) -> PagePacker {
        PagePacker::new(
            self.page_width,
            self.page_height,
            self.padding,
            self.reminder_diameter,
        )
    }
}

/// Output sizes of composed tokens, in pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub role_diameter: u32,
    pub reminder_diameter: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        TokenConfig {
            role_diameter: 575,
            reminder_diameter: 325,
        }
    }
}

impl TokenConfig {
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.role_diameter == 0 || self.reminder_diameter == 0 {
            return Err(TokenError::InvalidConfiguration(
                "token diameters must be positive".into(),
            ));
        }
        Ok(())
    }
}
