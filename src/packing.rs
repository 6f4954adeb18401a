//! Close packing of circular tokens onto fixed-size pages.
//!
//! Tokens are laid out left to right in rows. Every other row is shifted right by
//! half a diameter so that the circles of neighbouring rows nest into each other's
//! gaps, and rows are `radius·√3` apart (the height of the equilateral triangle
//! formed by three touching circles). When the next row would run off the bottom
//! of the page the page is committed and a fresh one started. Pages that never
//! received a token are never committed.

use crate::raster::Raster;
use std::borrow::Cow;

/// Page dimensions and token spacing, in pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PackingGeometry {
    pub page_width: u32,
    pub page_height: u32,
    /// Gap between neighbouring tokens, both within and between rows
    pub padding: u32,
}

/// Where the next token goes on the current page
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PackingCursor {
    pub x: f32,
    pub y: f32,
    /// Whether the row after the current one starts flush left
    pub row_is_inset: bool,
}

/// The outcome of claiming a spot with [PackingCursor::advance]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Top-left corner of the token, truncated to whole pixels
    pub x: i64,
    pub y: i64,
    /// The next row does not fit on this page
    pub page_full: bool,
}

impl PackingCursor {
    /// A cursor at the top-left of an empty page
    pub fn origin() -> PackingCursor {
        PackingCursor::default()
    }

    /// A page is blank for as long as its cursor has not moved
    pub fn is_blank(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Claim the current position for a token of `diameter` pixels and move on
    /// to the next one, wrapping onto a new row when the row is full
    pub fn advance(&mut self, geometry: &PackingGeometry, diameter: f32) -> Placement {
        let x = self.x as i64;
        let y = self.y as i64;
        let padding = geometry.padding as f32;

        self.x += diameter + padding;
        let mut page_full = false;
        if self.x + diameter > geometry.page_width as f32 {
            self.x = if self.row_is_inset {
                0.0
            } else {
                diameter / 2.0 + padding
            };
            self.row_is_inset = !self.row_is_inset;
            self.y += (diameter / 2.0) * 3f32.sqrt() + padding;
            page_full = self.y + diameter > geometry.page_height as f32;
        }

        Placement { x, y, page_full }
    }
}

/// A page being filled: its canvas and the cursor filling it
pub struct Page {
    pub canvas: Raster,
    pub cursor: PackingCursor,
}

impl Page {
    pub fn new(geometry: &PackingGeometry) -> Page {
        Page {
            canvas: Raster::new(geometry.page_width, geometry.page_height),
            cursor: PackingCursor::origin(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.cursor.is_blank()
    }
}

/// Where a token ended up
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlacedToken {
    /// Index of the committed page the token is (or will be) on
    pub page: usize,
    pub x: i64,
    pub y: i64,
}

/// Packs tokens onto pages, committing pages as they fill up.
///
/// Every token is given a square cell `diameter` pixels across. The diameter is
/// either fixed up front or taken from the larger side of the first token ever
/// added; either way it never changes afterwards. Tokens bigger than the cell are
/// scaled down to fit it, smaller ones are placed as they are.
pub struct PagePacker {
    geometry: PackingGeometry,
    diameter: Option<u32>,
    page: Page,
    pages: Vec<Raster>,
    placements: Vec<PlacedToken>,
}

impl PagePacker {
    pub fn new(page_width: u32, page_height: u32, padding: u32, diameter: Option<u32>) -> PagePacker {
        PagePacker::with_geometry(
            PackingGeometry {
                page_width,
                page_height,
                padding,
            },
            diameter,
        )
    }

    pub fn with_geometry(geometry: PackingGeometry, diameter: Option<u32>) -> PagePacker {
        PagePacker {
            geometry,
            diameter: diameter.map(|d| d.max(1)),
            page: Page::new(&geometry),
            pages: Vec::new(),
            placements: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PackingGeometry {
        &self.geometry
    }

    /// The cell size, once it has been fixed or inferred
    pub fn diameter(&self) -> Option<u32> {
        self.diameter
    }

    /// The page currently being filled
    pub fn current_page(&self) -> &Page {
        &self.page
    }

    /// Pages committed so far, in order
    pub fn pages(&self) -> &[Raster] {
        &self.pages
    }

    /// Every token placed so far, in the order they were added
    pub fn placements(&self) -> &[PlacedToken] {
        &self.placements
    }

    /// Place a token on the current page, starting a new page if the next row
    /// would not fit
    pub fn add(&mut self, token: &Raster) {
        let diameter = *self
            .diameter
            .get_or_insert_with(|| token.width().max(token.height()));

        let token = if token.width() > diameter || token.height() > diameter {
            log::debug!(
                "scaling {}x{} token down to {diameter}px",
                token.width(),
                token.height()
            );
            let mut scaled = token.clone();
            scaled.resize(diameter, diameter);
            Cow::Owned(scaled)
        } else {
            Cow::Borrowed(token)
        };

        let placement = self.page.cursor.advance(&self.geometry, diameter as f32);
        self.page.canvas.composite(&token, placement.x, placement.y);
        self.placements.push(PlacedToken {
            page: self.pages.len(),
            x: placement.x,
            y: placement.y,
        });

        if placement.page_full {
            self.commit_page();
        }
    }

    /// Commit the current page if anything was placed on it
    pub fn flush(&mut self) {
        self.commit_page();
    }

    /// Flush and hand over every committed page
    pub fn finish(mut self) -> Vec<Raster> {
        self.flush();
        self.pages
    }

    fn commit_page(&mut self) {
        let fresh = Page::new(&self.geometry);
        let page = std::mem::replace(&mut self.page, fresh);
        if page.is_blank() {
            log::debug!("discarding blank page");
            return;
        }
        self.pages.push(page.canvas);
        log::debug!("committed page {}", self.pages.len());
    }
}
