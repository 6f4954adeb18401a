use crate::{
    image::EncodedImage,
    info::Info,
    packing::PagePacker,
    raster::Raster,
    refs::{ObjectReferences, RefType},
    units::Pt,
    TokenError,
};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};
use std::{io::Write, path::Path};

/// Resolution pages are assumed to be printed at unless told otherwise
pub const DEFAULT_DPI: u32 = 300;

/// A printable sheet of tokens. Tokens are handed to a [PagePacker] as they are
/// added, and every page it commits becomes one page of the PDF produced by
/// [Document::write].
pub struct Document {
    pub info: Option<Info>,
    packer: PagePacker,
    dpi: u32,
}

impl Document {
    pub fn new(packer: PagePacker) -> Document {
        Document {
            info: None,
            packer,
            dpi: DEFAULT_DPI,
        }
    }

    /// Set the resolution used to size pages in points
    pub fn with_dpi(mut self, dpi: u32) -> Document {
        self.dpi = dpi.max(1);
        self
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Pack another token onto the sheet
    pub fn add(&mut self, token: &Raster) {
        self.packer.add(token);
    }

    pub fn packer(&self) -> &PagePacker {
        &self.packer
    }

    /// Flush the packer and render every committed page into a PDF. Returns [None]
    /// when no page was ever committed
    fn render(self) -> Option<(Vec<u8>, usize)> {
        let Document { info, packer, dpi } = self;
        let pages = packer.finish();
        if pages.is_empty() {
            return None;
        }

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for ((page_index, raster), &page_id) in pages.iter().enumerate().zip(page_refs.iter()) {
            let image = EncodedImage::encode(raster);
            let image_id = image.write(&mut refs, page_index, &mut writer);
            log::debug!(
                "page {}: {}x{} px{}",
                page_index + 1,
                raster.width(),
                raster.height(),
                if image.has_mask() { " with alpha" } else { "" }
            );
            let page = PageObjects {
                id: page_id,
                parent: page_tree_id,
                image: image_id,
            };
            write_page(&mut refs, page_index, page, raster, dpi, &mut writer);
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        Some((writer.finish(), pages.len()))
    }

    /// Write the document to the writer, returning the number of pages written.
    /// A document without any committed pages writes nothing at all.
    ///
    /// The whole document is rendered in memory before anything is written.
    pub fn write_to<W: Write>(self, mut w: W) -> Result<usize, TokenError> {
        match self.render() {
            Some((bytes, count)) => {
                w.write_all(bytes.as_slice())?;
                Ok(count)
            }
            None => Ok(0),
        }
    }

    /// Write the document to a file, returning the number of pages written. No file
    /// is created when there is nothing to write.
    pub fn write<P: AsRef<Path>>(self, path: P) -> Result<usize, TokenError> {
        let path = path.as_ref();
        match self.render() {
            Some((bytes, count)) => {
                std::fs::write(path, bytes)?;
                log::info!("wrote {count} page(s) to {}", path.display());
                Ok(count)
            }
            None => {
                log::info!("no pages to write to {}", path.display());
                Ok(0)
            }
        }
    }
}

/// Objects a page links to that are allocated before the page is written
struct PageObjects {
    id: Ref,
    parent: Ref,
    image: Ref,
}

/// A page is a single image XObject stretched over the full media box
fn write_page(
    refs: &mut ObjectReferences,
    page_index: usize,
    objects: PageObjects,
    raster: &Raster,
    dpi: u32,
    writer: &mut Pdf,
) {
    let width = Pt::from_pixels(raster.width(), dpi);
    let height = Pt::from_pixels(raster.height(), dpi);
    let image_name = format!("I{page_index}");

    let content_id = refs.gen(RefType::ContentForPage(page_index));

    let mut page = writer.page(objects.id);
    page.media_box(Rect::new(0.0, 0.0, width.0, height.0));
    page.parent(objects.parent);
    page.contents(content_id);

    let mut resources = page.resources();
    resources
        .x_objects()
        .pair(Name(image_name.as_bytes()), objects.image);
    resources.finish();
    page.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([width.0, 0.0, 0.0, height.0, 0.0, 0.0]);
    content.x_object(Name(image_name.as_bytes()));
    content.restore_state();
    writer.stream(content_id, &content.finish());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle)
            .count()
    }

    fn packer() -> PagePacker {
        PagePacker::new(256, 256, 0, Some(128))
    }

    #[test]
    fn empty_document_writes_nothing() {
        let mut out = Vec::new();
        let pages = Document::new(packer()).write_to(&mut out).expect("write");
        assert_eq!(pages, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_document_creates_no_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.pdf");
        let pages = Document::new(packer()).write(&path).expect("write");
        assert_eq!(pages, 0);
        assert!(!path.exists());
    }

    #[test]
    fn one_pdf_page_per_committed_page() {
        let mut document = Document::new(packer());
        let token = Raster::filled(128, 128, colours::BLACK);
        for _ in 0..4 {
            document.add(&token);
        }
        assert_eq!(document.packer().pages().len(), 1);

        let mut out = Vec::new();
        let pages = document.write_to(&mut out).expect("write");
        assert_eq!(pages, 2);
        assert!(out.starts_with(b"%PDF-"));
        assert_eq!(count(&out, b"/Type /Page\n"), 2);
        assert!(count(&out, b"/Count 2") == 1);
        // every page has a transparent background, so every image gets a mask
        assert_eq!(count(&out, b"/SMask"), 2);
    }

    #[test]
    fn every_kid_is_a_page_object() {
        let mut document = Document::new(packer());
        let token = Raster::filled(128, 128, colours::BLACK);
        for _ in 0..7 {
            document.add(&token);
        }
        let mut out = Vec::new();
        assert_eq!(document.write_to(&mut out).expect("write"), 3);

        // catalog is 1 and the page tree 2, pages follow
        assert_eq!(count(&out, b"/Kids [3 0 R 4 0 R 5 0 R]"), 1);
        for id in [3, 4, 5] {
            assert_eq!(count(&out, format!("\n{id} 0 obj").as_bytes()), 1);
        }
        assert_eq!(count(&out, b"/Parent 2 0 R"), 3);
    }

    #[test]
    fn media_box_is_sized_by_dpi() {
        let mut document = Document::new(PagePacker::new(300, 150, 0, None)).with_dpi(150);
        document.add(&Raster::filled(10, 10, colours::BLACK));
        let mut out = Vec::new();
        document.write_to(&mut out).expect("write");
        assert_eq!(count(&out, b"/MediaBox [0 0 144 72]"), 1);
    }

    #[test]
    fn info_is_written_when_set() {
        let mut document = Document::new(packer());
        let mut info = Info::new();
        info.title("Trouble Brewing");
        document.set_info(info);
        document.add(&Raster::filled(16, 16, colours::WHITE));

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sheet.pdf");
        assert_eq!(document.write(&path).expect("write"), 1);
        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(count(&bytes, b"/Title (Trouble Brewing)"), 1);
    }
}
