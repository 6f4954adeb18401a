use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of PDF object a written [Document](crate::Document) contains.
/// Per-page objects are keyed by the page's position in the document
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Image(usize),
    ImageMask(usize),
}

/// Allocates object ids in order and remembers what each one was allocated for
pub struct ObjectReferences {
    allocated: HashMap<RefType, Ref>,
    next: Ref,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            allocated: HashMap::new(),
            next: Ref::new(1),
        }
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.allocated.get(&ref_type).copied()
    }

    /// Allocate the next id for `ref_type`. Allocating twice for the same object
    /// replaces the earlier id
    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = self.next.bump();
        self.allocated.insert(ref_type, id);
        id
    }
}
