//! Accumulating pages into a merged `lopdf` document.
//!
//! The writer owns a fresh document with its own catalog and page tree.
//! Appended documents are renumbered above the writer's highest object id
//! and their pages are re-parented directly under the output page tree.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::error::CodecError;
use crate::io::{LopdfDocument, PageWriter};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth; guards against `Parent` cycles.
const MAX_TREE_DEPTH: usize = 64;

/// Output accumulator for [`LopdfCodec`](crate::io::LopdfCodec).
#[derive(Debug)]
pub struct LopdfWriter {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    documents_appended: usize,
}

impl LopdfWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.4");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
            documents_appended: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn page_count(&self) -> usize {
        self.kids.len()
    }
}

impl Default for LopdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter<LopdfDocument> for LopdfWriter {
    fn append_pages(&mut self, document: LopdfDocument) -> Result<usize, CodecError> {
        let mut source = document.into_inner();

        // Avoid object id collisions with everything appended so far
        source.renumber_objects_with(self.document.max_id + 1);

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

        for &page_id in &page_ids {
            let inherited = inherited_attributes(&source, page_id);
            let page = source
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|e| {
                    CodecError::Malformed(format!("page object {} {}: {e}", page_id.0, page_id.1))
                })?;

            for (key, value) in inherited {
                page.set(key, value);
            }
            page.set("Parent", self.pages_id);
        }

        if self.documents_appended == 0 || source.version > self.document.version {
            self.document.version = source.version.clone();
        }

        self.document.max_id = self.document.max_id.max(source.max_id);
        self.document.objects.extend(source.objects);
        self.kids
            .extend(page_ids.iter().map(|&id| Object::Reference(id)));
        self.documents_appended += 1;

        Ok(page_ids.len())
    }

    fn serialize(mut self) -> Result<Vec<u8>, CodecError> {
        if self.documents_appended == 0 {
            return Err(CodecError::Write("no documents were appended".to_string()));
        }

        let count = self.kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        // Source catalogs and page tree nodes are unreachable now
        self.document.prune_objects();
        self.document.renumber_objects();
        self.document.compress();

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| CodecError::Write(e.to_string()))?;

        Ok(buffer)
    }
}

/// Collect inheritable attributes the page lacks from its nearest ancestors.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };

    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        if missing.is_empty() {
            break;
        }
        let Some(node_id) = parent else {
            break;
        };
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    found
}
