//! Shared fixtures for the integration tests.
//!
//! PDFs are generated on the fly with `lopdf`. Every page draws the text
//! `<label>-Page-<n>` so tests can tell pages apart after a merge.

use std::collections::BTreeMap;
use std::sync::Arc;

use lopdf::encryption::crypt_filters::{Aes128CryptFilter, CryptFilter};
use lopdf::{
    Document, EncryptionState, EncryptionVersion, Object, ObjectId, Permissions, Stream,
    StringFormat, dictionary,
};

/// Security handler used by [`encrypted_pdf_with_pages`].
#[derive(Debug, Clone, Copy)]
pub enum Cipher {
    /// RC4, 128-bit key (`/V 2`).
    Rc4,
    /// AES-128 through a crypt filter (`/V 4`).
    Aes128,
}

/// Build a PDF with `pages` pages labelled `label`.
pub fn pdf_with_pages(label: &str, pages: u32) -> Vec<u8> {
    save(document_with_pages(label, pages))
}

/// Like [`pdf_with_pages`], encrypted with the given user password.
pub fn encrypted_pdf_with_pages(
    label: &str,
    pages: u32,
    cipher: Cipher,
    user_password: &str,
) -> Vec<u8> {
    let mut doc = document_with_pages(label, pages);
    doc.trailer.set(
        "ID",
        vec![
            Object::String(b"pdfmerge-fixture".to_vec(), StringFormat::Literal),
            Object::String(b"pdfmerge-fixture".to_vec(), StringFormat::Literal),
        ],
    );

    let version = match cipher {
        Cipher::Rc4 => EncryptionVersion::V2 {
            document: &doc,
            owner_password: "owner-pass",
            user_password,
            key_length: 128,
            permissions: Permissions::all(),
        },
        Cipher::Aes128 => {
            let filter: Arc<dyn CryptFilter> = Arc::new(Aes128CryptFilter);
            EncryptionVersion::V4 {
                document: &doc,
                encrypt_metadata: true,
                crypt_filters: BTreeMap::from([(b"StdCF".to_vec(), filter)]),
                stream_filter: b"StdCF".to_vec(),
                string_filter: b"StdCF".to_vec(),
                owner_password: "owner-pass",
                user_password,
                permissions: Permissions::all(),
            }
        }
    };
    let state = EncryptionState::try_from(version).expect("Failed to set up encryption");
    doc.encrypt(&state).expect("Failed to encrypt fixture");
    save(doc)
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to write fixture PDF");
    bytes
}

fn document_with_pages(label: &str, pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for n in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 720 Td ({label}-Page-{n}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Content stream text of every page, in page order.
pub fn page_texts(pdf: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(pdf).expect("Output is not a readable PDF");
    doc.get_pages()
        .into_values()
        .map(|id: ObjectId| {
            let content = doc.get_page_content(id).expect("Page has no content");
            String::from_utf8_lossy(&content).into_owned()
        })
        .collect()
}
