//! In-process PDF and image fixtures

#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use qpdf::{EncryptionParams, EncryptionParamsR6, PrintPermission, QPdf};
use std::io::Cursor;

/// Build a Letter-sized PDF whose page N shows the text `{prefix}-Page-{N}`.
pub fn sample_pdf(num_pages: u32, prefix: &str) -> Vec<u8> {
    build_pdf(num_pages, prefix, None)
}

/// Same as [`sample_pdf`] with an information dictionary.
pub fn sample_pdf_with_info(num_pages: u32, prefix: &str, info: &[(&str, &str)]) -> Vec<u8> {
    build_pdf(num_pages, prefix, Some(info))
}

fn build_pdf(num_pages: u32, prefix: &str, info: Option<&[(&str, &str)]>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    let font_id = doc.add_object(Object::Dictionary(font));

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    let resources_id = doc.add_object(Object::Dictionary(resources));

    let mut kids = Vec::new();
    for page_num in 1..=num_pages {
        let content = format!("BT /F1 12 Tf 50 700 Td ({}-Page-{}) Tj ET", prefix, page_num);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Reference(resources_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        kids.push(Object::Reference(doc.add_object(Object::Dictionary(page))));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(num_pages as i64));
    pages.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    if let Some(entries) = info {
        let mut dict = Dictionary::new();
        for (key, value) in entries {
            dict.set(
                key.as_bytes().to_vec(),
                Object::String(value.as_bytes().to_vec(), StringFormat::Literal),
            );
        }
        let info_id = doc.add_object(Object::Dictionary(dict));
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Encrypt with an owner password only (AES-256), so it opens without a password.
pub fn owner_restricted_pdf(pdf: &[u8]) -> Vec<u8> {
    let qpdf = QPdf::read_from_memory(pdf).unwrap();
    let encryption = EncryptionParams::R6(EncryptionParamsR6 {
        user_password: String::new(),
        owner_password: "owner".to_string(),
        allow_accessibility: true,
        allow_extract: false,
        allow_assemble: false,
        allow_annotate_and_form: false,
        allow_form_filling: false,
        allow_modify_other: false,
        allow_print: PrintPermission::None,
        encrypt_metadata: true,
    });

    let mut writer = qpdf.writer();
    writer
        .preserve_encryption(false)
        .encryption_params(encryption);
    writer.write_to_memory().unwrap()
}

/// Load a PDF with every stream decompressed.
pub fn load(pdf: &[u8]) -> Document {
    let mut doc = Document::load_mem(pdf).expect("output should be a readable PDF");
    doc.decompress();
    doc
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

pub fn page_count(pdf: &[u8]) -> usize {
    load(pdf).get_pages().len()
}

pub fn page_content(doc: &Document, page_id: ObjectId) -> String {
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).to_string()
}

/// The `{prefix}-Page-{N}` marker of every page, in page order.
pub fn page_labels(pdf: &[u8]) -> Vec<String> {
    let doc = load(pdf);
    page_ids(&doc)
        .into_iter()
        .map(|id| {
            let content = page_content(&doc, id);
            content
                .split('(')
                .skip(1)
                .filter_map(|chunk| chunk.split(')').next())
                .find(|text| text.contains("-Page-"))
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

/// A page attribute as a number, looked up on the page itself.
pub fn page_number_attr(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<f32> {
    let dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
    dict.get(key).ok()?.as_float().ok()
}

pub fn page_box_attr(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Vec<f32>> {
    let dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let values = dict.get(key).ok()?.as_array().ok()?;
    values.iter().map(|v| v.as_float().ok()).collect()
}

pub fn png_image(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn jpeg_image(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 5 % 256) as u8, (y * 7 % 256) as u8, 128])
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), format)
        .unwrap();
    buffer
}
