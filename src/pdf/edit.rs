//! Page dictionary edits using lopdf
//!
//! Rotation, crop boxes, stamped text (watermarks and page numbers),
//! document info extraction and image-to-PDF assembly.

use crate::error::{Error, Result};
use crate::pdf::{ensure_pdf, QpdfWrapper};
use chrono::{FixedOffset, NaiveDate, TimeZone};
use image::codecs::jpeg::JpegDecoder;
use image::{ExtendedColorType, ImageDecoder, ImageFormat};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Cursor;

/// Resource name under which the stamping font is registered
const STAMP_FONT: &[u8] = b"WbHelv";

/// Depth limit when walking the page tree for inherited attributes
const MAX_TREE_DEPTH: usize = 32;

/// Page box assumed when a page declares none
const LETTER: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Images without resolution metadata are placed at this density
const IMAGE_DPI: f32 = 96.0;

/// Crop rectangle in points, origin at the top-left of the page, y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl CropBox {
    fn validate(&self) -> Result<()> {
        let finite = [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::invalid("crop box", "coordinates must be numbers"));
        }
        if self.x0 >= self.x1 || self.y0 >= self.y1 {
            return Err(Error::invalid(
                "crop box",
                "x0 must be less than x1 and y0 less than y1",
            ));
        }
        Ok(())
    }
}

/// One entry of the document information dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

fn parse(data: &[u8]) -> Result<Document> {
    Document::load_mem(data).map_err(|e| Error::InvalidPdf {
        reason: e.to_string(),
    })
}

/// Load for editing. Encrypted files are opened through qpdf with the
/// empty user password first, since lopdf keeps their streams encrypted.
fn load(data: &[u8]) -> Result<Document> {
    ensure_pdf(data)?;
    match parse(data) {
        Ok(doc) if !doc.trailer.has(b"Encrypt") => Ok(doc),
        Ok(_) => parse(&QpdfWrapper::remove_encryption(data)?),
        Err(_) if mentions_encrypt(data) => parse(&QpdfWrapper::remove_encryption(data)?),
        Err(e) => Err(e),
    }
}

fn mentions_encrypt(data: &[u8]) -> bool {
    data.windows(b"/Encrypt".len()).any(|w| w == b"/Encrypt")
}

fn save(doc: &mut Document) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    doc.save_to(&mut output)?;
    Ok(output)
}

fn deref<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Look up a page attribute, following /Parent for inheritable keys.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_object(page_id).and_then(Object::as_dict).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return deref(doc, value).ok();
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_object(parent).and_then(Object::as_dict).ok()?;
    }
    None
}

fn page_dict_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary> {
    Ok(doc.get_object_mut(page_id)?.as_dict_mut()?)
}

fn read_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<[f32; 4]> {
    let values = inherited(doc, page_id, key)?.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let mut rect = [0.0f32; 4];
    for (slot, value) in rect.iter_mut().zip(values) {
        *slot = deref(doc, value).ok()?.as_float().ok()?;
    }
    // Normalize so that llx <= urx and lly <= ury
    let [a, b, c, d] = rect;
    Some([a.min(c), b.min(d), a.max(c), b.max(d)])
}

/// Visible page box as [llx, lly, urx, ury], CropBox first, then MediaBox.
fn page_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    read_box(doc, page_id, b"CropBox")
        .or_else(|| read_box(doc, page_id, b"MediaBox"))
        .unwrap_or(LETTER)
}

fn media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    read_box(doc, page_id, b"MediaBox").unwrap_or(LETTER)
}

/// Rotate every page clockwise by `angle` (90, 180 or 270).
///
/// The angle is added to any existing (possibly inherited) /Rotate.
pub fn rotate(data: &[u8], angle: u16) -> Result<Vec<u8>> {
    if !matches!(angle, 90 | 180 | 270) {
        return Err(Error::invalid("angle", "must be 90, 180 or 270"));
    }

    let mut doc = load(data)?;
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for page_id in pages {
        let current = inherited(&doc, page_id, b"Rotate")
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        let rotation = (current + i64::from(angle)).rem_euclid(360);
        page_dict_mut(&mut doc, page_id)?.set("Rotate", Object::Integer(rotation));
    }

    save(&mut doc)
}

/// Apply the same crop box to every page.
///
/// The rectangle is measured from the top-left corner of each page's
/// MediaBox with y growing downwards, and must lie inside that MediaBox.
pub fn crop(data: &[u8], rect: CropBox) -> Result<Vec<u8>> {
    rect.validate()?;

    let mut doc = load(data)?;
    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();

    for (number, page_id) in pages {
        let [llx, lly, urx, ury] = media_box(&doc, page_id);
        let (width, height) = (urx - llx, ury - lly);
        if rect.x0 < 0.0 || rect.y0 < 0.0 || rect.x1 > width || rect.y1 > height {
            return Err(Error::invalid(
                "crop box",
                format!("must lie within page {} ({} x {} pt)", number, width, height),
            ));
        }

        page_dict_mut(&mut doc, page_id)?.set(
            "CropBox",
            Object::Array(vec![
                Object::Real(llx + rect.x0),
                Object::Real(ury - rect.y1),
                Object::Real(llx + rect.x1),
                Object::Real(ury - rect.y0),
            ]),
        );
    }

    save(&mut doc)
}

/// Stamp `text` diagonally across the centre of every page.
///
/// 20 pt Helvetica, 50% grey, rotated 45 degrees.
pub fn add_watermark(data: &[u8], text: &str) -> Result<Vec<u8>> {
    const FONT_SIZE: f32 = 20.0;

    let text = text.trim();
    if text.is_empty() {
        return Err(Error::missing("watermark text"));
    }

    let mut doc = load(data)?;
    let font_id = add_stamp_font(&mut doc);
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let literal = pdf_literal(text);

    // Helvetica averages roughly half an em per glyph
    let half_width = text.chars().count() as f32 * FONT_SIZE * 0.5 / 2.0;
    let (sin, cos) = std::f32::consts::FRAC_PI_4.sin_cos();

    for page_id in pages {
        let [llx, lly, urx, ury] = page_box(&doc, page_id);
        let cx = (llx + urx) / 2.0 - half_width * cos;
        let cy = (lly + ury) / 2.0 - half_width * sin;
        let ops = format!(
            "BT /{font} {size} Tf 0.5 0.5 0.5 rg {cos:.4} {sin:.4} {nsin:.4} {cos:.4} {cx:.2} {cy:.2} Tm {literal} Tj ET",
            font = String::from_utf8_lossy(STAMP_FONT),
            size = FONT_SIZE,
            nsin = -sin,
        );
        stamp(&mut doc, page_id, font_id, ops)?;
    }

    save(&mut doc)
}

/// Stamp the 1-based page number 72 pt from the left and 20 pt from the top.
pub fn add_page_numbers(data: &[u8]) -> Result<Vec<u8>> {
    const FONT_SIZE: f32 = 12.0;

    let mut doc = load(data)?;
    let font_id = add_stamp_font(&mut doc);
    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();

    for (number, page_id) in pages {
        let [llx, _, _, ury] = page_box(&doc, page_id);
        let ops = format!(
            "BT /{} {} Tf 0 g {:.2} {:.2} Td ({}) Tj ET",
            String::from_utf8_lossy(STAMP_FONT),
            FONT_SIZE,
            llx + 72.0,
            ury - 20.0 - FONT_SIZE,
            number
        );
        stamp(&mut doc, page_id, font_id, ops)?;
    }

    save(&mut doc)
}

fn add_stamp_font(doc: &mut Document) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    doc.add_object(Object::Dictionary(font))
}

/// Append `ops` to the page content, isolated from the existing graphics state.
fn stamp(doc: &mut Document, page_id: ObjectId, font_id: ObjectId, ops: String) -> Result<()> {
    // Effective resources, copied inline so shared dictionaries stay untouched
    let mut resources = match inherited(doc, page_id, b"Resources") {
        Some(Object::Dictionary(dict)) => dict.clone(),
        _ => Dictionary::new(),
    };
    let mut fonts = match resources.get(b"Font").map(|f| deref(doc, f)) {
        Ok(Ok(Object::Dictionary(dict))) => dict.clone(),
        _ => Dictionary::new(),
    };
    fonts.set(STAMP_FONT.to_vec(), Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let existing: Vec<Object> = match doc.get_object(page_id)?.as_dict()?.get(b"Contents") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        _ => Vec::new(),
    };

    let open_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let stamp_id = doc.add_object(Stream::new(
        Dictionary::new(),
        format!("\nQ\nq {} Q\n", ops).into_bytes(),
    ));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(open_id));
    contents.extend(existing);
    contents.push(Object::Reference(stamp_id));

    let page = page_dict_mut(doc, page_id)?;
    page.set("Resources", Object::Dictionary(resources));
    page.set("Contents", Object::Array(contents));
    Ok(())
}

/// Encode text as a PDF literal string in WinAnsi (Latin-1 subset).
fn pdf_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c if (c as u32) < 0x20 => out.push(' '),
            c if (c as u32) < 0x80 => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

/// Read the document information dictionary as key/value pairs.
///
/// Date values are rendered as RFC 3339 when they parse.
pub fn extract_metadata(data: &[u8]) -> Result<Vec<MetadataEntry>> {
    let doc = load(data)?;

    let info = match doc.trailer.get(b"Info") {
        Ok(object) => match deref(&doc, object)? {
            Object::Dictionary(dict) => dict,
            _ => return Ok(Vec::new()),
        },
        Err(_) => return Ok(Vec::new()),
    };

    let mut entries = Vec::new();
    for (key, value) in info.iter() {
        let key = String::from_utf8_lossy(key).to_string();
        let value = match deref(&doc, value)? {
            Object::String(bytes, _) => {
                let text = decode_text_string(bytes);
                if key.ends_with("Date") {
                    parse_pdf_date(&text).unwrap_or(text)
                } else {
                    text
                }
            }
            Object::Name(name) => String::from_utf8_lossy(name).to_string(),
            Object::Integer(i) => i.to_string(),
            Object::Real(r) => r.to_string(),
            Object::Boolean(b) => b.to_string(),
            _ => continue,
        };
        entries.push(MetadataEntry { key, value });
    }

    Ok(entries)
}

/// PDFDocEncoding code points 0x80..=0xA0 (0x9F is undefined)
const PDF_DOC_HIGH: [char; 33] = [
    '\u{2022}', '\u{2020}', '\u{2021}', '\u{2026}', '\u{2014}', '\u{2013}', '\u{0192}', '\u{2044}',
    '\u{2039}', '\u{203A}', '\u{2212}', '\u{2030}', '\u{201E}', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '\u{201A}', '\u{2122}', '\u{FB01}', '\u{FB02}', '\u{0141}', '\u{0152}', '\u{0160}',
    '\u{0178}', '\u{017D}', '\u{0131}', '\u{0142}', '\u{0153}', '\u{0161}', '\u{017E}', '\u{FFFD}',
    '\u{20AC}',
];

/// PDFDocEncoding code points 0x18..=0x1F (spacing accents)
const PDF_DOC_ACCENTS: [char; 8] = [
    '\u{02D8}', '\u{02C7}', '\u{02C6}', '\u{02D9}', '\u{02DD}', '\u{02DB}', '\u{02DA}', '\u{02DC}',
];

fn pdf_doc_char(byte: u8) -> char {
    match byte {
        0x18..=0x1F => PDF_DOC_ACCENTS[usize::from(byte - 0x18)],
        0x80..=0xA0 => PDF_DOC_HIGH[usize::from(byte - 0x80)],
        0xAD => '\u{FFFD}',
        _ => char::from(byte),
    }
}

/// Decode a PDF text string: UTF-16BE or UTF-8 with BOM, otherwise PDFDocEncoding.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).to_string();
    }
    bytes.iter().copied().map(pdf_doc_char).collect()
}

/// Parse `D:YYYYMMDDHHmmSSOHH'mm'` (every part after the year optional).
fn parse_pdf_date(raw: &str) -> Option<String> {
    let s = raw.trim().strip_prefix("D:").unwrap_or(raw.trim());
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return None;
    }

    let field = |start: usize, len: usize, default: u32| -> Option<u32> {
        match digits.get(start..start + len) {
            Some(part) => part.parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = digits[0..4].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(4, 2, 1)?, field(6, 2, 1)?)?;
    let naive = date.and_hms_opt(field(8, 2, 0)?, field(10, 2, 0)?, field(12, 2, 0)?)?;

    let rest = &s[digits.len()..];
    let offset_secs = match rest.chars().next() {
        Some(sign @ ('+' | '-')) => {
            let tz: String = rest[1..].chars().filter(|c| c.is_ascii_digit()).collect();
            let hours: i32 = tz.get(0..2)?.parse().ok()?;
            let minutes: i32 = tz.get(2..4).and_then(|m| m.parse().ok()).unwrap_or(0);
            let secs = hours * 3600 + minutes * 60;
            if sign == '-' {
                -secs
            } else {
                secs
            }
        }
        _ => 0,
    };

    let offset = FixedOffset::east_opt(offset_secs)?;
    let stamped = offset.from_local_datetime(&naive).single()?;
    Some(stamped.to_rfc3339())
}

/// Build one PDF page per image, in the given order.
///
/// JPEGs in grey or RGB are embedded as-is (DCTDecode); everything else is
/// decoded and stored as RGB samples. Pages are sized at 96 DPI.
pub fn images_to_pdf(images: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(Error::missing("at least one image"));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::with_capacity(images.len());

    for (name, data) in images {
        let format = image::guess_format(data).map_err(|_| Error::UnsupportedFile {
            name: name.to_string(),
        })?;
        let (xobject, width, height) = match format {
            ImageFormat::Jpeg => match jpeg_xobject(data)? {
                Some(found) => found,
                None => decoded_xobject(data)?,
            },
            ImageFormat::Png
            | ImageFormat::Gif
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::WebP => decoded_xobject(data)?,
            _ => {
                return Err(Error::UnsupportedFile {
                    name: name.to_string(),
                })
            }
        };

        let image_id = doc.add_object(xobject);
        let page_w = width as f32 * 72.0 / IMAGE_DPI;
        let page_h = height as f32 * 72.0 / IMAGE_DPI;

        let content = format!("q {:.2} 0 0 {:.2} 0 0 cm /Im0 Do Q", page_w, page_h);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set("Im0", Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_w),
                Object::Real(page_h),
            ]),
        );
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));

        kids.push(Object::Reference(doc.add_object(Object::Dictionary(page))));
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(kids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut info = Dictionary::new();
    info.set(
        "Producer",
        Object::String(b"pdf-workbench".to_vec(), StringFormat::Literal),
    );
    let info_id = doc.add_object(Object::Dictionary(info));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();
    save(&mut doc)
}

fn image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

/// Embed JPEG bytes untouched when the colour model maps directly.
fn jpeg_xobject(data: &[u8]) -> Result<Option<(Stream, u32, u32)>> {
    let decoder = JpegDecoder::new(Cursor::new(data))?;
    let (width, height) = decoder.dimensions();
    let color_space = match decoder.original_color_type() {
        ExtendedColorType::L8 => "DeviceGray",
        ExtendedColorType::Rgb8 => "DeviceRGB",
        _ => return Ok(None),
    };

    let mut dict = image_dict(width, height, color_space);
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
    let mut stream = Stream::new(dict, data.to_vec());
    stream.allows_compression = false;
    Ok(Some((stream, width, height)))
}

fn decoded_xobject(data: &[u8]) -> Result<(Stream, u32, u32)> {
    let decoded = image::load_from_memory(data)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let stream = Stream::new(image_dict(width, height, "DeviceRGB"), rgb.into_raw());
    Ok((stream, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_literal_escapes() {
        assert_eq!(pdf_literal("a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(pdf_literal("é"), "(\\351)");
        assert_eq!(pdf_literal("日"), "(?)");
    }

    #[test]
    fn test_decode_text_string() {
        assert_eq!(decode_text_string(b"Report"), "Report");
        assert_eq!(
            decode_text_string(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]),
            "Hi"
        );
        assert_eq!(
            decode_text_string(b"\xEF\xBB\xBFna\xC3\xAFve"),
            "na\u{EF}ve"
        );
    }

    #[test]
    fn test_decode_pdf_doc_encoding() {
        assert_eq!(decode_text_string(b"A\x84B"), "A\u{2014}B");
        assert_eq!(decode_text_string(b"Acme\x92"), "Acme\u{2122}");
        assert_eq!(
            decode_text_string(b"\x8Dquoted\x8E"),
            "\u{201C}quoted\u{201D}"
        );
        assert_eq!(
            decode_text_string(b"\xA0 \x95\xF3d\xBC"),
            "\u{20AC} \u{141}\u{F3}d\u{BC}"
        );
        assert_eq!(decode_text_string(b"\x1F"), "\u{2DC}");
    }

    #[test]
    fn test_parse_pdf_date_full() {
        assert_eq!(
            parse_pdf_date("D:20240315143000+01'00'").as_deref(),
            Some("2024-03-15T14:30:00+01:00")
        );
    }

    #[test]
    fn test_parse_pdf_date_partial() {
        assert_eq!(
            parse_pdf_date("D:2023").as_deref(),
            Some("2023-01-01T00:00:00+00:00")
        );
        assert_eq!(
            parse_pdf_date("20230102Z").as_deref(),
            Some("2023-01-02T00:00:00+00:00")
        );
    }

    #[test]
    fn test_parse_pdf_date_invalid() {
        assert_eq!(parse_pdf_date("yesterday"), None);
        assert_eq!(parse_pdf_date("D:20231340"), None);
    }

    #[test]
    fn test_crop_box_validation() {
        let ok = CropBox {
            x0: 0.0,
            y0: 0.0,
            x1: 100.0,
            y1: 100.0,
        };
        assert!(ok.validate().is_ok());

        let inverted = CropBox { x0: 100.0, ..ok };
        assert!(matches!(
            inverted.validate(),
            Err(Error::InvalidParameter { .. })
        ));

        let nan = CropBox { y1: f32::NAN, ..ok };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_rotate_rejects_odd_angles() {
        assert!(matches!(
            rotate(b"%PDF-1.5", 45),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_images_to_pdf_rejects_garbage() {
        let result = images_to_pdf(&[("notes.txt", b"hello world".as_slice())]);
        assert!(matches!(result, Err(Error::UnsupportedFile { .. })));
    }
}
