//! Minimal OOXML writers for PDF -> DOCX / XLSX conversion
//!
//! Only the parts Word and Excel require are written: content types,
//! package relationships and a single document or worksheet part.

use crate::convert::archive::bundle;
use crate::error::Result;
use quick_xml::escape::escape;

const DOCX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const DOCX_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const XLSX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const XLSX_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const XLSX_WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const XLSX_WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Drop characters XML 1.0 cannot carry (OCR output ends pages with form feeds).
fn xml_text(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|&c| c == '\t' || c == '\n' || c >= ' ')
        .collect();
    escape(cleaned.as_str()).into_owned()
}

/// Build a DOCX with one paragraph per entry; newlines become line breaks.
pub fn docx_from_paragraphs(paragraphs: &[String]) -> Result<Vec<u8>> {
    let mut body = String::new();
    for paragraph in paragraphs {
        body.push_str("<w:p><w:r>");
        for (i, line) in paragraph.trim_end().split('\n').enumerate() {
            if i > 0 {
                body.push_str("<w:br/>");
            }
            body.push_str(r#"<w:t xml:space="preserve">"#);
            body.push_str(&xml_text(line));
            body.push_str("</w:t>");
        }
        body.push_str("</w:r></w:p>");
    }

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    );

    bundle(&[
        ("[Content_Types].xml", DOCX_CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", DOCX_RELS.as_bytes()),
        ("word/document.xml", document.as_bytes()),
    ])
}

/// Spreadsheet column name for a 0-based index (0 -> A, 26 -> AA).
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

/// Build an XLSX with one sheet; every cell is stored as an inline string.
pub fn xlsx_from_rows(rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut sheet_data = String::new();
    for (r, row) in rows.iter().enumerate() {
        sheet_data.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            sheet_data.push_str(&format!(
                r#"<c r="{}{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                column_name(c),
                r + 1,
                xml_text(cell)
            ));
        }
        sheet_data.push_str("</row>");
    }

    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        sheet_data
    );

    bundle(&[
        ("[Content_Types].xml", XLSX_CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", XLSX_RELS.as_bytes()),
        ("xl/workbook.xml", XLSX_WORKBOOK.as_bytes()),
        ("xl/_rels/workbook.xml.rels", XLSX_WORKBOOK_RELS.as_bytes()),
        ("xl/worksheets/sheet1.xml", sheet.as_bytes()),
    ])
}

/// Split OCR text into spreadsheet rows: one row per non-blank line,
/// one cell per whitespace-separated token.
pub fn rows_from_text(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn read_part(archive: &[u8], name: &str) -> String {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        let mut part = zip.by_name(name).unwrap();
        let mut out = String::new();
        part.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_xml_text_escapes_and_strips_controls() {
        assert_eq!(xml_text("a < b & c\u{c}"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_docx_parts() {
        let docx =
            docx_from_paragraphs(&["Invoice #1\nTotal: 5 < 6".to_string(), "Page two".to_string()])
                .unwrap();
        let document = read_part(&docx, "word/document.xml");
        assert_eq!(document.matches("<w:p>").count(), 2);
        assert!(document.contains("<w:br/>"));
        assert!(document.contains("Total: 5 &lt; 6"));
        assert!(read_part(&docx, "[Content_Types].xml").contains("/word/document.xml"));
    }

    #[test]
    fn test_xlsx_cells() {
        let rows = rows_from_text("Item Qty\n\n  Apples 3  \n");
        assert_eq!(
            rows,
            vec![
                vec!["Item".to_string(), "Qty".to_string()],
                vec!["Apples".to_string(), "3".to_string()],
            ]
        );

        let xlsx = xlsx_from_rows(&rows).unwrap();
        let sheet = read_part(&xlsx, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<c r="B2" t="inlineStr"><is><t xml:space="preserve">3</t>"#));
        assert_eq!(sheet.matches("<row ").count(), 2);
    }
}
