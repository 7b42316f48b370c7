//! PDF processing layer
//!
//! Page assembly and security go through qpdf, page dictionary edits through
//! lopdf, rasterization and text through PDFium.

mod edit;
pub mod pages;
mod qpdf;
mod render;

use crate::error::{Error, Result};

pub use edit::{
    add_page_numbers, add_watermark, crop, extract_metadata, images_to_pdf, rotate, CropBox,
    MetadataEntry,
};
pub use qpdf::QpdfWrapper;
pub use render::{
    extract_images, extract_text, flatten, pdfium_available, render_pages_to_png, ExtractedImage,
    RenderedPage,
};

/// Reject buffers that do not start with a PDF header.
pub(crate) fn ensure_pdf(data: &[u8]) -> Result<()> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        });
    }
    Ok(())
}
