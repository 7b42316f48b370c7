//! PDFium-backed rasterization, image extraction, text extraction and flattening

use crate::error::{Error, Result};
use crate::pdf::ensure_pdf;
use pdfium_render::prelude::*;

/// Upper bound on pixels per rendered page
const MAX_RENDER_PIXELS: f32 = 100_000_000.0;

/// A page rendered to PNG
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page number (1-indexed)
    pub page: u32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// PNG encoded bytes
    pub png: Vec<u8>,
}

/// Extracted image information
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    /// Page number (1-indexed)
    pub page: u32,
    /// Image index on the page
    pub index: u32,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// PNG encoded bytes
    pub png: Vec<u8>,
}

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to a bundled library first, then the system one
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Whether a PDFium dynamic library can be bound on this host
pub fn pdfium_available() -> bool {
    create_pdfium().is_ok()
}

/// Map PDFium errors to our error type
fn map_pdfium_error(err: PdfiumError) -> Error {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            Error::PasswordRequired
        }
        _ => Error::Pdfium {
            reason: format!("{}", err),
        },
    }
}

fn open_document<'a>(pdfium: &'a Pdfium, data: &'a [u8]) -> Result<PdfDocument<'a>> {
    ensure_pdf(data)?;
    pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(map_pdfium_error)
}

fn encode_png(image: &image::DynamicImage) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    image.write_to(
        &mut std::io::Cursor::new(&mut png_bytes),
        image::ImageFormat::Png,
    )?;
    Ok(png_bytes)
}

/// Render every page to PNG at the given resolution
pub fn render_pages_to_png(data: &[u8], dpi: u16) -> Result<Vec<RenderedPage>> {
    if dpi == 0 {
        return Err(Error::invalid("dpi", "must be positive"));
    }

    let pdfium = create_pdfium()?;
    let document = open_document(&pdfium, data)?;
    let scale = f32::from(dpi) / 72.0;

    let mut rendered = Vec::new();

    for (index, page) in document.pages().iter().enumerate() {
        let page_num = index as u32 + 1;

        let pixels = page.width().value * scale * page.height().value * scale;
        if pixels > MAX_RENDER_PIXELS {
            return Err(Error::invalid(
                "dpi",
                format!("page {} would exceed the render size limit", page_num),
            ));
        }

        let config = PdfRenderConfig::new()
            .scale_page_by_factor(scale)
            .render_form_data(true)
            .render_annotations(true);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| Error::Pdfium {
                reason: format!("Failed to render page {}: {}", page_num, e),
            })?;

        let dynamic_image = bitmap.as_image();

        rendered.push(RenderedPage {
            page: page_num,
            width: dynamic_image.width(),
            height: dynamic_image.height(),
            png: encode_png(&dynamic_image)?,
        });
    }

    Ok(rendered)
}

/// Extract embedded images as PNG
pub fn extract_images(data: &[u8]) -> Result<Vec<ExtractedImage>> {
    let pdfium = create_pdfium()?;
    let document = open_document(&pdfium, data)?;

    let mut images = Vec::new();

    for (page_index, page) in document.pages().iter().enumerate() {
        let mut image_index = 0u32;

        for object in page.objects().iter() {
            if let Some(image_object) = object.as_image_object() {
                // Processed image applies masks and colour transforms
                match image_object.get_processed_image(&document) {
                    Ok(dynamic_image) => {
                        images.push(ExtractedImage {
                            page: page_index as u32 + 1,
                            index: image_index,
                            width: dynamic_image.width(),
                            height: dynamic_image.height(),
                            png: encode_png(&dynamic_image)?,
                        });
                        image_index += 1;
                    }
                    Err(e) => {
                        tracing::debug!(
                            page = page_index + 1,
                            error = %e,
                            "skipping undecodable image"
                        );
                    }
                }
            }
        }
    }

    Ok(images)
}

/// Extract the text layer, one entry per page
pub fn extract_text(data: &[u8]) -> Result<Vec<(u32, String)>> {
    let pdfium = create_pdfium()?;
    let document = open_document(&pdfium, data)?;

    document
        .pages()
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let text = page.text().map_err(|e| Error::Pdfium {
                reason: format!("Failed to read text of page {}: {}", index + 1, e),
            })?;
            Ok((index as u32 + 1, text.all()))
        })
        .collect()
}

/// Burn annotations and form fields into the page content
pub fn flatten(data: &[u8]) -> Result<Vec<u8>> {
    let pdfium = create_pdfium()?;
    let document = open_document(&pdfium, data)?;

    let pages = document.pages();
    for index in 0..pages.len() {
        let mut page = pages.get(index).map_err(|e| Error::Pdfium {
            reason: format!("Failed to get page {}: {}", index + 1, e),
        })?;
        page.flatten().map_err(map_pdfium_error)?;
    }

    document.save_to_bytes().map_err(map_pdfium_error)
}
