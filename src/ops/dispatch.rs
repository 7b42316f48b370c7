//! Operation execution
//!
//! Each operation checks that all of its required inputs are present before
//! doing any work, then runs the synchronous PDF libraries on the blocking
//! pool and external tools on the async runtime.

use crate::convert::{self, ToolConfig};
use crate::error::{Error, Result};
use crate::ops::request::required_text;
use crate::ops::{Artifact, Operation, OperationRequest, UploadedFile};
use crate::pdf::{self, QpdfWrapper};

/// Resolution for "PDF to Images"
pub const PAGE_IMAGE_DPI: u16 = 200;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
const OFFICE_EXTENSIONS: &[&str] = &[
    "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf",
];

async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}

fn check_extension(file: &UploadedFile, allowed: &[&str]) -> Result<()> {
    match file.extension() {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::UnsupportedFile {
            name: file.name.clone(),
        }),
    }
}

fn joined_pages<I: IntoIterator<Item = String>>(pages: I) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(page.trim_end());
        out.push('\n');
    }
    out
}

/// Run one operation and return its downloadable results.
pub async fn execute(request: OperationRequest, tools: &ToolConfig) -> Result<Vec<Artifact>> {
    let operation = request.operation;
    tracing::info!(
        operation = operation.slug(),
        files = request.files.len(),
        "running operation"
    );

    let artifacts = run(request, tools).await?;

    tracing::info!(
        operation = operation.slug(),
        artifacts = artifacts.len(),
        bytes = artifacts.iter().map(Artifact::size).sum::<usize>(),
        "operation complete"
    );
    Ok(artifacts)
}

async fn run(request: OperationRequest, tools: &ToolConfig) -> Result<Vec<Artifact>> {
    let OperationRequest {
        operation,
        mut files,
        insert_file,
        params,
    } = request;

    match operation {
        Operation::ImagesToPdf => {
            if files.is_empty() {
                return Err(Error::missing("at least one image"));
            }
            for file in &files {
                check_extension(file, IMAGE_EXTENSIONS)?;
            }
            let pdf = blocking(move || {
                let images: Vec<(&str, &[u8])> = files
                    .iter()
                    .map(|f| (f.name.as_str(), f.data.as_slice()))
                    .collect();
                pdf::images_to_pdf(&images)
            })
            .await?;
            Ok(vec![Artifact::new("images.pdf", pdf)])
        }

        Operation::PdfToImages => {
            let file = take_primary(&mut files)?;
            let archive = blocking(move || {
                let pages = pdf::render_pages_to_png(&file.data, PAGE_IMAGE_DPI)?;
                let entries: Vec<(String, Vec<u8>)> = pages
                    .into_iter()
                    .map(|p| (format!("page_{}.png", p.page), p.png))
                    .collect();
                convert::bundle(&entries)
            })
            .await?;
            Ok(vec![Artifact::new("pages.zip", archive)])
        }

        Operation::PdfToDocx => {
            let file = take_primary(&mut files)?;
            let pages = convert::ocr_pdf(file.data, tools).await?;
            let docx = blocking(move || convert::docx_from_paragraphs(&pages)).await?;
            Ok(vec![Artifact::new("out.docx", docx)])
        }

        Operation::PdfToSpreadsheet => {
            let file = take_primary(&mut files)?;
            let pages = convert::ocr_pdf(file.data, tools).await?;
            let xlsx = blocking(move || {
                let rows = convert::rows_from_text(&joined_pages(pages));
                convert::xlsx_from_rows(&rows)
            })
            .await?;
            Ok(vec![Artifact::new("out.xlsx", xlsx)])
        }

        Operation::OfficeToPdf => {
            let file = take_primary_named(&mut files, "an office document")?;
            check_extension(&file, OFFICE_EXTENSIONS)?;
            let pdf = convert::office_to_pdf(&file.name, &file.data, tools).await?;
            let name = format!("{}.pdf", convert::external::file_stem(&file.name));
            Ok(vec![Artifact::new(name, pdf)])
        }

        Operation::ConvertEbook => {
            let file = take_primary_named(&mut files, "an ebook file")?;
            let target = required_text(&params.target_format, "a target format")?
                .trim()
                .trim_start_matches('.')
                .to_ascii_lowercase();
            let converted = convert::convert_ebook(&file.name, &file.data, &target, tools).await?;
            let name = format!("{}.{}", convert::external::file_stem(&file.name), target);
            Ok(vec![Artifact::new(name, converted)])
        }

        Operation::MergePdfs => {
            if files.is_empty() {
                return Err(Error::missing("at least one PDF"));
            }
            let merged = blocking(move || {
                let inputs: Vec<&[u8]> = files.iter().map(|f| f.data.as_slice()).collect();
                QpdfWrapper::merge(&inputs)
            })
            .await?;
            Ok(vec![Artifact::new("merged.pdf", merged)])
        }

        Operation::SplitPdf => {
            let file = take_primary(&mut files)?;
            let ranges = required_text(&params.ranges, "page ranges")?.to_string();
            let parts = blocking(move || QpdfWrapper::split(&file.data, &ranges)).await?;
            Ok(parts
                .into_iter()
                .enumerate()
                .map(|(i, data)| Artifact::new(format!("part{}.pdf", i + 1), data))
                .collect())
        }

        Operation::RotatePdf => {
            let file = take_primary(&mut files)?;
            let angle = params.angle.ok_or_else(|| Error::missing("a rotation angle"))?;
            let rotated = blocking(move || pdf::rotate(&file.data, angle)).await?;
            Ok(vec![Artifact::new("rotated.pdf", rotated)])
        }

        Operation::CropPdf => {
            let file = take_primary(&mut files)?;
            let rect = params.crop.ok_or_else(|| Error::missing("crop coordinates"))?;
            let cropped = blocking(move || pdf::crop(&file.data, rect)).await?;
            Ok(vec![Artifact::new("cropped.pdf", cropped)])
        }

        Operation::AddWatermark => {
            let file = take_primary(&mut files)?;
            let text = required_text(&params.text, "watermark text")?.to_string();
            let stamped = blocking(move || pdf::add_watermark(&file.data, &text)).await?;
            Ok(vec![Artifact::new("wm.pdf", stamped)])
        }

        Operation::CompressPdf => {
            let file = take_primary(&mut files)?;
            let compressed = blocking(move || QpdfWrapper::compress(&file.data)).await?;
            Ok(vec![Artifact::new("compressed.pdf", compressed)])
        }

        Operation::EncryptPdf => {
            let file = take_primary(&mut files)?;
            let password = required_password(&params.password)?;
            let encrypted = blocking(move || QpdfWrapper::encrypt(&file.data, &password)).await?;
            Ok(vec![Artifact::new("encrypted.pdf", encrypted)])
        }

        Operation::DecryptPdf => {
            let file = take_primary(&mut files)?;
            let password = required_password(&params.password)?;
            let decrypted = blocking(move || QpdfWrapper::decrypt(&file.data, &password)).await?;
            Ok(vec![Artifact::new("decrypted.pdf", decrypted)])
        }

        Operation::DeletePages => {
            let file = take_primary(&mut files)?;
            let pages = required_text(&params.pages, "pages to delete")?.to_string();
            let result = blocking(move || QpdfWrapper::delete_pages(&file.data, &pages)).await?;
            Ok(vec![Artifact::new("deleted.pdf", result)])
        }

        Operation::InsertPages => {
            let base = take_primary_named(&mut files, "a base PDF")?;
            let insert = insert_file.ok_or_else(|| Error::missing("a PDF to insert"))?;
            let position = params.position.unwrap_or(0);
            let result = blocking(move || {
                QpdfWrapper::insert_pages(&base.data, &insert.data, position)
            })
            .await?;
            Ok(vec![Artifact::new("inserted.pdf", result)])
        }

        Operation::AddPageNumbers => {
            let file = take_primary(&mut files)?;
            let numbered = blocking(move || pdf::add_page_numbers(&file.data)).await?;
            Ok(vec![Artifact::new("pgnums.pdf", numbered)])
        }

        Operation::FlattenPdf => {
            let file = take_primary(&mut files)?;
            let flattened = blocking(move || pdf::flatten(&file.data)).await?;
            Ok(vec![Artifact::new("flattened.pdf", flattened)])
        }

        Operation::ExtractImages => {
            let file = take_primary(&mut files)?;
            let archive = blocking(move || {
                let images = pdf::extract_images(&file.data)?;
                if images.is_empty() {
                    return Err(Error::NothingToExtract {
                        what: "images".to_string(),
                    });
                }
                let entries: Vec<(String, Vec<u8>)> = images
                    .into_iter()
                    .map(|img| (format!("p{}_x{}.png", img.page, img.index), img.png))
                    .collect();
                convert::bundle(&entries)
            })
            .await?;
            Ok(vec![Artifact::new("images.zip", archive)])
        }

        Operation::OcrPdfToText => {
            let file = take_primary(&mut files)?;
            let pages = convert::ocr_pdf(file.data, tools).await?;
            Ok(vec![Artifact::new("ocr.txt", joined_pages(pages).into_bytes())])
        }

        Operation::ExtractMetadata => {
            let file = take_primary(&mut files)?;
            let entries = blocking(move || pdf::extract_metadata(&file.data)).await?;
            if entries.is_empty() {
                return Err(Error::NothingToExtract {
                    what: "metadata".to_string(),
                });
            }
            let text: String = entries
                .iter()
                .map(|e| format!("{}: {}\n", e.key, e.value))
                .collect();
            Ok(vec![Artifact::new("metadata.txt", text.into_bytes())])
        }

        Operation::ExtractText => {
            let file = take_primary(&mut files)?;
            let pages = blocking(move || pdf::extract_text(&file.data)).await?;
            let text = joined_pages(pages.into_iter().map(|(_, text)| text));
            Ok(vec![Artifact::new("text.txt", text.into_bytes())])
        }
    }
}

fn take_primary(files: &mut Vec<UploadedFile>) -> Result<UploadedFile> {
    take_primary_named(files, "a PDF file")
}

fn take_primary_named(files: &mut Vec<UploadedFile>, what: &str) -> Result<UploadedFile> {
    if files.is_empty() {
        return Err(Error::missing(what));
    }
    Ok(files.swap_remove(0))
}

fn required_password(value: &Option<String>) -> Result<String> {
    // Passwords are taken verbatim; only a fully empty field counts as absent.
    match value.as_deref() {
        Some(pwd) if !pwd.is_empty() => Ok(pwd.to_string()),
        _ => Err(Error::missing("a password")),
    }
}
