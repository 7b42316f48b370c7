//! qpdf FFI wrapper for PDF page assembly and security
//!
//! This module provides splitting, merging, page deletion/insertion,
//! encryption/decryption, and compression using the qpdf crate (vendored FFI).

use crate::error::{Error, Result};
use crate::pdf::{ensure_pdf, pages};
use qpdf::{EncryptionParams, EncryptionParamsR6, ObjectStreamMode, PrintPermission, QPdf};

/// Wrapper for qpdf operations via FFI
pub struct QpdfWrapper;

/// Helper: open a QPdf from memory, optionally with password
fn open_qpdf(data: &[u8], password: Option<&str>) -> Result<QPdf> {
    ensure_pdf(data)?;
    match password {
        Some(pwd) => QPdf::read_from_memory_encrypted(data, pwd).map_err(map_qpdf_error),
        None => QPdf::read_from_memory(data).map_err(|e| match map_qpdf_error(e) {
            Error::IncorrectPassword => Error::PasswordRequired,
            other => other,
        }),
    }
}

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    match e.error_code() {
        qpdf::QPdfErrorCode::InvalidPassword => Error::IncorrectPassword,
        _ => Error::QpdfError {
            reason: e.to_string(),
        },
    }
}

/// Copy the given 0-indexed pages of `source` into a fresh document and serialize it.
fn write_pages(source: &QPdf, indices: &[u32]) -> Result<Vec<u8>> {
    let num_pages = source.get_num_pages().map_err(map_qpdf_error)?;
    let dest = QPdf::empty();

    for &idx in indices {
        let page = source.get_page(idx).ok_or(Error::PageOutOfBounds {
            page: idx + 1,
            total: num_pages,
        })?;
        let copied = dest.copy_from_foreign(&page);
        dest.add_page(&copied, false).map_err(map_qpdf_error)?;
    }

    let mut writer = dest.writer();
    writer.preserve_encryption(false);
    writer.write_to_memory().map_err(map_qpdf_error)
}

impl QpdfWrapper {
    /// Split a PDF into one document per comma-separated range.
    ///
    /// # Arguments
    /// * `input_data` - Raw PDF bytes
    /// * `ranges` - e.g. "1-3,4-5": two output documents
    ///
    /// # Returns
    /// One PDF per range, in the order the ranges were given
    pub fn split(input_data: &[u8], ranges: &str) -> Result<Vec<Vec<u8>>> {
        let source = open_qpdf(input_data, None)?;
        let num_pages = source.get_num_pages().map_err(map_qpdf_error)?;

        let parts = pages::parse_ranges(ranges, num_pages)?;

        parts
            .iter()
            .map(|part| {
                let indices: Vec<u32> = part.iter().map(|p| p - 1).collect();
                write_pages(&source, &indices)
            })
            .collect()
    }

    /// Merge multiple PDFs into one
    ///
    /// # Arguments
    /// * `inputs` - Vector of raw PDF bytes to merge
    ///
    /// # Returns
    /// The merged PDF as bytes, pages in input order
    pub fn merge(inputs: &[&[u8]]) -> Result<Vec<u8>> {
        if inputs.is_empty() {
            return Err(Error::missing("at least one PDF to merge"));
        }

        let dest = QPdf::empty();

        for (i, input_data) in inputs.iter().enumerate() {
            let source = open_qpdf(input_data, None).map_err(|e| match e {
                Error::QpdfError { reason } => Error::QpdfError {
                    reason: format!("Failed to read input PDF {}: {}", i + 1, reason),
                },
                other => other,
            })?;

            let pages = source.get_pages().map_err(|e| Error::QpdfError {
                reason: format!("Failed to get pages from input PDF {}: {}", i + 1, e),
            })?;

            for page in &pages {
                let copied = dest.copy_from_foreign(page);
                dest.add_page(&copied, false).map_err(map_qpdf_error)?;
            }
        }

        dest.writer().write_to_memory().map_err(map_qpdf_error)
    }

    /// Encrypt a PDF with password protection (AES-256).
    ///
    /// The same password is used as user and owner password; all
    /// permissions are granted once the document is opened.
    pub fn encrypt(input_data: &[u8], password: &str) -> Result<Vec<u8>> {
        if password.is_empty() {
            return Err(Error::missing("a password"));
        }

        let qpdf = open_qpdf(input_data, None)?;

        let encryption = EncryptionParams::R6(EncryptionParamsR6 {
            user_password: password.to_string(),
            owner_password: password.to_string(),
            allow_accessibility: true,
            allow_extract: true,
            allow_assemble: true,
            allow_annotate_and_form: true,
            allow_form_filling: true,
            allow_modify_other: true,
            allow_print: PrintPermission::Full,
            encrypt_metadata: true,
        });

        let mut writer = qpdf.writer();
        writer
            .preserve_encryption(false)
            .encryption_params(encryption);
        writer.write_to_memory().map_err(map_qpdf_error)
    }

    /// Decrypt a PDF (remove password protection).
    ///
    /// Documents that open without a password are passed through unencrypted.
    pub fn decrypt(input_data: &[u8], password: &str) -> Result<Vec<u8>> {
        let qpdf = match open_qpdf(input_data, None) {
            Ok(qpdf) => qpdf,
            Err(Error::PasswordRequired) => open_qpdf(input_data, Some(password))?,
            Err(e) => return Err(e),
        };

        let mut writer = qpdf.writer();
        writer.preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }

    /// Rewrite a PDF without its encryption layer, using only the empty user password.
    ///
    /// Owner-restricted files open this way; a document with a real user
    /// password yields `PasswordRequired`.
    pub fn remove_encryption(input_data: &[u8]) -> Result<Vec<u8>> {
        let qpdf = open_qpdf(input_data, None)?;

        let mut writer = qpdf.writer();
        writer.preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }

    /// Compress a PDF by compressing streams, generating object streams
    /// and dropping unreferenced objects. Lossless.
    pub fn compress(input_data: &[u8]) -> Result<Vec<u8>> {
        let qpdf = open_qpdf(input_data, None)?;

        let mut writer = qpdf.writer();
        writer
            .object_stream_mode(ObjectStreamMode::Generate)
            .compress_streams(true)
            .normalize_content(true)
            .preserve_unreferenced_objects(false)
            .preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }

    /// Remove the selected pages (e.g. "2" or "1,3-4").
    ///
    /// Remaining pages keep their relative order.
    pub fn delete_pages(input_data: &[u8], selection: &str) -> Result<Vec<u8>> {
        let source = open_qpdf(input_data, None)?;
        let num_pages = source.get_num_pages().map_err(map_qpdf_error)?;

        let doomed = pages::parse_page_set(selection, num_pages)?;
        if doomed.len() as u32 == num_pages {
            return Err(Error::invalid("pages", "cannot delete every page"));
        }

        let keep: Vec<u32> = (1..=num_pages)
            .filter(|p| doomed.binary_search(p).is_err())
            .map(|p| p - 1)
            .collect();

        write_pages(&source, &keep)
    }

    /// Insert every page of `insert_data` before the 0-based `position` of `base_data`.
    ///
    /// `position == page count` appends at the end.
    pub fn insert_pages(base_data: &[u8], insert_data: &[u8], position: u32) -> Result<Vec<u8>> {
        let base = open_qpdf(base_data, None)?;
        let extra = open_qpdf(insert_data, None)?;

        let base_pages = base.get_pages().map_err(map_qpdf_error)?;
        let extra_pages = extra.get_pages().map_err(map_qpdf_error)?;

        let total = base_pages.len() as u32;
        if position > total {
            return Err(Error::PageOutOfBounds {
                page: position,
                total,
            });
        }

        let (head, tail) = base_pages.split_at(position as usize);
        let dest = QPdf::empty();

        for page in head.iter().chain(extra_pages.iter()).chain(tail.iter()) {
            let copied = dest.copy_from_foreign(page);
            dest.add_page(&copied, false).map_err(map_qpdf_error)?;
        }

        let mut writer = dest.writer();
        writer.preserve_encryption(false);
        writer.write_to_memory().map_err(map_qpdf_error)
    }

    /// Get the page count of a PDF
    ///
    /// # Arguments
    /// * `input_data` - Raw PDF bytes
    /// * `password` - Optional password for encrypted PDFs
    pub fn get_page_count(input_data: &[u8], password: Option<&str>) -> Result<u32> {
        let qpdf = open_qpdf(input_data, password)?;
        qpdf.get_num_pages().map_err(map_qpdf_error)
    }
}
