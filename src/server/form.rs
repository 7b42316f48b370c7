//! Multipart form decoding

use crate::error::{Error, Result};
use crate::ops::{Operation, OperationParams, OperationRequest, UploadedFile};
use crate::pdf::CropBox;
use axum::extract::multipart::{Multipart, MultipartError};

/// Read a submitted form into a request for `operation`.
///
/// File inputs left empty by the browser arrive as zero-length parts and are
/// dropped here, so they surface as missing inputs later.
pub async fn read_request(
    operation: Operation,
    mut multipart: Multipart,
) -> Result<OperationRequest> {
    let mut request = OperationRequest::new(operation);
    let mut scalars = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "insert_file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(upload_error)?;
                if data.is_empty() {
                    continue;
                }
                tracing::debug!(
                    field = %name,
                    file = %file_name,
                    bytes = data.len(),
                    "received upload"
                );
                let upload = UploadedFile::new(file_name, data.to_vec());
                if name == "files" {
                    request.files.push(upload);
                } else {
                    request.insert_file = Some(upload);
                }
            }
            _ => {
                let value = field.text().await.map_err(upload_error)?;
                scalars.push((name, value));
            }
        }
    }

    request.params = parse_params(&scalars)?;
    Ok(request)
}

fn upload_error(e: MultipartError) -> Error {
    Error::invalid("upload", e.body_text())
}

fn value<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, v)| v.as_str())
}

fn trimmed(fields: &[(String, String)], name: &str) -> Option<String> {
    value(fields, name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn number<T: std::str::FromStr>(
    fields: &[(String, String)],
    name: &str,
    reason: &str,
) -> Result<Option<T>> {
    trimmed(fields, name)
        .map(|raw| raw.parse::<T>().map_err(|_| Error::invalid(name, reason)))
        .transpose()
}

/// Decode the scalar fields of a form; blank fields are treated as absent.
pub fn parse_params(fields: &[(String, String)]) -> Result<OperationParams> {
    let crop = {
        let coords: Vec<Option<f32>> = ["x0", "y0", "x1", "y1"]
            .iter()
            .map(|name| number::<f32>(fields, name, "must be a number"))
            .collect::<Result<_>>()?;
        match coords.as_slice() {
            [Some(x0), Some(y0), Some(x1), Some(y1)] => Some(CropBox {
                x0: *x0,
                y0: *y0,
                x1: *x1,
                y1: *y1,
            }),
            [None, None, None, None] => None,
            _ => return Err(Error::missing("all four crop coordinates")),
        }
    };

    Ok(OperationParams {
        ranges: trimmed(fields, "ranges"),
        pages: trimmed(fields, "pages"),
        angle: number(fields, "angle", "must be 90, 180 or 270")?,
        crop,
        // Passwords are kept verbatim, whitespace included
        password: value(fields, "password")
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        text: trimmed(fields, "text"),
        position: number(fields, "position", "must be a whole number of 0 or more")?,
        target_format: trimmed(fields, "target_format"),
    })
}
