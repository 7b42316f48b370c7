//! Form submission model

use crate::error::{Error, Result};
use crate::ops::Operation;
use crate::pdf::CropBox;

/// An uploaded file with the name the browser reported
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Lower-cased extension without the dot
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

/// Scalar form inputs; `None` means the field was absent or blank
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationParams {
    pub ranges: Option<String>,
    pub pages: Option<String>,
    pub angle: Option<u16>,
    pub crop: Option<CropBox>,
    pub password: Option<String>,
    pub text: Option<String>,
    pub position: Option<u32>,
    pub target_format: Option<String>,
}

/// Everything submitted with one run of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub files: Vec<UploadedFile>,
    pub insert_file: Option<UploadedFile>,
    pub params: OperationParams,
}

impl OperationRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            files: Vec::new(),
            insert_file: None,
            params: OperationParams::default(),
        }
    }

    pub fn with_file(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.files.push(UploadedFile::new(name, data));
        self
    }

    pub fn with_insert_file(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert_file = Some(UploadedFile::new(name, data));
        self
    }

    pub fn with_params(mut self, params: OperationParams) -> Self {
        self.params = params;
        self
    }
}

/// A required text parameter, blank counts as absent
pub(crate) fn required_text<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::missing(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercased() {
        assert_eq!(
            UploadedFile::new("Scan.JPG", vec![]).extension().as_deref(),
            Some("jpg")
        );
        assert_eq!(UploadedFile::new("README", vec![]).extension(), None);
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(required_text(&None, "a password").is_err());
        assert!(required_text(&Some("   ".to_string()), "a password").is_err());
        assert_eq!(
            required_text(&Some("s3cret".to_string()), "a password").unwrap(),
            "s3cret"
        );
    }

    #[test]
    fn test_builder_collects_files_in_order() {
        let req = OperationRequest::new(Operation::MergePdfs)
            .with_file("a.pdf", b"%PDF-a".to_vec())
            .with_file("b.pdf", b"%PDF-b".to_vec());
        let names: Vec<&str> = req.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
        assert!(req.insert_file.is_none());
    }
}
