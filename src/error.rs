//! Error types for the PDF workbench

use thiserror::Error;

/// Result type alias for the PDF workbench
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the PDF workbench
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// PDF is password protected and no password was provided
    #[error("PDF is password protected")]
    PasswordRequired,

    /// Incorrect password provided
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Invalid page range
    #[error("Invalid page range: {range}")]
    InvalidPageRange { range: String },

    /// Page out of bounds
    #[error("Page {page} out of bounds (total: {total})")]
    PageOutOfBounds { page: u32, total: u32 },

    /// A required form input was not supplied
    #[error("Missing input: {what}")]
    MissingInput { what: String },

    /// A scalar parameter was supplied but is not acceptable
    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Uploaded file type is not handled by the selected operation
    #[error("Unsupported file: {name}")]
    UnsupportedFile { name: String },

    /// The document contains nothing of the requested kind
    #[error("Nothing to extract: {what}")]
    NothingToExtract { what: String },

    /// External conversion binary is not installed
    #[error("External tool not installed: {tool}")]
    ToolNotInstalled { tool: String },

    /// External conversion binary did not finish in time
    #[error("External tool {tool} timed out after {seconds}s")]
    ToolTimeout { tool: String, seconds: u64 },

    /// External conversion binary exited unsuccessfully
    #[error("External tool {tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// qpdf error
    #[error("qpdf error: {reason}")]
    QpdfError { reason: String },

    /// lopdf error
    #[error("lopdf error: {0}")]
    Lopdf(#[from] lopdf::Error),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// ZIP packaging error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl Error {
    /// Return a sanitized error message safe to show in the form.
    /// Internal details (paths, library errors) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::InvalidPdf { .. } => "The uploaded file is not a valid PDF".to_string(),
            Error::PasswordRequired => "PDF is password protected".to_string(),
            Error::IncorrectPassword => "Incorrect password".to_string(),
            Error::InvalidPageRange { range } => format!("Invalid page range: {}", range),
            Error::PageOutOfBounds { page, total } => {
                format!("Page {} out of bounds (total: {})", page, total)
            }
            Error::MissingInput { what } => format!("Please provide {}", what),
            Error::InvalidParameter { name, reason } => format!("Invalid {}: {}", name, reason),
            Error::UnsupportedFile { name } => format!("Unsupported file: {}", name),
            Error::NothingToExtract { what } => format!("No {} found in the document", what),
            Error::ToolNotInstalled { tool } => format!(
                "This conversion needs `{}`, which is not installed on the server",
                tool
            ),
            Error::ToolTimeout { tool, seconds } => {
                format!("`{}` did not finish within {} seconds", tool, seconds)
            }
            Error::ToolFailed { tool, .. } => format!("`{}` could not convert the file", tool),
            Error::Io(_) => "I/O error".to_string(),
            Error::Pdfium { .. } => "PDF rendering error".to_string(),
            Error::QpdfError { .. } => "PDF processing error".to_string(),
            Error::Lopdf(_) => "PDF processing error".to_string(),
            Error::Image(_) => "Could not read image".to_string(),
            Error::Archive(_) => "Could not build archive".to_string(),
        }
    }

    /// Whether the failure was caused by the request rather than the server
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPdf { .. }
                | Error::PasswordRequired
                | Error::IncorrectPassword
                | Error::InvalidPageRange { .. }
                | Error::PageOutOfBounds { .. }
                | Error::MissingInput { .. }
                | Error::InvalidParameter { .. }
                | Error::UnsupportedFile { .. }
                | Error::NothingToExtract { .. }
        )
    }

    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Error::MissingInput { what: what.into() }
    }

    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_hides_internals() {
        let err = Error::QpdfError {
            reason: "/tmp/secret/path: xref stream broken".to_string(),
        };
        assert_eq!(err.client_message(), "PDF processing error");

        let err = Error::ToolFailed {
            tool: "tesseract".to_string(),
            stderr: "Error opening data file /usr/share/tessdata".to_string(),
        };
        assert!(!err.client_message().contains("tessdata"));
    }

    #[test]
    fn test_user_errors() {
        assert!(Error::missing("a PDF file").is_user_error());
        assert!(Error::invalid("angle", "must be 90, 180 or 270").is_user_error());
        assert!(!Error::ToolNotInstalled {
            tool: "soffice".to_string()
        }
        .is_user_error());
    }

    #[test]
    fn test_missing_input_message() {
        assert_eq!(
            Error::missing("a password").client_message(),
            "Please provide a password"
        );
    }
}
