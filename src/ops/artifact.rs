//! Downloadable operation results

/// A produced file, offered to the user as a download
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl Artifact {
    /// Build an artifact, deriving the MIME type from the file extension
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);
        Self {
            file_name,
            content_type,
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// MIME type for a download name
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "txt" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "epub" => "application/epub+zip",
        "mobi" => "application/x-mobipocket-ebook",
        "azw3" => "application/vnd.amazon.ebook",
        "fb2" => "application/x-fictionbook+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(Artifact::new("merged.pdf", vec![]).content_type, "application/pdf");
        assert_eq!(content_type_for("pages.ZIP"), "application/zip");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
        assert!(content_type_for("out.docx").contains("wordprocessingml"));
    }
}
