//! The fixed menu of operations

use std::fmt;
use std::str::FromStr;

/// Sidebar groups, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Convert,
    Edit,
    Security,
    Pages,
    Images,
    Extract,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Convert,
        Category::Edit,
        Category::Security,
        Category::Pages,
        Category::Images,
        Category::Extract,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Convert => "Convert",
            Category::Edit => "Edit",
            Category::Security => "Security",
            Category::Pages => "Pages",
            Category::Images => "Images",
            Category::Extract => "Extract",
        }
    }

    /// Operations belonging to this group, in menu order
    pub fn operations(self) -> impl Iterator<Item = Operation> {
        Operation::ALL
            .into_iter()
            .filter(move |op| op.category() == self)
    }
}

/// One user-selectable file transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ImagesToPdf,
    PdfToImages,
    PdfToDocx,
    PdfToSpreadsheet,
    OfficeToPdf,
    ConvertEbook,
    MergePdfs,
    SplitPdf,
    RotatePdf,
    CropPdf,
    AddWatermark,
    CompressPdf,
    EncryptPdf,
    DecryptPdf,
    DeletePages,
    InsertPages,
    AddPageNumbers,
    FlattenPdf,
    ExtractImages,
    OcrPdfToText,
    ExtractMetadata,
    ExtractText,
}

/// A form widget an operation needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Primary upload widget (field `files`)
    Upload {
        label: &'static str,
        accept: &'static str,
        multiple: bool,
    },
    /// Second PDF spliced into the first (field `insert_file`)
    InsertUpload,
    /// Comma-separated split ranges (field `ranges`)
    Ranges,
    /// Page list to delete (field `pages`)
    Pages,
    /// Rotation angle select (field `angle`)
    Angle,
    /// Crop rectangle (fields `x0`, `y0`, `x1`, `y1`)
    Crop,
    /// Password (field `password`)
    Password,
    /// Watermark text (field `text`)
    Text,
    /// 0-based insertion position (field `position`)
    Position,
    /// Ebook output format select (field `target_format`)
    TargetFormat,
}

const PDF: &str = ".pdf";
const IMAGES: &str = ".png,.jpg,.jpeg";
const OFFICE: &str = ".doc,.docx,.xls,.xlsx,.ppt,.pptx,.odt,.ods,.odp,.rtf";
const EBOOKS: &str = ".epub,.mobi,.azw3,.fb2,.pdf";

const ONE_PDF: Field = Field::Upload {
    label: "Upload PDF",
    accept: PDF,
    multiple: false,
};

impl Operation {
    pub const ALL: [Operation; 22] = [
        Operation::ImagesToPdf,
        Operation::PdfToImages,
        Operation::PdfToDocx,
        Operation::PdfToSpreadsheet,
        Operation::OfficeToPdf,
        Operation::ConvertEbook,
        Operation::MergePdfs,
        Operation::SplitPdf,
        Operation::RotatePdf,
        Operation::CropPdf,
        Operation::AddWatermark,
        Operation::CompressPdf,
        Operation::EncryptPdf,
        Operation::DecryptPdf,
        Operation::DeletePages,
        Operation::InsertPages,
        Operation::AddPageNumbers,
        Operation::FlattenPdf,
        Operation::ExtractImages,
        Operation::OcrPdfToText,
        Operation::ExtractMetadata,
        Operation::ExtractText,
    ];

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Operation::ImagesToPdf => "Images to PDF",
            Operation::PdfToImages => "PDF to Images",
            Operation::PdfToDocx => "PDF to DOCX",
            Operation::PdfToSpreadsheet => "PDF to Spreadsheet",
            Operation::OfficeToPdf => "Office to PDF",
            Operation::ConvertEbook => "Convert Ebook",
            Operation::MergePdfs => "Merge PDFs",
            Operation::SplitPdf => "Split PDF",
            Operation::RotatePdf => "Rotate PDF",
            Operation::CropPdf => "Crop PDF",
            Operation::AddWatermark => "Add Watermark",
            Operation::CompressPdf => "Compress PDF",
            Operation::EncryptPdf => "Encrypt PDF",
            Operation::DecryptPdf => "Decrypt PDF",
            Operation::DeletePages => "Delete Pages",
            Operation::InsertPages => "Insert Pages",
            Operation::AddPageNumbers => "Add Page Numbers",
            Operation::FlattenPdf => "Flatten PDF",
            Operation::ExtractImages => "Extract Images",
            Operation::OcrPdfToText => "OCR PDF to Text",
            Operation::ExtractMetadata => "Extract Metadata",
            Operation::ExtractText => "Extract Text",
        }
    }

    /// URL-safe identifier
    pub fn slug(self) -> &'static str {
        match self {
            Operation::ImagesToPdf => "images-to-pdf",
            Operation::PdfToImages => "pdf-to-images",
            Operation::PdfToDocx => "pdf-to-docx",
            Operation::PdfToSpreadsheet => "pdf-to-spreadsheet",
            Operation::OfficeToPdf => "office-to-pdf",
            Operation::ConvertEbook => "convert-ebook",
            Operation::MergePdfs => "merge",
            Operation::SplitPdf => "split",
            Operation::RotatePdf => "rotate",
            Operation::CropPdf => "crop",
            Operation::AddWatermark => "watermark",
            Operation::CompressPdf => "compress",
            Operation::EncryptPdf => "encrypt",
            Operation::DecryptPdf => "decrypt",
            Operation::DeletePages => "delete-pages",
            Operation::InsertPages => "insert-pages",
            Operation::AddPageNumbers => "page-numbers",
            Operation::FlattenPdf => "flatten",
            Operation::ExtractImages => "extract-images",
            Operation::OcrPdfToText => "ocr",
            Operation::ExtractMetadata => "metadata",
            Operation::ExtractText => "extract-text",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Operation::ImagesToPdf
            | Operation::PdfToImages
            | Operation::PdfToDocx
            | Operation::PdfToSpreadsheet
            | Operation::OfficeToPdf
            | Operation::ConvertEbook => Category::Convert,
            Operation::MergePdfs
            | Operation::SplitPdf
            | Operation::RotatePdf
            | Operation::CropPdf
            | Operation::AddWatermark
            | Operation::CompressPdf => Category::Edit,
            Operation::EncryptPdf | Operation::DecryptPdf => Category::Security,
            Operation::DeletePages
            | Operation::InsertPages
            | Operation::AddPageNumbers
            | Operation::FlattenPdf => Category::Pages,
            Operation::ExtractImages => Category::Images,
            Operation::OcrPdfToText | Operation::ExtractMetadata | Operation::ExtractText => {
                Category::Extract
            }
        }
    }

    /// Form widgets, in display order
    pub fn fields(self) -> &'static [Field] {
        match self {
            Operation::ImagesToPdf => &[Field::Upload {
                label: "Upload images",
                accept: IMAGES,
                multiple: true,
            }],
            Operation::MergePdfs => &[Field::Upload {
                label: "Upload PDFs",
                accept: PDF,
                multiple: true,
            }],
            Operation::OfficeToPdf => &[Field::Upload {
                label: "Upload office document",
                accept: OFFICE,
                multiple: false,
            }],
            Operation::ConvertEbook => &[
                Field::Upload {
                    label: "Upload ebook",
                    accept: EBOOKS,
                    multiple: false,
                },
                Field::TargetFormat,
            ],
            Operation::SplitPdf => &[ONE_PDF, Field::Ranges],
            Operation::RotatePdf => &[ONE_PDF, Field::Angle],
            Operation::CropPdf => &[ONE_PDF, Field::Crop],
            Operation::AddWatermark => &[ONE_PDF, Field::Text],
            Operation::EncryptPdf | Operation::DecryptPdf => &[ONE_PDF, Field::Password],
            Operation::DeletePages => &[ONE_PDF, Field::Pages],
            Operation::InsertPages => &[
                Field::Upload {
                    label: "Upload base PDF",
                    accept: PDF,
                    multiple: false,
                },
                Field::InsertUpload,
                Field::Position,
            ],
            Operation::PdfToImages
            | Operation::PdfToDocx
            | Operation::PdfToSpreadsheet
            | Operation::CompressPdf
            | Operation::AddPageNumbers
            | Operation::FlattenPdf
            | Operation::ExtractImages
            | Operation::OcrPdfToText
            | Operation::ExtractMetadata
            | Operation::ExtractText => &[ONE_PDF],
        }
    }

    /// Submit button caption
    pub fn action_label(self) -> &'static str {
        match self {
            Operation::ImagesToPdf => "Convert Images to PDF",
            Operation::PdfToImages => "Convert PDF to Images",
            Operation::PdfToDocx => "Convert to DOCX",
            Operation::PdfToSpreadsheet => "Convert to XLSX",
            Operation::OfficeToPdf => "Convert to PDF",
            Operation::ConvertEbook => "Convert Ebook",
            other => other.label(),
        }
    }

    /// Message shown above the download links
    pub fn success_message(self) -> &'static str {
        match self.category() {
            Category::Convert => "Converted!",
            Category::Security if self == Operation::EncryptPdf => "Encrypted!",
            Category::Security => "Decrypted!",
            _ => match self {
                Operation::MergePdfs => "Merged!",
                Operation::SplitPdf => "Split!",
                Operation::RotatePdf => "Rotated!",
                Operation::CropPdf => "Cropped!",
                Operation::AddWatermark => "Watermarked!",
                Operation::CompressPdf => "Compressed!",
                Operation::DeletePages => "Pages deleted!",
                Operation::InsertPages => "Pages inserted!",
                Operation::AddPageNumbers => "Page numbers added!",
                Operation::FlattenPdf => "PDF flattened!",
                Operation::ExtractImages => "Images extracted!",
                Operation::ExtractMetadata => "Metadata!",
                _ => "Done!",
            },
        }
    }

    /// Look up by slug or by exact menu label
    pub fn from_slug(slug: &str) -> Option<Operation> {
        Operation::ALL
            .into_iter()
            .find(|op| op.slug() == slug || op.label() == slug)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::from_slug(s.trim()).ok_or_else(|| {
            crate::error::Error::invalid("operation", format!("unknown operation '{}'", s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_and_slugs_unique() {
        let labels: HashSet<_> = Operation::ALL.iter().map(|op| op.label()).collect();
        let slugs: HashSet<_> = Operation::ALL.iter().map(|op| op.slug()).collect();
        assert_eq!(labels.len(), Operation::ALL.len());
        assert_eq!(slugs.len(), Operation::ALL.len());
    }

    #[test]
    fn test_parse_by_label_and_slug() {
        assert_eq!("Split PDF".parse::<Operation>().unwrap(), Operation::SplitPdf);
        assert_eq!("split".parse::<Operation>().unwrap(), Operation::SplitPdf);
        assert_eq!(Operation::from_slug("ocr"), Some(Operation::OcrPdfToText));
        assert!("Shred PDF".parse::<Operation>().is_err());
    }

    #[test]
    fn test_every_operation_in_exactly_one_category() {
        let grouped: usize = Category::ALL.iter().map(|c| c.operations().count()).sum();
        assert_eq!(grouped, Operation::ALL.len());
    }

    #[test]
    fn test_every_operation_has_an_upload() {
        for op in Operation::ALL {
            assert!(
                matches!(op.fields().first(), Some(Field::Upload { .. })),
                "{} should start with an upload widget",
                op
            );
        }
    }

    #[test]
    fn test_insert_pages_fields() {
        assert_eq!(
            Operation::InsertPages.fields()[1..],
            [Field::InsertUpload, Field::Position]
        );
    }
}
