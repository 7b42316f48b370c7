//! Format conversion helpers: archives, office containers and external tools

pub mod archive;
pub mod external;
pub mod office;

pub use archive::bundle;
pub use external::{convert_ebook, ocr_pdf, office_to_pdf, ToolConfig, EBOOK_FORMATS};
pub use office::{docx_from_paragraphs, rows_from_text, xlsx_from_rows};
