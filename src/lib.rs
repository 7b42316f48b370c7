//! PDF Workbench Library
//!
//! A browser form for everyday PDF jobs:
//! - Convert: images, office documents and ebooks to and from PDF
//! - Edit: merge, split, rotate, crop, watermark, compress
//! - Security: encrypt and decrypt
//! - Pages: delete, insert, number, flatten
//! - Extract: images, text, OCR text and metadata

pub mod convert;
pub mod error;
pub mod ops;
pub mod pdf;
pub mod server;
pub mod store;

pub use error::{Error, Result};
pub use ops::{execute, Artifact, Operation, OperationParams, OperationRequest, UploadedFile};
pub use server::{router, run_server, AppState, ServerConfig};
pub use store::ArtifactStore;
