//! Operation catalogue and execution

mod artifact;
pub mod dispatch;
mod operation;
mod request;

pub use artifact::{content_type_for, Artifact};
pub use dispatch::execute;
pub use operation::{Category, Field, Operation};
pub use request::{OperationParams, OperationRequest, UploadedFile};
