mod error;
mod kind;
mod request;

pub use error::ClassificationError;
pub use kind::{ClassificationKind, Label};
pub use request::{ClassificationRequest, MAX_TEXT_CHARS};
