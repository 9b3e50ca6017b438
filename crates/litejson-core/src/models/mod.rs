//! Data models for the conversion pipeline
//!
//! Everything here lives for a single request: the upload, the extracted values and
//! the envelope returned to the caller.

mod conversion;
mod envelope;
mod upload;
mod value;

pub use conversion::*;
pub use envelope::*;
pub use upload::*;
pub use value::*;
