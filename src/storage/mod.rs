//! Storage abstraction layer for bayesfilter.
//!
//! The trained model is persisted as a single binary artifact. This module
//! provides the file backend that artifact goes through, plus the
//! checksummed structured writer and reader that lay out its bytes.

pub mod file;
pub mod structured;
pub mod traits;

// Re-export commonly used types
pub use file::*;
pub use structured::*;
pub use traits::*;
