//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum Error {
    /// No QFS signature at offset 0 or offset 4
    #[error("no QFS signature at offset 0 or 4")]
    UnsupportedFormat,

    /// The opcode stream asked for bytes that do not exist
    #[error("corrupt QFS stream: {0}")]
    CorruptStream(&'static str),

    /// The output span is shorter than the declared uncompressed size
    #[error("output buffer holds {have} bytes but the stream declares {need}")]
    BufferTooSmall { need: usize, have: usize },

    /// The encoder input exceeds the 3-byte size field
    #[error("input of {0} bytes exceeds the 16777215 byte QFS limit")]
    InputTooLarge(usize),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
