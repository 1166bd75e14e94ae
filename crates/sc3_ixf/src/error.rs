//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`sc3_qfs::Error`]
    #[error(transparent)]
    Codec(#[from] sc3_qfs::Error),

    /// The container does not start with the IXF signature
    #[error("bad container signature 0x{0:08X}")]
    BadSignature(u32),

    /// The source ran out of bytes mid-structure
    #[error("unexpected end of container")]
    UnexpectedEof,

    /// {0}
    #[error("{0}")]
    CustomError(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
