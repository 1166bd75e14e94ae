//! This library handles decompressing and compressing the **QFS** (RefPack)
//! streams used by *SimCity 3000*.
//!
//! # QFS Stream Format Documentation
//!
//! QFS is a Lempel-Ziv-77-family compression scheme. A stream is a short
//! header followed by a sequence of variable-length opcodes, each encoding a
//! run of literal bytes, a back-reference into the already-produced output,
//! or both. The same scheme is known as RefPack in other EA titles.
//!
//! ## Header
//!
//! Two header placements occur in the wild:
//!
//! | Placement | Layout                                                           |
//! |-----------|------------------------------------------------------------------|
//! | offset 0  | flag byte, `0xFB`, size fields                                   |
//! | offset 4  | 4-byte LE compressed-stream length, then flag byte, `0xFB`, size fields |
//!
//! The flag byte doubles as the first signature byte: a valid header has
//! `(flags & 0x3E) == 0x10` and `0xFB` in the following byte. Flag bits:
//!
//! | Bit    | Meaning                                                            |
//! |--------|--------------------------------------------------------------------|
//! | `0x01` | a compressed-size field precedes the uncompressed-size field       |
//! | `0x40` | reserved; observed in game files but carries no known meaning      |
//! | `0x80` | size fields are 4-byte big-endian (otherwise 3-byte big-endian)    |
//!
//! The uncompressed size always follows the signature (and the optional
//! compressed-size field); the first opcode starts immediately after it.
//!
//! ## Opcodes
//!
//! Keyed on the first byte `b0`. `plain` literals are copied from the input,
//! then `copy` bytes are copied from `distance` bytes back in the output.
//! Overlapping copies are legal and advance one byte at a time (they encode
//! runs).
//!
//! | `b0`          | Size | plain             | copy                        | distance                                  |
//! |---------------|------|-------------------|-----------------------------|--------------------------------------------|
//! | `0x00`-`0x7F` | 2    | `b0 & 3`          | `((b0 & 0x1C) >> 2) + 3`    | `((b0 & 0x60) << 3) + b1 + 1`              |
//! | `0x80`-`0xBF` | 3    | `(b1 & 0xC0) >> 6`| `(b0 & 0x3F) + 4`           | `((b1 & 0x3F) << 8) + b2 + 1`              |
//! | `0xC0`-`0xDF` | 4    | `b0 & 3`          | `((b0 & 0x0C) << 6) + b3 + 5`| `((b0 & 0x10) << 12) + (b1 << 8) + b2 + 1`|
//! | `0xE0`-`0xFB` | 1    | `((b0 & 0x1F) << 2) + 4` | 0                    | -                                          |
//! | `0xFC`-`0xFF` | 1    | `b0 & 3`          | 0 (closes the stream)       | -                                          |
//!
//! ## Additional Information
//!
//! - **Endianness**: size fields are big-endian; the optional stream-length
//!   prefix is little-endian
//! - **Maximum uncompressed size**: 16,777,215 bytes (3-byte size field)
//! - **Window**: back-references reach at most 131,072 bytes
//!

pub mod error;
pub mod read;
pub mod write;

pub use error::Error;
pub use read::{decompress, decompress_into};
pub use write::{compress, CompressOptions};
