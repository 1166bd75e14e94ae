//! This library handles reading the **IXF** container format used by
//! *SimCity 3000*.
//!
//! # IXF Container Format Documentation
//!
//! IXF is an indexed database of resources. The game ships it under several
//! extensions (`.dat`, `.ixf`, `.bld`, `.sc3`, `.st3`, `.sct`, `.cfg`), all
//! sharing one on-disk layout. All multi-byte integers are little-endian.
//!
//! ## File Structure
//!
//! A container is a 4-byte signature followed by an inline run of index
//! records; each record names a payload somewhere else in the same file.
//!
//! | Offset (bytes) | Field      | Description                                   |
//! |----------------|------------|-----------------------------------------------|
//! | 0x0000         | Signature  | 4 bytes: `0x80C381D7`                          |
//! | 0x0004         | Records    | 20-byte index records up to the terminator     |
//! | anywhere       | Payloads   | byte ranges addressed by the records           |
//!
//! ### Index Records
//!
//! Each record is five unsigned 32-bit fields:
//!
//! | Offset (bytes) | Field    | Description                                     |
//! |----------------|----------|-------------------------------------------------|
//! | 0x0000         | Group    | Resource group id                               |
//! | 0x0004         | Instance | Resource instance id                            |
//! | 0x0008         | Type     | Resource type tag                               |
//! | 0x000C         | Offset   | Payload position from the start of the file     |
//! | 0x0010         | Length   | Payload length in bytes                         |
//!
//! Type, Group and Instance together form the TGI identity of an entry; the
//! format does not require it to be unique. Two record patterns are
//! reserved:
//!
//! - all five fields `0x00000000`: the directory terminator
//! - all five fields `0xFFFFFFFF`: a deleted slot, skipped during parsing
//!
//! Payload regions occur in any order and may lie before or after the
//! directory run. Containers shorter than 24 bytes (signature plus one
//! terminator record) appear in shipped assets and are treated as valid,
//! empty containers.
//!
//! ### Payload Handling
//!
//! Most payloads are stored verbatim. Two compressed shapes exist, both
//! holding a QFS stream (see the `sc3_qfs` crate) at payload offset 20:
//!
//! - any entry whose payload starts with `07 01 00 00 00 00 08 00` and is
//!   longer than 20 bytes; the remaining 12 header bytes are opaque
//! - a sprite-image entry whose payload is longer than 20 bytes and whose
//!   little-endian word at payload offset 4 has bit `0x10000000` or
//!   `0x00080000` set
//!
//! String resources wrap their text in a leading 32-bit length.
//!

pub mod error;
pub mod read;
pub mod reader;
pub mod resource;
pub mod types;

pub use read::IxfArchive;
pub use types::{IndexEntry, ResourceType};
