//! Types for reading IXF containers
//!

use binrw::BinRead;
use std::io::{self, Read, Seek};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    reader::ContainerReader,
    resource,
    types::IndexEntry,
};

/// The little-endian magic at offset 0 of every container.
pub const CONTAINER_SIGNATURE: u32 = 0x80C3_81D7;

/// Anything shorter cannot hold the signature plus a terminator record.
/// Such stubs exist in shipped assets and count as valid, empty containers.
const MIN_CONTAINER_LEN: u64 = 24;

/// IXF container reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_contents(source: impl Read + Seek) -> sc3_ixf::error::Result<()> {
///     let ixf = sc3_ixf::IxfArchive::new(source)?;
///
///     for entry in ixf.entries() {
///         println!("{} ({} bytes)", entry.res_type, entry.length);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct IxfArchive<R: Read + Seek> {
    reader: ContainerReader<R>,
    entries: Vec<IndexEntry>,
}

impl<R: Read + Seek> IxfArchive<R> {
    /// Read a container directory, collecting the live entries in on-disk
    /// order.
    #[instrument(skip(source), err)]
    pub fn new(source: R) -> Result<Self> {
        let mut reader = ContainerReader::new(source)?;
        let entries = read_directory(&mut reader)?;
        Ok(IxfArchive { reader, entries })
    }

    /// Number of live entries in this container.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this container holds no live entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live entries, in on-disk order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Get a directory entry by position.
    pub fn by_index(&self, index: usize) -> Option<IndexEntry> {
        self.entries.get(index).copied()
    }

    /// Read an entry's payload exactly as stored.
    pub fn read_raw(&mut self, entry: &IndexEntry) -> Result<Vec<u8>> {
        self.reader.seek_to(entry.offset as u64)?;
        let mut payload = vec![0u8; entry.length as usize];
        self.reader.read_exact(&mut payload)?;
        Ok(payload)
    }

    /// Read an entry's payload in its final form: QFS streams are decoded,
    /// string resources lose their length wrapper, everything else passes
    /// through verbatim.
    pub fn read_resource(&mut self, entry: &IndexEntry) -> Result<Vec<u8>> {
        let payload = self.read_raw(entry)?;
        resource::unpack(entry.res_type, payload)
    }

    /// Unwrap and return the inner source object
    ///
    /// The position of the source is undefined.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

fn read_directory<R: Read + Seek>(reader: &mut ContainerReader<R>) -> Result<Vec<IndexEntry>> {
    if reader.len() < MIN_CONTAINER_LEN {
        return Ok(Vec::new());
    }

    let signature = reader.read_u32()?;
    if signature != CONTAINER_SIGNATURE {
        return Err(Error::BadSignature(signature));
    }

    // Only the terminator ends the walk; a directory that lost it runs the
    // reader dry and fails with UnexpectedEof.
    let mut entries = Vec::new();
    loop {
        let entry = read_record(reader)?;
        if entry.is_terminator() {
            break;
        }
        if entry.is_deleted() {
            continue;
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn read_record<R: Read + Seek>(reader: &mut ContainerReader<R>) -> Result<IndexEntry> {
    IndexEntry::read(reader).map_err(|err| match err {
        binrw::Error::Io(io) if io.kind() == io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
        other => Error::BinRWError(other),
    })
}
