//! Buffered random access over a container source
//!

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, BufReader, Read, Seek, SeekFrom};

use crate::error::{Error, Result};

/// How much of the source is buffered at once (less for tiny sources).
const BUFFER_CAPACITY: u64 = 4096;

/// Buffered little-endian reader over a seekable source.
///
/// The source is owned for the lifetime of the reader and released on drop.
/// Position queries report the virtual offset, accounting for buffered but
/// unconsumed bytes; a seek that lands inside the buffered window is a pure
/// pointer move and never touches the OS.
#[derive(Debug)]
pub struct ContainerReader<R: Read + Seek> {
    inner: BufReader<R>,
    len: u64,
}

impl<R: Read + Seek> ContainerReader<R> {
    pub fn new(mut source: R) -> Result<Self> {
        let len = source.seek(SeekFrom::End(0))?;
        source.rewind()?;
        let capacity = len.clamp(1, BUFFER_CAPACITY) as usize;
        Ok(ContainerReader {
            inner: BufReader::with_capacity(capacity, source),
            len,
        })
    }

    /// Total length of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current virtual offset.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Move to an absolute offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        map_eof(self.inner.read_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        map_eof(self.inner.read_u16::<LittleEndian>())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        map_eof(self.inner.read_u32::<LittleEndian>())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        map_eof(self.inner.read_u64::<LittleEndian>())
    }

    /// Fill `buf` completely or fail without a partial result.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        map_eof(Read::read_exact(&mut self.inner, buf))
    }

    /// Unwrap and return the inner source object
    ///
    /// The position of the source is undefined.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R: Read + Seek> Read for ContainerReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> Seek for ContainerReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            // Route absolute seeks through seek_relative so targets inside
            // the buffered window keep the buffer.
            SeekFrom::Start(offset) => {
                let current = self.inner.stream_position()?;
                self.inner.seek_relative(offset as i64 - current as i64)?;
                Ok(offset)
            }
            other => self.inner.seek(other),
        }
    }
}

fn map_eof<T>(result: io::Result<T>) -> Result<T> {
    result.map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::IOError(err)
        }
    })
}
