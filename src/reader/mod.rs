use crate::codec;
use crate::error::RsfError;
use crate::types::*;
use smol_str::SmolStr;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

mod index;

pub use index::{Index, IndexEntry, TOP};


// ─── Reader ─────────────────────────────────────────────────────────────────

/// Navigational stream reader.
///
/// A reader owns a byte cursor (`pos`) and, after
/// [`read_index`](RsfReader::read_index), a cached copy of the stream's
/// schema index plus the logical path it is currently at. Scalar reads
/// advance the cursor by their exact on-wire size;
/// [`advance_to`](RsfReader::advance_to) repositions it by skipping whole
/// fields using only the index and size prefixes.
pub struct RsfReader {
    pos: usize,
    index: Index,
    index_version: u32,
    at: Vec<SmolStr>,
}

impl Default for RsfReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RsfReader {
    pub fn new() -> Self {
        RsfReader {
            pos: 0,
            index: Vec::new(),
            index_version: 0,
            at: Vec::new(),
        }
    }

    /// Current byte offset into the stream.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Stream version detected by [`read_index`](RsfReader::read_index);
    /// zero before an index has been read.
    #[inline]
    pub fn index_version(&self) -> u32 {
        self.index_version
    }

    #[inline]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Replace the cached index. Lets a consumer share one preparsed index
    /// across several readers over the same seekable source.
    pub fn set_index(&mut self, index: Index) {
        self.index = index;
    }

    // ─── Scalar reads ───────────────────────────────────────────────────────

    pub fn read_size<R: Read>(&mut self, r: &mut R) -> Result<usize, RsfError> {
        let mut buf = [0u8; SIZE_FIELD_LEN];
        self.fill(r, &mut buf)?;
        Ok(u32::from_le_bytes(buf) as usize)
    }

    pub fn read_fixed_string<R: Read>(&mut self, sz: usize, r: &mut R) -> Result<String, RsfError> {
        let mut buf = vec![0u8; sz];
        self.fill(r, &mut buf)?;
        String::from_utf8(buf).map_err(|e| RsfError::InvalidValue(format!("invalid utf-8: {}", e)))
    }

    pub fn read_string<R: Read>(&mut self, r: &mut R) -> Result<String, RsfError> {
        let sz = self.read_size(r)?;
        self.read_fixed_string(sz, r)
    }

    /// Any nonzero byte reads as true.
    pub fn read_bool<R: Read>(&mut self, r: &mut R) -> Result<bool, RsfError> {
        let mut buf = [0u8; 1];
        self.fill(r, &mut buf)?;
        Ok(buf[0] != 0)
    }

    pub fn read_int<R: Read>(&mut self, r: &mut R) -> Result<i64, RsfError> {
        let mut buf = [0u8; SIZE_INT64];
        self.fill(r, &mut buf)?;
        Ok(codec::decode_int64(&buf))
    }

    pub fn read_float<R: Read>(&mut self, r: &mut R) -> Result<f64, RsfError> {
        let mut buf = [0u8; SIZE_FLOAT];
        self.fill(r, &mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    // ─── Cursor movement ────────────────────────────────────────────────────

    /// Skip `sz` raw bytes.
    pub fn discard<R: Read>(&mut self, sz: usize, r: &mut R) -> Result<(), RsfError> {
        let n = std::io::copy(&mut r.by_ref().take(sz as u64), &mut std::io::sink())?;
        if n as usize != sz {
            return Err(RsfError::Io(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("unexpected discard size {}; expected {}", n, sz),
            )));
        }
        self.pos += sz;
        Ok(())
    }

    /// Reposition within a seekable source; the cursor is set to `offset`.
    pub fn seek<S: Seek>(&mut self, offset: usize, s: &mut S) -> Result<(), RsfError> {
        s.seek(SeekFrom::Start(offset as u64))?;
        self.pos = offset;
        Ok(())
    }

    fn fill<R: Read>(&mut self, r: &mut R, buf: &mut [u8]) -> Result<(), RsfError> {
        fill(r, buf)?;
        self.pos += buf.len();
        Ok(())
    }
}

/// Read exactly `buf.len()` bytes. A stream that ends before the first byte
/// is `EndOfStream` (a frame boundary); one that ends mid-buffer is an `Io`
/// error (truncation).
pub(crate) fn fill<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), RsfError> {
    let mut n = 0;
    while n < buf.len() {
        match r.read(&mut buf[n..]) {
            Ok(0) => {
                return Err(if n == 0 {
                    RsfError::EndOfStream
                } else {
                    RsfError::Io(std::io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "unexpected end of stream",
                    ))
                })
            }
            Ok(k) => n += k,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
