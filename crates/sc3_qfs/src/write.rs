//! Encoding of QFS streams
//!

use bon::Builder;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::read::{SIGNATURE_BITS, SIGNATURE_BYTE};

const MIN_MATCH: usize = 3;
const MAX_MATCH: usize = 1028;
const MAX_WINDOW: usize = 131_072;
const MAX_HASH: usize = 65_536;

/// Inputs below this length never beat the five header bytes.
const MIN_INPUT: usize = 10;
/// The 3-byte size field tops out here.
const MAX_INPUT: usize = 0xFF_FFFF;

const GOOD_LENGTH: usize = 32;
const MAX_LAZY: usize = 258;
const NICE_LENGTH: usize = 258;
const MAX_CHAIN: usize = 4096;

/// Literal-run opcodes carry a multiple of four bytes, at most this many.
const MAX_LITERAL_RUN: usize = 112;

/// Options for how the QFS stream should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct CompressOptions {
    /// Prefix the stream with its own total length as a little-endian u32
    #[builder(default)]
    pub length_prefix: bool,
}

/// Compress `input` into a QFS stream.
///
/// Returns `Ok(None)` when the stream would not come out smaller than the
/// input; callers should then store the original bytes instead.
///
/// # Errors
///
/// Fails with [`Error::InputTooLarge`] when the input exceeds what the
/// header's 3-byte size field can declare.
#[instrument(skip(input), fields(len = input.len()), err)]
pub fn compress(input: &[u8], options: CompressOptions) -> Result<Option<Vec<u8>>> {
    if input.len() > MAX_INPUT {
        return Err(Error::InputTooLarge(input.len()));
    }
    if input.len() < MIN_INPUT {
        return Ok(None);
    }
    let budget = input.len() - 1;

    let mut out = Vec::with_capacity(budget);
    out.extend_from_slice(&[SIGNATURE_BITS, SIGNATURE_BYTE]);
    let mut size = [0u8; 3];
    BigEndian::write_u24(&mut size, input.len() as u32);
    out.extend_from_slice(&size);

    let mut finder = MatchFinder::new(input);
    let mut lit_start = 0usize;
    let mut pos = 0usize;
    let mut deferred: Option<Found> = None;

    while pos < input.len() {
        let cur = if pos + MIN_MATCH <= input.len() {
            let floor = deferred.as_ref().map_or(0, |f| f.len);
            finder.longest_match(pos, floor)
        } else {
            None
        };

        match (deferred.take(), cur) {
            (Some(_), longer @ Some(_)) => {
                // The next position found a strictly longer match, so the
                // byte before it degrades to a pending literal.
                deferred = longer;
                pos += 1;
            }
            (Some(held), None) => {
                let start = pos - 1;
                flush_match(&mut out, &input[lit_start..start], &held);
                if out.len() > budget {
                    return Ok(None);
                }
                finder.insert_range(pos + 1, start + held.len);
                pos = start + held.len;
                lit_start = pos;
            }
            (None, Some(found)) => {
                if found.len >= MAX_LAZY {
                    flush_match(&mut out, &input[lit_start..pos], &found);
                    if out.len() > budget {
                        return Ok(None);
                    }
                    finder.insert_range(pos + 1, pos + found.len);
                    pos += found.len;
                    lit_start = pos;
                } else {
                    deferred = Some(found);
                    pos += 1;
                }
            }
            (None, None) => pos += 1,
        }
    }

    let tail = &input[lit_start..];
    let split = tail.len() - (tail.len() % 4);
    put_literal_runs(&mut out, &tail[..split]);
    out.push(0xFC | (tail.len() - split) as u8);
    out.extend_from_slice(&tail[split..]);

    if options.length_prefix {
        let mut prefixed = Vec::with_capacity(out.len() + 4);
        let mut field = [0u8; 4];
        LittleEndian::write_u32(&mut field, (out.len() + 4) as u32);
        prefixed.extend_from_slice(&field);
        prefixed.extend_from_slice(&out);
        out = prefixed;
    }

    if out.len() > budget {
        return Ok(None);
    }
    Ok(Some(out))
}

struct Found {
    len: usize,
    dist: usize,
}

/// Deflate-style hash-chain match finder over one input buffer.
struct MatchFinder<'a> {
    input: &'a [u8],
    window_size: usize,
    window_mask: usize,
    hash_mask: usize,
    hash_shift: u32,
    hash: usize,
    head: Vec<i32>,
    prev: Vec<i32>,
}

impl<'a> MatchFinder<'a> {
    fn new(input: &'a [u8]) -> Self {
        let window_size = floor_pow2(input.len()).min(MAX_WINDOW);
        let hash_size = (window_size / 2).clamp(32, MAX_HASH);
        let hash_shift = (hash_size.trailing_zeros() + 2) / 3;

        let mut finder = MatchFinder {
            input,
            window_size,
            window_mask: window_size - 1,
            hash_mask: hash_size - 1,
            hash_shift,
            hash: 0,
            head: vec![-1; hash_size],
            prev: vec![-1; window_size],
        };
        finder.hash = input[0] as usize & finder.hash_mask;
        finder.hash = ((finder.hash << hash_shift) ^ input[1] as usize) & finder.hash_mask;
        finder
    }

    /// Enter `pos` into the chain for its 3-byte prefix; returns the most
    /// recent earlier position sharing it. Positions must be inserted in
    /// order, each exactly once, to keep the rolling hash aligned.
    fn insert(&mut self, pos: usize) -> i32 {
        self.hash =
            ((self.hash << self.hash_shift) ^ self.input[pos + 2] as usize) & self.hash_mask;
        let head = self.head[self.hash];
        self.prev[pos & self.window_mask] = head;
        self.head[self.hash] = pos as i32;
        head
    }

    fn insert_range(&mut self, from: usize, to: usize) {
        for k in from..to {
            if k + MIN_MATCH > self.input.len() {
                break;
            }
            self.insert(k);
        }
    }

    /// Search the chain at `pos` for a match strictly longer than `floor`
    /// whose offset its length can encode.
    fn longest_match(&mut self, pos: usize, floor: usize) -> Option<Found> {
        let mut candidate = self.insert(pos);
        let max_len = (self.input.len() - pos).min(MAX_MATCH);
        if max_len < MIN_MATCH {
            return None;
        }

        let mut chain = if floor >= GOOD_LENGTH {
            MAX_CHAIN / 4
        } else {
            MAX_CHAIN
        };
        let mut best_len = floor.max(MIN_MATCH - 1);
        let mut best = None;

        while candidate >= 0 {
            let cpos = candidate as usize;
            let dist = pos - cpos;
            if dist > self.window_size {
                break;
            }

            let len = self.input[pos..pos + max_len]
                .iter()
                .zip(&self.input[cpos..])
                .take_while(|(a, b)| a == b)
                .count();

            if len > best_len && encodable(dist, len) {
                best_len = len;
                best = Some(Found { len, dist });
                if len >= NICE_LENGTH {
                    break;
                }
            }

            chain -= 1;
            if chain == 0 {
                break;
            }
            candidate = self.prev[cpos & self.window_mask];
        }
        best
    }
}

fn floor_pow2(n: usize) -> usize {
    1 << (usize::BITS - 1 - n.leading_zeros())
}

/// An offset is representable only by opcode families whose length range
/// covers it.
fn encodable(dist: usize, len: usize) -> bool {
    if dist <= 1024 {
        true
    } else if dist <= 16_384 {
        len >= 4
    } else {
        len >= 5
    }
}

/// Emit pending literals (multiple-of-four blocks) and the match opcode
/// carrying the 0-3 residual literals.
fn flush_match(out: &mut Vec<u8>, lits: &[u8], found: &Found) {
    let split = lits.len() - (lits.len() % 4);
    put_literal_runs(out, &lits[..split]);
    put_match(out, &lits[split..], found.dist, found.len);
}

fn put_literal_runs(out: &mut Vec<u8>, lits: &[u8]) {
    for chunk in lits.chunks(MAX_LITERAL_RUN) {
        out.push(0xE0 | (chunk.len() / 4 - 1) as u8);
        out.extend_from_slice(chunk);
    }
}

fn put_match(out: &mut Vec<u8>, plain: &[u8], dist: usize, len: usize) {
    debug_assert!(plain.len() <= 3);
    let p = plain.len();
    let d = dist - 1;

    if dist <= 1024 && len <= 10 {
        out.push(((d >> 8) << 5 | (len - 3) << 2 | p) as u8);
        out.push((d & 0xFF) as u8);
    } else if dist <= 16_384 && len <= 67 {
        out.push((0x80 | (len - 4)) as u8);
        out.push((p << 6 | d >> 8) as u8);
        out.push((d & 0xFF) as u8);
    } else {
        out.push((0xC0 | (d >> 16) << 4 | ((len - 5) >> 8) << 2 | p) as u8);
        out.push((d >> 8 & 0xFF) as u8);
        out.push((d & 0xFF) as u8);
        out.push(((len - 5) & 0xFF) as u8);
    }
    out.extend_from_slice(plain);
}
