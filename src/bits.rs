//! Bit Kernels (Optimized)
//!
//! **Block Layout**: byte buffers are consumed as 512-bit blocks of 8 x u64,
//! the same stride the rank directory of a succinct bit vector uses.
//! Popcount over a block sums eight independent words for ILP, the tail
//! falls back to single words and then single bytes.
//!
//! Bit order: slot `i` lives in byte `i / 8`, most significant bit first.

use alloc::vec::Vec;

use crate::error::{ReachError, Result};

/// 512 bits per block
const BLOCK_BYTES: usize = 64;
const WORD_BYTES: usize = 8;

#[inline(always)]
fn word(chunk: &[u8]) -> u64 {
    let mut buf = [0u8; WORD_BYTES];
    buf.copy_from_slice(chunk);
    u64::from_le_bytes(buf)
}

/// Popcount of a whole buffer.
#[inline]
pub fn count_ones(data: &[u8]) -> usize {
    let mut blocks = data.chunks_exact(BLOCK_BYTES);
    let mut sum = 0usize;

    for block in blocks.by_ref() {
        // Unrolled body: 8 words, no carried dependency until the final add
        let mut acc = [0u32; 8];
        for (w, slot) in block.chunks_exact(WORD_BYTES).zip(acc.iter_mut()) {
            *slot = word(w).count_ones();
        }
        sum += acc.iter().map(|&c| c as usize).sum::<usize>();
    }

    let rest = blocks.remainder();
    let mut words = rest.chunks_exact(WORD_BYTES);
    for w in words.by_ref() {
        sum += word(w).count_ones() as usize;
    }
    for &b in words.remainder() {
        sum += b.count_ones() as usize;
    }

    sum
}

/// Popcount of `a & b` without materializing the intersection.
#[inline]
pub fn count_ones_and(a: &[u8], b: &[u8]) -> usize {
    let mut wa = a.chunks_exact(WORD_BYTES);
    let mut wb = b.chunks_exact(WORD_BYTES);
    let mut sum = 0usize;

    for (x, y) in wa.by_ref().zip(wb.by_ref()) {
        sum += (word(x) & word(y)).count_ones() as usize;
    }
    for (x, y) in wa.remainder().iter().zip(wb.remainder()) {
        sum += (x & y).count_ones() as usize;
    }

    sum
}

/// Bitwise AND. Lengths are checked by the caller.
pub fn and(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x & y).collect()
}

/// Bitwise OR. Lengths are checked by the caller.
pub fn or(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x | y).collect()
}

/// Bitwise complement.
pub fn not(a: &[u8]) -> Vec<u8> {
    a.iter().map(|x| !x).collect()
}

/// Access slot `i`
#[inline(always)]
pub fn get(data: &[u8], i: usize) -> bool {
    (data[i / 8] >> (7 - i % 8)) & 1 != 0
}

/// Parse a textual bit string such as `"1000_0101 0110"`.
///
/// Underscores and whitespace are separators. The number of bits must be a
/// multiple of 8 so every byte is fully specified.
pub fn parse(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len() / 8);
    let mut cur = 0u8;
    let mut n = 0usize;

    for (position, ch) in text.chars().enumerate() {
        let bit = match ch {
            '0' => 0,
            '1' => 1,
            '_' => continue,
            c if c.is_whitespace() => continue,
            found => return Err(ReachError::InvalidBitString { position, found }),
        };
        cur = (cur << 1) | bit;
        n += 1;
        if n % 8 == 0 {
            out.push(cur);
            cur = 0;
        }
    }

    if n % 8 != 0 {
        return Err(ReachError::UnalignedBitString { bits: n });
    }
    Ok(out)
}
