//! Variable-width bit-packing codec over the 62-symbol share alphabet.
//!
//! Each alphabet index occupies either 5 or 6 bits: an index whose low 5
//! bits are all set (30 and 31) is written as 5 bits, every other index as
//! its full 6-bit value. 62 is not a power of two, so greedy 6-bit decoding
//! would be ambiguous at 30/31 (their 6-bit extensions collide with the
//! valid indices 60/61); restricting 30/31 to 5 bits keeps the stream a
//! uniquely-decodable prefix-free code without a length table.
//!
//! Bits are packed least-significant-bit-first at a monotonically growing
//! bit cursor. A symbol straddling a byte boundary spills its high bits into
//! the next byte, except for the final symbol of the stream: no trailing
//! placeholder byte is emitted for it.

use crate::error::{CodecError, CodecResult};

/// The forward alphabet: index 0–61 to symbol.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Reverse lookup: ASCII byte to alphabet index, -1 for symbols outside the
/// alphabet.
static REVERSE: [i8; 128] = build_reverse();

const fn build_reverse() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// True when the 6-bit window value has its low 5 bits all set, i.e. the
/// symbol is written with 5 bits instead of 6.
const fn is_narrow(value: u8) -> bool {
    value & 0b1_1110 == 0b1_1110
}

/// Writes the low `width` bits of `value` at `cursor`, growing the buffer
/// as needed. The spill byte for a straddling value is only allocated when
/// this is not the last symbol of the stream.
fn write_bits(bytes: &mut Vec<u8>, cursor: usize, width: usize, value: u8, last: bool) {
    let byte_index = cursor / 8;
    while byte_index >= bytes.len() {
        bytes.push(0);
    }

    let bit_pos = cursor % 8;
    bytes[byte_index] |= ((u16::from(value) << bit_pos) & 0xff) as u8;

    if bit_pos > 8 - width && !last {
        if byte_index + 1 >= bytes.len() {
            bytes.push(0);
        }
        bytes[byte_index + 1] |= value >> (8 - bit_pos);
    }
}

/// Reads a 6-bit window at `cursor`, treating bits past the end of the
/// buffer as zero.
fn read_bits(bytes: &[u8], cursor: usize) -> u8 {
    let byte_index = cursor / 8;
    if byte_index >= bytes.len() {
        return 0;
    }

    let bit_pos = cursor % 8;
    let mut value = u16::from(bytes[byte_index] >> bit_pos);
    if byte_index + 1 < bytes.len() && bit_pos > 2 {
        value |= u16::from(bytes[byte_index + 1]) << (8 - bit_pos);
    }

    (value & 0b11_1111) as u8
}

/// Decodes alphabet-packed text into the byte sequence it encodes.
///
/// Empty input decodes to an empty vec.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSymbol`] for any character outside the
/// alphabet.
pub fn decode(text: &str) -> CodecResult<Vec<u8>> {
    let symbols: Vec<char> = text.chars().collect();
    let mut bytes = Vec::new();
    let mut cursor = 0usize;

    for (pos, &ch) in symbols.iter().enumerate() {
        let code = ch as usize;
        let index = match REVERSE.get(code) {
            Some(&v) if v >= 0 => v as u8,
            _ => return Err(CodecError::InvalidSymbol { ch, pos }),
        };

        let last = pos == symbols.len() - 1;
        if is_narrow(index) {
            write_bits(&mut bytes, cursor, 5, index & 0b1_1111, last);
            cursor += 5;
        } else {
            write_bits(&mut bytes, cursor, 6, index, last);
            cursor += 6;
        }
    }

    Ok(bytes)
}

/// Encodes a byte sequence as alphabet-packed text.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let mut out = String::new();
    let mut cursor = 0usize;

    while cursor < total_bits {
        let value = read_bits(bytes, cursor);
        let index = if is_narrow(value) {
            cursor += 5;
            value & 0b1_1111
        } else {
            cursor += 6;
            value
        };
        out.push(ALPHABET[index as usize] as char);
    }

    out
}
