//! MSB-first bit reader and the token-stream decode loop (spec.md §4.F,
//! redesigned per DESIGN.md's "unambiguous stream termination" entry).
//!
//! State machine: `ExpectTable -> ExpectTokenCount -> ExpectTokenFlag ->
//! {ExpectLiteralByte | ExpectPtrByte(0..3)} -> ExpectTokenFlag -> ... ->
//! Done`. The table itself is parsed by `CodeTable::read`, and the token
//! count by `codec::decompress`; this module owns the token loop that
//! follows them.

use crate::huffman::DecodeTree;
use crate::token::Token;
use crate::Error;

pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let byte_idx = self.pos / 8;
        if byte_idx >= self.data.len() {
            return None;
        }
        let bit_idx = 7 - (self.pos % 8);
        let bit = (self.data[byte_idx] >> bit_idx) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Reads `n` bits MSB-first into a `u64`. `n` must be `<= 64`.
    pub fn read_bits(&mut self, n: u8) -> Option<u64> {
        let mut v: u64 = 0;
        for _ in 0..n {
            let bit = self.read_bit()?;
            v = (v << 1) | (bit as u64);
        }
        Some(v)
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        self.read_bits(8).map(|v| v as u8)
    }
}

/// Decodes exactly `count` tokens following a parsed code table.
///
/// `count` comes from the token-count header field `codec::compress`
/// writes right after the code table, which is what makes stream
/// termination unambiguous: the wire format's zero-padded tail (spec.md
/// §6.3) can't be mistaken for a real token because the reader never
/// tries to decode one past `count` in the first place. Running out of
/// bits before `count` tokens are decoded (the flag bit, a code walk that
/// never reaches a leaf, or a truncated back-reference payload) is always
/// `CorruptStream` -- there is no longer a "treat EOF as clean end of
/// stream" case, since `count` alone determines when decoding stops.
pub fn decode_tokens(reader: &mut BitReader, tree: &DecodeTree, count: u64) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    for _ in 0..count {
        let is_literal = reader
            .read_bit()
            .ok_or_else(|| Error::CorruptStream("truncated token stream".into()))?;
        if is_literal {
            let byte = tree.decode(reader)?;
            tokens.push(Token::literal(byte));
        } else {
            let [hi, lo, length] = decode_pointer_payload(reader, tree)?;
            let distance = u16::from_be_bytes([hi, lo]);
            tokens.push(Token::back_ref(distance, length));
        }
    }
    Ok(tokens)
}

fn decode_pointer_payload(reader: &mut BitReader, tree: &DecodeTree) -> Result<[u8; 3], Error> {
    let hi = tree.decode(reader)?;
    let lo = tree.decode(reader)?;
    let length = tree.decode(reader)?;
    Ok([hi, lo, length])
}
