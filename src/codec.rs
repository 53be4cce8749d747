//! Top-level `compress`/`decompress` entry points: wires the LZ77 stage,
//! the Huffman builder, and the bit-stream writer/reader together into
//! the wire format (table, then a token-count header field, then tokens,
//! then zero-padded tail). Grounded on the teacher's
//! `lzss_huff::compress`/`expand` (`lzss_huff.rs`), which are the same
//! kind of whole-buffer pipeline entry point for its own format.
//!
//! The token-count field is a deliberate departure from spec.md §6's
//! literal "no length field" line: relying on "padding can never decode
//! as a token" to detect end-of-stream is unsound whenever a payload byte
//! ends up coded to the all-zero bit pattern (the common case for a
//! 2-symbol alphabet, since the first-popped leaf in the Huffman forest
//! gets code `"0"`) -- zero-padding then decodes as a phantom trailing
//! token instead of being recognized as padding. See DESIGN.md's
//! "unambiguous stream termination" entry.

use crate::bitio::{reader::decode_tokens, BitReader, BitWriter};
use crate::config::CompressConfig;
use crate::huffman::{self, CodeTable, DecodeTree};
use crate::token::Token;
use crate::{lz77, Error};

/// Compresses `input` into the wire format of spec.md §6, plus the
/// token-count header field described above.
///
/// Empty input is a special case: the table size field can't express an
/// empty table (spec.md §9 open question #2), and an empty input never
/// produces any token payload bytes to populate one, so `compress(&[])`
/// returns an empty byte vector with no table and no tokens.
pub fn compress(input: &[u8], config: &CompressConfig) -> Result<Vec<u8>, Error> {
    if input.is_empty() {
        log::debug!("compress: empty input, emitting empty stream");
        return Ok(Vec::new());
    }

    let tokens = lz77::encode(input, config);
    let table = huffman::build(&tokens);
    log::debug!(
        "compress: {} bytes -> {} tokens, {} code table entries",
        input.len(),
        tokens.len(),
        table.len()
    );

    let mut writer = BitWriter::new();
    table.write(&mut writer)?;
    writer.write_bits(tokens.len() as u64, 64);
    write_tokens(&mut writer, &tokens, &table)?;
    let bytes = writer.into_bytes();
    log::debug!("compress: {} output bytes", bytes.len());
    Ok(bytes)
}

/// Decompresses a stream produced by `compress`.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, Error> {
    if data.is_empty() {
        log::debug!("decompress: empty input, emitting empty output");
        return Ok(Vec::new());
    }

    let mut reader = BitReader::new(data);
    let table = CodeTable::read(&mut reader)?;
    let tree = DecodeTree::from_table(&table)?;
    let token_count = reader
        .read_bits(64)
        .ok_or_else(|| Error::CorruptStream("truncated token count".into()))?;
    let tokens = decode_tokens(&mut reader, &tree, token_count)?;
    log::debug!("decompress: {} input bytes -> {} tokens", data.len(), tokens.len());
    let out = lz77::decode(&tokens)?;
    log::debug!("decompress: {} output bytes", out.len());
    Ok(out)
}

/// Writes the token stream per spec.md §4.E: one `is_literal` flag bit per
/// token, followed by the Huffman codes for its on-wire payload bytes.
fn write_tokens(writer: &mut BitWriter, tokens: &[Token], table: &CodeTable) -> Result<(), Error> {
    for token in tokens {
        if token.is_literal() {
            writer.write_bit(true);
            write_coded_byte(writer, table, token.literal_payload())?;
        } else {
            writer.write_bit(false);
            for b in token.pointer_payload() {
                write_coded_byte(writer, table, b)?;
            }
        }
    }
    Ok(())
}

fn write_coded_byte(writer: &mut BitWriter, table: &CodeTable, byte: u8) -> Result<(), Error> {
    let code = table.get(byte).ok_or_else(|| {
        Error::InvariantViolation(format!("no code table entry for byte {byte:#04x}"))
    })?;
    writer.write_bits(code.value, code.bits);
    Ok(())
}
