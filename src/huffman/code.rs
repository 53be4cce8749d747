//! `Code`, `CodeTable`, and the reverse-lookup trie (`DecodeTree`) used by
//! the bit-stream reader's "code walker" (spec.md §4.F, §9 design note:
//! tree-walking is preferred over hashing `(value, bits)` pairs, the way
//! the teacher's `AdaptiveHuffman` walks its own `son`/`parent` arrays
//! bit-by-bit instead of hashing).

use crate::bitio::{BitReader, BitWriter};
use crate::Error;

/// A prefix code: `value`'s low `bits` bits, MSB-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub value: u64,
    pub bits: u8,
}

/// Maps byte values to their `Code`. Bytes never emitted by the LZ77 stage
/// have no entry.
#[derive(Clone, Copy)]
pub struct CodeTable {
    entries: [Option<Code>; 256],
}

impl CodeTable {
    pub fn empty() -> Self {
        Self { entries: [None; 256] }
    }

    pub fn set(&mut self, byte: u8, code: Code) {
        self.entries[byte as usize] = Some(code);
    }

    pub fn get(&self, byte: u8) -> Option<Code> {
        self.entries[byte as usize]
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i as u8, c)))
    }

    /// Writes the table header and entries (spec.md §6.1).
    pub fn write(&self, writer: &mut BitWriter) -> Result<(), Error> {
        let n = self.len();
        if n == 0 {
            return Err(Error::InvariantViolation(
                "attempt to write an empty code table".into(),
            ));
        }
        writer.write_byte((n - 1) as u8);
        for (byte, code) in self.iter() {
            writer.write_byte(byte);
            writer.write_byte(code.bits);
            writer.write_bits(code.value, code.bits);
        }
        Ok(())
    }

    /// Parses a table previously written by `write` (spec.md §6.1).
    pub fn read(reader: &mut BitReader) -> Result<Self, Error> {
        let n_minus_1 = reader
            .read_byte()
            .ok_or_else(|| Error::CorruptStream("truncated code table size".into()))?;
        let n = n_minus_1 as usize + 1;
        let mut table = Self::empty();
        for _ in 0..n {
            let byte = reader
                .read_byte()
                .ok_or_else(|| Error::CorruptStream("truncated code table entry".into()))?;
            let bits = reader
                .read_byte()
                .ok_or_else(|| Error::CorruptStream("truncated code table entry".into()))?;
            if bits == 0 {
                return Err(Error::CorruptStream("code table entry has zero bit length".into()));
            }
            let value = reader
                .read_bits(bits)
                .ok_or_else(|| Error::CorruptStream("truncated code table entry".into()))?;
            table.set(byte, Code { value, bits });
        }
        Ok(table)
    }
}

/// A binary trie over the codes in a `CodeTable`, used to decode one byte
/// at a time by walking bits from a `BitReader`.
pub struct DecodeTree {
    root: DecodeNode,
}

struct DecodeNode {
    leaf: Option<u8>,
    left: Option<Box<DecodeNode>>,
    right: Option<Box<DecodeNode>>,
}

impl DecodeNode {
    fn empty() -> Self {
        Self { leaf: None, left: None, right: None }
    }
}

impl DecodeTree {
    pub fn from_table(table: &CodeTable) -> Result<Self, Error> {
        let mut root = DecodeNode::empty();
        for (byte, code) in table.iter() {
            let mut node = &mut root;
            for i in (0..code.bits).rev() {
                if node.leaf.is_some() {
                    return Err(Error::InvariantViolation(
                        "code table is not prefix-free".into(),
                    ));
                }
                let bit = (code.value >> i) & 1 == 1;
                let child = if bit { &mut node.right } else { &mut node.left };
                if child.is_none() {
                    *child = Some(Box::new(DecodeNode::empty()));
                }
                node = child.as_mut().unwrap();
            }
            if node.leaf.is_some() || node.left.is_some() || node.right.is_some() {
                return Err(Error::InvariantViolation(
                    "code table is not prefix-free".into(),
                ));
            }
            node.leaf = Some(byte);
        }
        Ok(Self { root })
    }

    /// Decodes one byte by walking bits from `reader` until a leaf is hit.
    /// Returns `Error::CorruptStream` if the reader runs out of bits before
    /// a leaf is reached.
    pub fn decode(&self, reader: &mut BitReader) -> Result<u8, Error> {
        let mut node = &self.root;
        if let Some(b) = node.leaf {
            return Ok(b);
        }
        loop {
            let bit = reader
                .read_bit()
                .ok_or_else(|| Error::CorruptStream("end of input while walking a code".into()))?;
            node = if bit { &node.right } else { &node.left }
                .as_deref()
                .ok_or_else(|| Error::CorruptStream("code path not present in table".into()))?;
            if let Some(b) = node.leaf {
                return Ok(b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(entries: &[(u8, u64, u8)]) -> CodeTable {
        let mut t = CodeTable::empty();
        for &(byte, value, bits) in entries {
            t.set(byte, Code { value, bits });
        }
        t
    }

    #[test]
    fn write_then_read_round_trips() {
        let table = table_with(&[(b'a', 0b0, 1), (b'b', 0b10, 2), (b'c', 0b11, 2)]);
        let mut writer = BitWriter::new();
        table.write(&mut writer).unwrap();
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        let parsed = CodeTable::read(&mut reader).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.get(b'a'), Some(Code { value: 0b0, bits: 1 }));
        assert_eq!(parsed.get(b'b'), Some(Code { value: 0b10, bits: 2 }));
        assert_eq!(parsed.get(b'c'), Some(Code { value: 0b11, bits: 2 }));
    }

    #[test]
    fn decode_tree_walks_prefix_codes() {
        let table = table_with(&[(b'a', 0b0, 1), (b'b', 0b10, 2), (b'c', 0b11, 2)]);
        let tree = DecodeTree::from_table(&table).unwrap();
        let mut writer = BitWriter::new();
        writer.write_bits(0b0, 1);
        writer.write_bits(0b10, 2);
        writer.write_bits(0b11, 2);
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        assert_eq!(tree.decode(&mut reader).unwrap(), b'a');
        assert_eq!(tree.decode(&mut reader).unwrap(), b'b');
        assert_eq!(tree.decode(&mut reader).unwrap(), b'c');
    }

    #[test]
    fn non_prefix_free_table_is_rejected() {
        // "0" is a prefix of "01" -- not prefix-free.
        let table = table_with(&[(b'a', 0b0, 1), (b'b', 0b01, 2)]);
        assert!(DecodeTree::from_table(&table).is_err());
    }
}
