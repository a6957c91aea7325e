//! The SCI0 Huffman decompressor.
//!
//! A payload starts with a node count and a terminator byte, followed by the
//! tree as `(value, control)` byte pairs and then the MSB-first bitstream.
//! A node with a zero control byte is a leaf. Otherwise the high nibble of the
//! control byte is the forward distance to the left child and the low nibble
//! the distance to the right child. A zero right distance means the next eight
//! bits are a literal byte instead of a tree path.

use bitter::BigEndianReader;

use super::{bits::BitReaderExt as _, errors::UnexpectedEndOfInput};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HuffmanError {
    #[error("Huffman payload is {available} bytes, but the tree needs {required}")]
    TruncatedTree { required: usize, available: usize },
    #[error("Huffman tree has no nodes")]
    EmptyTree,
    #[error("Huffman tree root is a non-terminator leaf, so decoding never ends")]
    DegenerateTree,
    #[error("Huffman node {from} links to node {to}, but the tree only has {count} nodes")]
    NodeOutOfRange { from: usize, to: usize, count: usize },
    #[error("Huffman tree walk did not reach a leaf within {limit} steps")]
    Cycle { limit: usize },
    #[error("Huffman bitstream ended after {decoded} bytes without a terminator")]
    UnexpectedEnd { decoded: usize },
}

#[derive(Debug, Clone, Copy)]
enum HuffmanTableEntry {
    Leaf(u8),
    /// Child distances relative to this node. A `None` right child marks a
    /// literal escape.
    Branch { left: usize, right: Option<usize> },
}

impl HuffmanTableEntry {
    fn from_node(value: u8, control: u8) -> Self {
        if control == 0 {
            return HuffmanTableEntry::Leaf(value);
        }
        let right = usize::from(control & 0x0F);
        HuffmanTableEntry::Branch {
            left: usize::from(control >> 4),
            right: (right != 0).then_some(right),
        }
    }
}

enum Lookup {
    Symbol(u8),
    OutOfInput,
}

struct HuffmanTable {
    entries: Vec<HuffmanTableEntry>,
}

impl HuffmanTable {
    /// A leaf root consumes no input, so it is only usable when it decodes
    /// straight to the terminator.
    fn from_nodes(nodes: &[u8], terminator: u8) -> Result<Self, HuffmanError> {
        let entries: Vec<_> = nodes
            .chunks_exact(2)
            .map(|node| HuffmanTableEntry::from_node(node[0], node[1]))
            .collect();
        match entries.first() {
            None => Err(HuffmanError::EmptyTree),
            Some(&HuffmanTableEntry::Leaf(value)) if value != terminator => {
                Err(HuffmanError::DegenerateTree)
            }
            Some(_) => Ok(HuffmanTable { entries }),
        }
    }

    fn child(&self, from: usize, distance: usize) -> Result<usize, HuffmanError> {
        let to = from + distance;
        if to >= self.entries.len() {
            return Err(HuffmanError::NodeOutOfRange {
                from,
                to,
                count: self.entries.len(),
            });
        }
        Ok(to)
    }

    /// Decodes one symbol, starting from the root.
    fn lookup(&self, reader: &mut BigEndianReader<'_>) -> Result<Lookup, HuffmanError> {
        // An acyclic path never visits more nodes than the table holds.
        let limit = self.entries.len();
        let mut pos = 0;
        for _ in 0..limit {
            match self.entries[pos] {
                HuffmanTableEntry::Leaf(value) => return Ok(Lookup::Symbol(value)),
                HuffmanTableEntry::Branch { left, right } => {
                    let Ok(bit) = reader.next_bit() else {
                        return Ok(Lookup::OutOfInput);
                    };
                    let distance = if bit {
                        match right {
                            Some(right) => right,
                            None => {
                                return Ok(match reader.next_u8() {
                                    Ok(literal) => Lookup::Symbol(literal),
                                    Err(UnexpectedEndOfInput) => Lookup::OutOfInput,
                                });
                            }
                        }
                    } else {
                        left
                    };
                    pos = self.child(pos, distance)?;
                }
            }
        }
        Err(HuffmanError::Cycle { limit })
    }
}

/// Decompresses a Huffman-packed resource payload.
///
/// Decoding stops at the first symbol equal to the terminator byte, which is
/// not included in the output. `expected_len` is only used to size the output
/// buffer.
pub fn huffman_decode(payload: &[u8], expected_len: usize) -> Result<Vec<u8>, HuffmanError> {
    let [node_count, terminator, rest @ ..] = payload else {
        return Err(HuffmanError::TruncatedTree {
            required: 2,
            available: payload.len(),
        });
    };
    let tree_size = usize::from(*node_count) * 2;
    if rest.len() < tree_size {
        return Err(HuffmanError::TruncatedTree {
            required: 2 + tree_size,
            available: payload.len(),
        });
    }
    let (nodes, bitstream) = rest.split_at(tree_size);
    let table = HuffmanTable::from_nodes(nodes, *terminator)?;

    let mut reader = BigEndianReader::new(bitstream);
    let mut output = Vec::with_capacity(expected_len);
    loop {
        match table.lookup(&mut reader)? {
            Lookup::Symbol(value) if value == *terminator => return Ok(output),
            Lookup::Symbol(value) => output.push(value),
            Lookup::OutOfInput => {
                return Err(HuffmanError::UnexpectedEnd {
                    decoded: output.len(),
                });
            }
        }
    }
}
