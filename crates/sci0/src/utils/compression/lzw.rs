//! The SCI0 LZW decompressor.
//!
//! This is the classic variable-width LZW scheme with codes packed least
//! significant bit first: code 256 resets the dictionary, code 257 ends the
//! stream, and codes grow from 9 to 12 bits as the dictionary fills.

use bitter::LittleEndianReader;

use super::bits::BitReaderExt as _;

const CLEAR_CODE: u16 = 0x100;
const END_CODE: u16 = 0x101;
const FIRST_FREE_CODE: u16 = 0x102;
const INITIAL_WIDTH: u32 = 9;
const MAX_WIDTH: u32 = 12;
const MAX_CODES: usize = 1 << MAX_WIDTH;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LzwError {
    #[error("LZW stream ended after {decoded} bytes without an end code")]
    UnexpectedEnd { decoded: usize },
    #[error("Invalid LZW code {code:#x} (next free code is {next_code:#x})")]
    InvalidCode { code: u16, next_code: u16 },
}

/// A dictionary entry. Every string in the dictionary has already been
/// written to the output once, so entries are stored as ranges of it.
#[derive(Debug, Clone, Copy, Default)]
struct DictEntry {
    start: usize,
    len: usize,
}

struct Dictionary {
    entries: Vec<DictEntry>,
    next_code: u16,
    width: u32,
}

impl Dictionary {
    fn new() -> Self {
        Dictionary {
            entries: vec![DictEntry::default(); MAX_CODES],
            next_code: FIRST_FREE_CODE,
            width: INITIAL_WIDTH,
        }
    }

    fn reset(&mut self) {
        self.next_code = FIRST_FREE_CODE;
        self.width = INITIAL_WIDTH;
    }

    fn is_full(&self) -> bool {
        usize::from(self.next_code) >= MAX_CODES
    }

    fn push(&mut self, entry: DictEntry) {
        if self.is_full() {
            return;
        }
        self.entries[usize::from(self.next_code)] = entry;
        self.next_code += 1;
        if u32::from(self.next_code) >= 1 << self.width && self.width < MAX_WIDTH {
            self.width += 1;
        }
    }
}

fn copy_within_output(output: &mut Vec<u8>, entry: DictEntry) {
    // The source range may run into the bytes being appended (the KwKwK
    // case), so this has to go a byte at a time.
    for offset in 0..entry.len {
        let byte = output[entry.start + offset];
        output.push(byte);
    }
}

/// Decompresses an LZW-packed resource payload.
///
/// `expected_len` is only used to size the output buffer.
pub fn decompress_lzw(input: &[u8], expected_len: usize) -> Result<Vec<u8>, LzwError> {
    let mut reader = LittleEndianReader::new(input);
    let mut output = Vec::with_capacity(expected_len);
    let mut dict = Dictionary::new();
    // The string written for the previous code, if any since the last reset.
    let mut prev: Option<DictEntry> = None;

    loop {
        let Some(code) = reader
            .next_bits(dict.width)
            .ok()
            .and_then(|code| u16::try_from(code).ok())
        else {
            return Err(LzwError::UnexpectedEnd {
                decoded: output.len(),
            });
        };
        match code {
            CLEAR_CODE => {
                dict.reset();
                prev = None;
                continue;
            }
            END_CODE => return Ok(output),
            _ => {}
        }

        let start = output.len();
        match prev {
            None => {
                let Ok(literal) = u8::try_from(code) else {
                    return Err(LzwError::InvalidCode {
                        code,
                        next_code: dict.next_code,
                    });
                };
                output.push(literal);
            }
            Some(prev) => {
                // The new entry is the previous string plus the first byte
                // of this one, which sits right after it in the output.
                let new_entry = DictEntry {
                    start: prev.start,
                    len: prev.len + 1,
                };
                if let Ok(literal) = u8::try_from(code) {
                    output.push(literal);
                    dict.push(new_entry);
                } else if code < dict.next_code {
                    copy_within_output(&mut output, dict.entries[usize::from(code)]);
                    dict.push(new_entry);
                } else if code == dict.next_code && !dict.is_full() {
                    dict.push(new_entry);
                    copy_within_output(&mut output, new_entry);
                } else {
                    return Err(LzwError::InvalidCode {
                        code,
                        next_code: dict.next_code,
                    });
                }
            }
        }
        prev = Some(DictEntry {
            start,
            len: output.len() - start,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::utils::compression::writer::{BitOrder, BitPacker};

    /// The last code the encoder hands out before it emits a clear code.
    const ENCODER_CODE_LIMIT: u16 = 0xFFF;

    fn bump(width: &mut u8, hi: &mut u16) {
        *hi += 1;
        if *hi == 1 << *width {
            *width += 1;
        }
    }

    /// A reference encoder producing the same code stream as the usual
    /// LSB-first, 8-bit literal LZW writers.
    fn compress_lzw(data: &[u8]) -> Vec<u8> {
        let mut writer = BitPacker::new(BitOrder::LsbFirst);
        let mut table: HashMap<(u16, u8), u16> = HashMap::new();
        let mut width: u8 = 9;
        let mut hi = END_CODE;

        let mut iter = data.iter().copied();
        if let Some(first) = iter.next() {
            let mut code = u16::from(first);
            for byte in iter {
                let key = (code, byte);
                if let Some(&existing) = table.get(&key) {
                    code = existing;
                    continue;
                }
                writer.push_bits(width, u64::from(code));
                code = u16::from(byte);
                bump(&mut width, &mut hi);
                if hi == ENCODER_CODE_LIMIT {
                    writer.push_bits(width, u64::from(CLEAR_CODE));
                    width = 9;
                    hi = END_CODE;
                    table.clear();
                } else {
                    table.insert(key, hi);
                }
            }
            writer.push_bits(width, u64::from(code));
            bump(&mut width, &mut hi);
            if hi == ENCODER_CODE_LIMIT {
                writer.push_bits(width, u64::from(CLEAR_CODE));
                width = 9;
            }
        }
        writer.push_bits(width, u64::from(END_CODE));
        writer.finish()
    }

    fn write_codes(codes: &[(u8, u16)]) -> Vec<u8> {
        let mut writer = BitPacker::new(BitOrder::LsbFirst);
        for &(width, code) in codes {
            writer.push_bits(width, u64::from(code));
        }
        writer.finish()
    }

    #[test]
    fn empty_stream() {
        let input = write_codes(&[(9, END_CODE)]);
        assert_eq!(decompress_lzw(&input, 0).unwrap(), b"");
    }

    #[test]
    fn literals_and_back_references() {
        // "ABABABA": A, B, 258 ("AB"), 260 ("ABA", the KwKwK case).
        let input = write_codes(&[(9, 0x41), (9, 0x42), (9, 0x102), (9, 0x104), (9, END_CODE)]);
        assert_eq!(decompress_lzw(&input, 7).unwrap(), b"ABABABA");
    }

    #[test]
    fn clear_code_resets_the_dictionary() {
        let input = write_codes(&[
            (9, 0x41),
            (9, 0x42),
            (9, CLEAR_CODE),
            (9, 0x43),
            (9, 0x102),
        ]);
        // After the reset, 0x102 has not been defined yet.
        assert_eq!(
            decompress_lzw(&input, 0),
            Err(LzwError::InvalidCode {
                code: 0x102,
                next_code: 0x102
            })
        );
    }

    #[test]
    fn first_code_must_be_a_literal() {
        let input = write_codes(&[(9, 0x102), (9, END_CODE)]);
        assert!(matches!(
            decompress_lzw(&input, 0),
            Err(LzwError::InvalidCode { code: 0x102, .. })
        ));
    }

    #[test]
    fn missing_end_code_is_an_error() {
        let input = write_codes(&[(9, 0x41), (9, 0x42)]);
        assert!(matches!(
            decompress_lzw(&input, 2),
            Err(LzwError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn reference_encoder_matches_known_stream() {
        assert_eq!(
            compress_lzw(b"ABABABA"),
            write_codes(&[(9, 0x41), (9, 0x42), (9, 0x102), (9, 0x104), (9, END_CODE)])
        );
    }

    #[test]
    fn long_repetitive_input_grows_code_width() {
        // Enough distinct pairs to push the dictionary past 512 and 1024
        // entries, and past the clear point.
        let data: Vec<u8> = (0..40_000u32)
            .map(|i| u8::try_from((i * 7 + i / 13) % 251).unwrap())
            .collect();
        let compressed = compress_lzw(&data);
        assert_eq!(decompress_lzw(&compressed, data.len()).unwrap(), data);
    }

    #[test]
    fn full_dictionary_stops_growing_without_a_clear() {
        // Every literal after the first defines one entry, so 3839 literals
        // fill codes 258..=4095.
        let data: Vec<u8> = (0..3839u32)
            .map(|i| u8::try_from(i % 200).unwrap())
            .collect();
        let mut codes = Vec::new();
        let mut width = 9u8;
        let mut next_code = FIRST_FREE_CODE;
        for (i, &byte) in data.iter().enumerate() {
            codes.push((width, u16::from(byte)));
            if i > 0 {
                next_code += 1;
                if next_code == 1 << width && width < 12 {
                    width += 1;
                }
            }
        }
        assert_eq!((next_code, width), (4096, 12));

        // The table is frozen: a literal adds nothing, and 4095 and 300 still
        // expand to the pairs they were defined as.
        codes.extend([
            (12, u16::from(b'Z')),
            (12, 4095),
            (12, 300),
            (12, 4095),
            (12, END_CODE),
        ]);
        let mut expected = data;
        expected.extend_from_slice(&[b'Z', 37, 38, 42, 43, 37, 38]);
        assert_eq!(decompress_lzw(&write_codes(&codes), 0).unwrap(), expected);
    }

    proptest! {
        #[test]
        fn reference_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4_000)) {
            let compressed = compress_lzw(&data);
            prop_assert_eq!(decompress_lzw(&compressed, data.len()).unwrap(), data);
        }

        #[test]
        fn small_alphabet_roundtrip(data in prop::collection::vec(prop::sample::select(&[0u8, 1u8]), 0..10_000)) {
            let compressed = compress_lzw(&data);
            prop_assert_eq!(decompress_lzw(&compressed, data.len()).unwrap(), data);
        }
    }
}
