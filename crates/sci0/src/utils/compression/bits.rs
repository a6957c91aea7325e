//! Fallible bit reads over the `bitter` readers.
//!
//! Huffman streams are read with [`bitter::BigEndianReader`] (most
//! significant bit first) and LZW codes with [`bitter::LittleEndianReader`].

use super::errors::UnexpectedEndOfInput;

pub(super) trait BitReaderExt: bitter::BitReader {
    fn next_bit(&mut self) -> Result<bool, UnexpectedEndOfInput> {
        self.read_bit().ok_or(UnexpectedEndOfInput)
    }

    fn next_bits(&mut self, count: u32) -> Result<u64, UnexpectedEndOfInput> {
        self.read_bits(count).ok_or(UnexpectedEndOfInput)
    }

    fn next_u8(&mut self) -> Result<u8, UnexpectedEndOfInput> {
        self.read_u8().ok_or(UnexpectedEndOfInput)
    }
}

impl<R> BitReaderExt for R where R: bitter::BitReader {}

#[cfg(test)]
mod tests {
    use bitter::{BigEndianReader, LittleEndianReader};

    use super::*;

    #[test]
    fn big_endian_reads_msb_first() {
        let data = [0b1010_0000, 0xC3];
        let mut reader = BigEndianReader::new(&data);
        assert!(reader.next_bit().unwrap());
        assert!(!reader.next_bit().unwrap());
        assert!(reader.next_bit().unwrap());
        assert_eq!(reader.next_bits(5).unwrap(), 0);
        assert_eq!(reader.next_u8().unwrap(), 0xC3);
        assert_eq!(reader.next_bit(), Err(UnexpectedEndOfInput));
    }

    #[test]
    fn little_endian_reads_lsb_first() {
        // Nine bit code 0x101 followed by seven bits of 0x7F.
        let data = [0x01, 0xFF];
        let mut reader = LittleEndianReader::new(&data);
        assert_eq!(reader.next_bits(9).unwrap(), 0x101);
        assert_eq!(reader.next_bits(7).unwrap(), 0x7F);
        assert_eq!(reader.next_bits(1), Err(UnexpectedEndOfInput));
    }
}
