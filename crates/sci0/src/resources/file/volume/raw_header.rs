use crate::utils::mem_reader::{self, MemReader, Parse};

/// The header in front of every resource in a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceHeader {
    key_word: u16,
    compressed_size: u16,
    decompressed_size: u16,
    method: u16,
}

impl ResourceHeader {
    pub const SIZE: usize = 8;

    /// The packed key of the resource, which should match the map entry.
    #[must_use]
    pub fn key_word(&self) -> u16 {
        self.key_word
    }

    /// The stored compressed size. This counts the decompressed-size and
    /// method words as well as the payload.
    #[must_use]
    pub fn compressed_size(&self) -> u16 {
        self.compressed_size
    }

    #[must_use]
    pub fn decompressed_size(&self) -> u16 {
        self.decompressed_size
    }

    #[must_use]
    pub fn method(&self) -> u16 {
        self.method
    }

    /// The number of payload bytes after the header, if the stored size is
    /// large enough to make sense.
    #[must_use]
    pub fn payload_len(&self) -> Option<usize> {
        self.compressed_size.checked_sub(4).map(usize::from)
    }
}

impl Parse for ResourceHeader {
    fn parse(reader: &mut MemReader<'_>) -> mem_reader::Result<Self> {
        let key_word = reader.read_u16_le()?;
        let compressed_size = reader.read_u16_le()?;
        let decompressed_size = reader.read_u16_le()?;
        let method = reader.read_u16_le()?;
        Ok(ResourceHeader {
            key_word,
            compressed_size,
            decompressed_size,
            method,
        })
    }
}
