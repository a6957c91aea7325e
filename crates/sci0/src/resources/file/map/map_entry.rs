use crate::{
    resources::ResourceKey,
    utils::mem_reader::{self, MemReader, Parse},
};

const OFFSET_BITS: u32 = 26;
const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;

/// One entry of the resource map: where a resource lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEntry {
    key: ResourceKey,
    file_number: u8,
    offset: u32,
}

impl MapEntry {
    pub const SIZE: usize = 6;

    /// Panics if `file_number` does not fit in 6 bits or `offset` in 26.
    #[must_use]
    pub fn new(key: ResourceKey, file_number: u8, offset: u32) -> Self {
        assert!(file_number < 64, "file number {file_number} out of range");
        assert!(offset <= OFFSET_MASK, "offset {offset:#x} out of range");
        MapEntry {
            key,
            file_number,
            offset,
        }
    }

    #[must_use]
    pub fn key(&self) -> ResourceKey {
        self.key
    }

    #[must_use]
    pub fn file_number(&self) -> u8 {
        self.file_number
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The packed location word as stored in the map.
    #[must_use]
    pub fn location_word(&self) -> u32 {
        (u32::from(self.file_number) << OFFSET_BITS) | self.offset
    }
}

impl Parse for MapEntry {
    fn parse(reader: &mut MemReader<'_>) -> mem_reader::Result<Self> {
        let key_word = reader.read_u16_le()?;
        let location = reader.read_u32_le()?;
        // The file number is the top six bits of the location's last byte.
        let [_, _, _, high] = location.to_le_bytes();
        Ok(MapEntry {
            key: ResourceKey::from_packed(key_word),
            file_number: high >> 2,
            offset: location & OFFSET_MASK,
        })
    }
}

#[cfg(test)]
mod tests {
    use datalit::datalit;

    use super::*;
    use crate::resources::ResourceType;

    #[test]
    fn test_parse() {
        let data = datalit!(
            0x0805u16_le,     // Pic 5
            0x0C001234u32_le, // file 3, offset 0x1234
        );
        let mut reader = MemReader::new(&data);
        let entry = MapEntry::parse(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(entry.key(), ResourceKey::new(ResourceType::Pic, 5));
        assert_eq!(entry.file_number(), 3);
        assert_eq!(entry.offset(), 0x1234);
        assert_eq!(entry.location_word(), 0x0C00_1234);
    }

    #[test]
    fn unknown_type_is_kept() {
        let data = datalit!(
            0xF805u16_le,     // type 31, number 5
            0xFC000010u32_le, // file 63, offset 0x10
        );
        let entry = MapEntry::parse(&mut MemReader::new(&data)).unwrap();
        assert_eq!(entry.key().type_id(), ResourceType::Unknown(31));
        assert_eq!(entry.key().resource_num(), 5);
        assert_eq!(entry.file_number(), 63);
        assert_eq!(entry.offset(), 0x10);
    }

    #[test]
    fn short_entry_is_an_error() {
        let data = datalit!(0x0805u16_le, 0x0Cu8);
        assert!(matches!(
            MapEntry::parse(&mut MemReader::new(&data)),
            Err(mem_reader::MemReaderError::NotEnoughData { offset: 2, .. })
        ));
    }
}
