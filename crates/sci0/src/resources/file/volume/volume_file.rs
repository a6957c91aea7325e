use bytes::Bytes;

use crate::{
    resources::{
        ResourceRecord,
        file::{DEFAULT_DATA_STEM, data_file_name, map::MapEntry},
    },
    source::ByteSource,
    utils::mem_reader::{MemReader, Parse as _},
};

use super::{LoadError, ResourceHeader, contents::decode_contents};

/// Resolves map entries against the data files of a [`ByteSource`].
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    data_stem: String,
}

impl Default for ResourceLoader {
    fn default() -> Self {
        ResourceLoader {
            data_stem: DEFAULT_DATA_STEM.to_string(),
        }
    }
}

impl ResourceLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `{stem}.NNN` as the data file names instead of `RESOURCE.NNN`.
    #[must_use]
    pub fn with_data_stem(mut self, stem: impl Into<String>) -> Self {
        self.data_stem = stem.into();
        self
    }

    #[must_use]
    pub fn data_file_name(&self, file_number: u8) -> String {
        data_file_name(&self.data_stem, file_number)
    }

    /// Loads a single entry. Any failure is recorded in the returned record
    /// rather than returned.
    pub fn load<S: ByteSource + ?Sized>(&self, entry: &MapEntry, source: &S) -> ResourceRecord {
        let file_name = self.data_file_name(entry.file_number());
        let file = match source.get(&file_name) {
            Ok(file) => file,
            Err(source) => {
                let err = LoadError::FileUnavailable {
                    file_name: file_name.clone(),
                    source,
                };
                return ResourceRecord::new(*entry, file_name, None, Err(err));
            }
        };
        let (header, data) = match read_header(&file, entry.offset()) {
            Ok(header) => (Some(header), read_contents(&file, entry, &header)),
            Err(err) => (None, Err(err)),
        };
        ResourceRecord::new(*entry, file_name, header, data)
    }
}

fn read_header(file: &Bytes, offset: u32) -> Result<ResourceHeader, LoadError> {
    let truncated = || LoadError::TruncatedHeader {
        offset,
        available: file.len().saturating_sub(offset as usize),
    };
    let start = offset as usize;
    if file.len() < start.saturating_add(ResourceHeader::SIZE) {
        return Err(truncated());
    }
    let mut reader = MemReader::new(&file[start..]);
    ResourceHeader::parse(&mut reader).map_err(|_| truncated())
}

fn read_contents(
    file: &Bytes,
    entry: &MapEntry,
    header: &ResourceHeader,
) -> Result<Bytes, LoadError> {
    if header.key_word() != entry.key().to_packed() {
        return Err(LoadError::KeyMismatch {
            expected: entry.key(),
            found: header.key_word(),
        });
    }
    let payload_len = header
        .payload_len()
        .ok_or(LoadError::InvalidCompressedSize {
            size: header.compressed_size(),
        })?;
    let payload_start = entry.offset() as usize + ResourceHeader::SIZE;
    let available = file.len() - payload_start;
    if available < payload_len {
        return Err(LoadError::TruncatedPayload {
            required: payload_len,
            available,
        });
    }
    decode_contents(header, file.slice(payload_start..payload_start + payload_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resources::{CompressionMethod, ErrorKind, ResourceKey, ResourceType},
        source::MemSource,
        utils::testing::ArchiveBuilder,
    };

    fn view(num: u16) -> ResourceKey {
        ResourceKey::new(ResourceType::View, num)
    }

    #[test]
    fn test_read_data_file() {
        let mut builder = ArchiveBuilder::new();
        builder.add_resource(0x0864, 1, 0, 4, &[0xFA, 0xDE, 0xDF, 0xAE]);
        // Trailing bytes after the payload are not part of the resource.
        builder.append_raw(1, &[0xDE, 0xAD, 0xBE, 0xEF]);
        let source = builder.build();
        let entry = builder.entries()[0];

        let record = ResourceLoader::new().load(&entry, &source);
        assert_eq!(record.data().unwrap().as_ref(), &[0xFA, 0xDE, 0xDF, 0xAE]);
        assert_eq!(record.method(), Some(CompressionMethod::Uncompressed));
        assert_eq!(record.compressed_size(), Some(8));
        assert_eq!(record.file_name(), "RESOURCE.001");
        assert_eq!(
            record.to_string(),
            "pic.100 (4 bytes) @ resource.001 $00000000 [none]"
        );
    }

    #[test]
    fn missing_file_is_unavailable() {
        let entry = MapEntry::new(view(1), 2, 0);
        let record = ResourceLoader::new().load(&entry, &MemSource::new());
        assert_eq!(record.error().unwrap().kind(), ErrorKind::FileUnavailable);
        assert!(record.header().is_none());
    }

    #[test]
    fn offset_past_end_is_truncated_header() {
        let source = MemSource::new().with_file("RESOURCE.001", vec![0u8; 10]);
        for offset in [3, 10, 1000] {
            let entry = MapEntry::new(view(1), 1, offset);
            let record = ResourceLoader::new().load(&entry, &source);
            assert_eq!(record.error().unwrap().kind(), ErrorKind::TruncatedHeader);
        }
    }

    #[test]
    fn header_key_must_match() {
        let mut builder = ArchiveBuilder::new();
        let offset = builder.append_resource(0x0002, 1, 0, 1, &[7]);
        builder.add_raw_entry(0x0003, 1, offset);
        let source = builder.build();

        let record = ResourceLoader::new().load(&builder.entries()[0], &source);
        assert!(matches!(
            record.error(),
            Some(LoadError::KeyMismatch { found: 0x0002, .. })
        ));
        // The header itself was readable.
        assert!(record.header().is_some());
    }

    #[test]
    fn compressed_size_below_four_is_invalid() {
        let mut builder = ArchiveBuilder::new();
        let offset = builder.append_raw(1, &[0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]);
        builder.add_raw_entry(0x0001, 1, offset);
        let record = ResourceLoader::new().load(&builder.entries()[0], &builder.build());
        assert!(matches!(
            record.error(),
            Some(LoadError::InvalidCompressedSize { size: 2 })
        ));
    }

    #[test]
    fn short_payload_is_truncated() {
        let mut builder = ArchiveBuilder::new();
        // Claims a 10 byte payload, but the file ends after 2.
        let offset = builder.append_raw(1, &[0x01, 0x00, 14, 0x00, 10, 0x00, 0x00, 0x00, 1, 2]);
        builder.add_raw_entry(0x0001, 1, offset);
        let record = ResourceLoader::new().load(&builder.entries()[0], &builder.build());
        assert!(matches!(
            record.error(),
            Some(LoadError::TruncatedPayload {
                required: 10,
                available: 2
            })
        ));
    }

    #[test]
    fn size_mismatch_keeps_no_bytes() {
        let mut builder = ArchiveBuilder::new();
        builder.add_resource(0x0001, 1, 0, 5, &[1, 2, 3, 4]);
        let record = ResourceLoader::new().load(&builder.entries()[0], &builder.build());
        assert_eq!(record.error().unwrap().kind(), ErrorKind::SizeMismatch);
        assert!(record.data().is_err());
        assert_eq!(record.decompressed_size(), Some(5));
    }

    #[test]
    fn custom_data_stem() {
        let source = MemSource::new().with_file(
            "RESSCI.000",
            vec![0x05, 0x00, 5, 0x00, 1, 0x00, 0x00, 0x00, 9],
        );
        let entry = MapEntry::new(view(5), 0, 0);
        let record = ResourceLoader::new()
            .with_data_stem("RESSCI")
            .load(&entry, &source);
        assert_eq!(record.data().unwrap().as_ref(), &[9]);
    }
}
