use std::fmt::Display;

use bytes::Bytes;

use super::{ConversionError, LoadError, MapEntry, ResourceHeader, ResourceKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    Uncompressed,
    Lzw,
    Huffman,
}

impl TryFrom<u16> for CompressionMethod {
    type Error = ConversionError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CompressionMethod::Uncompressed),
            1 => Ok(CompressionMethod::Lzw),
            2 => Ok(CompressionMethod::Huffman),
            _ => Err(ConversionError(format!(
                "Unknown compression method: {value}"
            ))),
        }
    }
}

impl Display for CompressionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CompressionMethod::Uncompressed => "none",
            CompressionMethod::Lzw => "lzw",
            CompressionMethod::Huffman => "huffman",
        })
    }
}

/// The outcome of loading one map entry: where it lives, what its header
/// said, and either the decoded bytes or the reason they are missing.
#[derive(Debug)]
pub struct ResourceRecord {
    entry: MapEntry,
    file_name: String,
    header: Option<ResourceHeader>,
    data: Result<Bytes, LoadError>,
}

impl ResourceRecord {
    pub(crate) fn new(
        entry: MapEntry,
        file_name: String,
        header: Option<ResourceHeader>,
        data: Result<Bytes, LoadError>,
    ) -> Self {
        ResourceRecord {
            entry,
            file_name,
            header,
            data,
        }
    }

    #[must_use]
    pub fn key(&self) -> ResourceKey {
        self.entry.key()
    }

    #[must_use]
    pub fn entry(&self) -> &MapEntry {
        &self.entry
    }

    #[must_use]
    pub fn file_number(&self) -> u8 {
        self.entry.file_number()
    }

    /// The name of the data file the resource was read from.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.entry.offset()
    }

    /// The header read from the data file, if loading got that far.
    #[must_use]
    pub fn header(&self) -> Option<&ResourceHeader> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn method(&self) -> Option<CompressionMethod> {
        self.header
            .and_then(|header| CompressionMethod::try_from(header.method()).ok())
    }

    #[must_use]
    pub fn compressed_size(&self) -> Option<u16> {
        self.header.map(|header| header.compressed_size())
    }

    #[must_use]
    pub fn decompressed_size(&self) -> Option<u16> {
        self.header.map(|header| header.decompressed_size())
    }

    pub fn data(&self) -> Result<&Bytes, &LoadError> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        self.data.as_ref().err()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.data.is_ok()
    }
}

impl Display for ResourceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = format!(
            "{} ${:08x}",
            self.file_name.to_ascii_lowercase(),
            self.offset()
        );
        match &self.data {
            Ok(data) => {
                write!(f, "{} ({} bytes) @ {location}", self.key(), data.len())?;
                if let Some(method) = self.method() {
                    write!(f, " [{method}]")?;
                }
                Ok(())
            }
            Err(e) => write!(f, "{} @ {location}: {} ({e})", self.key(), e.kind()),
        }
    }
}
