//! SCI0 resource identifiers, the resource map and data files, and the
//! archive that ties them together.

mod archive;
pub mod file;
mod record;
pub mod types;

use std::{fmt::Display, str::FromStr};

pub use self::{
    archive::{ArchiveConfig, ArchiveError, LoadedResource, ResourceArchive},
    file::{
        LoadError, MapEntry, MapError, ResourceLoader, parse_map,
        volume::{DecompressionError, ResourceHeader},
    },
    record::{CompressionMethod, ResourceRecord},
};

#[derive(Debug, Clone, thiserror::Error)]
#[error("Conversion Error: {0}")]
pub struct ConversionError(String);

/// The category of a map or load failure, independent of its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    MalformedMap,
    FileUnavailable,
    TruncatedHeader,
    TruncatedPayload,
    KeyMismatch,
    InvalidCompressedSize,
    UnsupportedCompression,
    DecompressionFailed,
    SizeMismatch,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::MalformedMap => "malformed map",
            ErrorKind::FileUnavailable => "file unavailable",
            ErrorKind::TruncatedHeader => "truncated header",
            ErrorKind::TruncatedPayload => "truncated payload",
            ErrorKind::KeyMismatch => "key mismatch",
            ErrorKind::InvalidCompressedSize => "invalid compressed size",
            ErrorKind::UnsupportedCompression => "unsupported compression",
            ErrorKind::DecompressionFailed => "decompression failed",
            ErrorKind::SizeMismatch => "size mismatch",
        };
        f.write_str(name)
    }
}

/// The kinds of resources stored in an SCI0 archive, numbered as they are in
/// the top five bits of a resource key.
///
/// Type numbers 10 through 31 have no SCI0 meaning and decode to
/// [`ResourceType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceType {
    View,
    Pic,
    Script,
    Text,
    Sound,
    Memory,
    Vocab,
    Font,
    Cursor,
    Patch,
    /// A type number with no known type.
    Unknown(u8),
}

impl ResourceType {
    /// The highest type number a packed key can hold.
    pub const MAX_NUMBER: u8 = 31;

    /// The known types, in type-number order.
    pub const ALL: [ResourceType; 10] = [
        ResourceType::View,
        ResourceType::Pic,
        ResourceType::Script,
        ResourceType::Text,
        ResourceType::Sound,
        ResourceType::Memory,
        ResourceType::Vocab,
        ResourceType::Font,
        ResourceType::Cursor,
        ResourceType::Patch,
    ];

    /// The lowercase name SCI tools use for this type, e.g. in `view.000`.
    /// Unknown types are all named `unknown`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::View => "view",
            ResourceType::Pic => "pic",
            ResourceType::Script => "script",
            ResourceType::Text => "text",
            ResourceType::Sound => "sound",
            ResourceType::Memory => "memory",
            ResourceType::Vocab => "vocab",
            ResourceType::Font => "font",
            ResourceType::Cursor => "cursor",
            ResourceType::Patch => "patch",
            ResourceType::Unknown(_) => "unknown",
        }
    }

    /// Maps a type number from a packed key. Every number up to
    /// [`Self::MAX_NUMBER`] has a type, known or not.
    fn from_number(number: u8) -> ResourceType {
        ResourceType::ALL
            .get(usize::from(number))
            .copied()
            .unwrap_or(ResourceType::Unknown(number))
    }
}

impl TryFrom<u8> for ResourceType {
    type Error = ConversionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > ResourceType::MAX_NUMBER {
            return Err(ConversionError(format!("Invalid resource type: {value}")));
        }
        Ok(ResourceType::from_number(value))
    }
}

impl From<ResourceType> for u8 {
    fn from(value: ResourceType) -> u8 {
        match value {
            ResourceType::View => 0,
            ResourceType::Pic => 1,
            ResourceType::Script => 2,
            ResourceType::Text => 3,
            ResourceType::Sound => 4,
            ResourceType::Memory => 5,
            ResourceType::Vocab => 6,
            ResourceType::Font => 7,
            ResourceType::Cursor => 8,
            ResourceType::Patch => 9,
            ResourceType::Unknown(number) => number,
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Unknown(number) => write!(f, "unknown{number}"),
            known => f.write_str(known.name()),
        }
    }
}

impl FromStr for ResourceType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let found = match lower.as_str() {
            "picture" => Some(ResourceType::Pic),
            "scr" => Some(ResourceType::Script),
            "txt" => Some(ResourceType::Text),
            "snd" => Some(ResourceType::Sound),
            "voc" | "vocabulary" => Some(ResourceType::Vocab),
            name => ResourceType::ALL.into_iter().find(|ty| ty.name() == name),
        };
        found.ok_or_else(|| ConversionError(format!("Unknown resource type name: {s}")))
    }
}

/// Identifies a resource: its type plus an 11-bit number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    type_id: ResourceType,
    resource_num: u16,
}

impl ResourceKey {
    pub const MAX_NUMBER: u16 = 0x07FF;

    /// Creates a key. Panics if `resource_num` does not fit in 11 bits, or
    /// if `type_id` is an unknown type whose number does not fit in 5.
    #[must_use]
    pub fn new(type_id: ResourceType, resource_num: u16) -> ResourceKey {
        assert!(
            resource_num <= Self::MAX_NUMBER,
            "resource number {resource_num} does not fit in 11 bits"
        );
        assert!(
            u8::from(type_id) <= ResourceType::MAX_NUMBER,
            "resource type {type_id:?} does not fit in 5 bits"
        );
        ResourceKey {
            type_id,
            resource_num,
        }
    }

    /// Decodes a key from its packed form: type in the top five bits, number
    /// in the low eleven.
    #[must_use]
    pub fn from_packed(packed: u16) -> ResourceKey {
        let [_, high] = packed.to_le_bytes();
        ResourceKey {
            type_id: ResourceType::from_number(high >> 3),
            resource_num: packed & Self::MAX_NUMBER,
        }
    }

    #[must_use]
    pub fn to_packed(self) -> u16 {
        (u16::from(u8::from(self.type_id)) << 11) | self.resource_num
    }

    #[must_use]
    pub fn type_id(&self) -> ResourceType {
        self.type_id
    }

    #[must_use]
    pub fn resource_num(&self) -> u16 {
        self.resource_num
    }
}

impl std::fmt::Debug for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}:{}", self.type_id, self.resource_num)
    }
}

impl Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:03}", self.type_id, self.resource_num)
    }
}
