//! Parsing of the `RESOURCE.MAP` index.
//!
//! The map is a flat list of 6-byte entries followed by six `0xFF` bytes.

mod map_entry;

use std::collections::HashSet;

use crate::{
    resources::{ErrorKind, ResourceType},
    utils::mem_reader::{MemReader, MemReaderError, Parse as _},
};

pub use self::map_entry::MapEntry;

const TERMINATOR: [u8; MapEntry::SIZE] = [0xFF; MapEntry::SIZE];

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Resource map is {len} bytes, which is not a positive multiple of 6")]
    InvalidLength { len: usize },
    #[error("Resource map does not end with the 0xFF terminator entry")]
    MissingTerminator,
    #[error("Resource map entry {index} is invalid: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: MemReaderError,
    },
}

impl MapError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedMap
    }
}

/// Parses a resource map into its entries, in file order.
///
/// If several entries share a key, only the first is kept. Entries with an
/// unknown type number are kept as well; only the framing of the map can make
/// it fail.
pub fn parse_map(data: &[u8]) -> Result<Vec<MapEntry>, MapError> {
    if data.is_empty() || data.len() % MapEntry::SIZE != 0 {
        return Err(MapError::InvalidLength { len: data.len() });
    }
    let (body, terminator) = data.split_at(data.len() - MapEntry::SIZE);
    if terminator != TERMINATOR {
        return Err(MapError::MissingTerminator);
    }

    let entry_count = body.len() / MapEntry::SIZE;
    let mut reader = MemReader::new(body);
    let mut seen = HashSet::with_capacity(entry_count);
    let mut entries = Vec::with_capacity(entry_count);
    for index in 0..entry_count {
        let entry =
            MapEntry::parse(&mut reader).map_err(|source| MapError::InvalidEntry { index, source })?;
        if seen.insert(entry.key()) {
            if let ResourceType::Unknown(number) = entry.key().type_id() {
                log::debug!("Map entry {index} has unknown resource type {number}");
            }
            entries.push(entry);
        } else {
            log::debug!(
                "Ignoring duplicate map entry {index} for {} (file {}, offset {:#x})",
                entry.key(),
                entry.file_number(),
                entry.offset()
            );
        }
    }
    Ok(entries)
}
