//! Helpers for building resource maps and data files in tests.

use std::collections::BTreeMap;

use crate::{
    resources::{
        MapEntry,
        file::{MAP_FILE_NAME, data_file_name, parse_map},
    },
    source::MemSource,
};

/// Builds a `RESOURCE.MAP` and matching `RESOURCE.NNN` files in memory.
#[derive(Debug, Default)]
pub(crate) struct ArchiveBuilder {
    map: Vec<u8>,
    files: BTreeMap<u8, Vec<u8>>,
}

impl ArchiveBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends raw bytes to a data file, returning the offset they start at.
    pub(crate) fn append_raw(&mut self, file: u8, bytes: &[u8]) -> u32 {
        let data = self.files.entry(file).or_default();
        let offset = u32::try_from(data.len()).unwrap();
        data.extend_from_slice(bytes);
        offset
    }

    /// Appends a header and payload to a data file without adding a map
    /// entry for it.
    pub(crate) fn append_resource(
        &mut self,
        key_word: u16,
        file: u8,
        method: u16,
        decompressed_size: u16,
        payload: &[u8],
    ) -> u32 {
        let compressed_size = u16::try_from(payload.len() + 4).unwrap();
        let mut bytes = Vec::with_capacity(payload.len() + 8);
        for word in [key_word, compressed_size, decompressed_size, method] {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes.extend_from_slice(payload);
        self.append_raw(file, &bytes)
    }

    pub(crate) fn add_raw_entry(&mut self, key_word: u16, file: u8, offset: u32) -> &mut Self {
        self.map.extend_from_slice(&key_word.to_le_bytes());
        self.map
            .extend_from_slice(&((u32::from(file) << 26) | offset).to_le_bytes());
        self
    }

    /// Appends a resource to a data file and points a map entry at it.
    pub(crate) fn add_resource(
        &mut self,
        key_word: u16,
        file: u8,
        method: u16,
        decompressed_size: u16,
        payload: &[u8],
    ) -> &mut Self {
        let offset = self.append_resource(key_word, file, method, decompressed_size, payload);
        self.add_raw_entry(key_word, file, offset)
    }

    pub(crate) fn map_bytes(&self) -> Vec<u8> {
        let mut map = self.map.clone();
        map.extend_from_slice(&[0xFF; 6]);
        map
    }

    pub(crate) fn entries(&self) -> Vec<MapEntry> {
        parse_map(&self.map_bytes()).unwrap()
    }

    pub(crate) fn build(&self) -> MemSource {
        let mut source = MemSource::new().with_file(MAP_FILE_NAME, self.map_bytes());
        for (&number, data) in &self.files {
            source.insert(data_file_name("RESOURCE", number), data.clone());
        }
        source
    }
}
