use std::collections::HashMap;

use rayon::prelude::*;

use crate::source::{ByteSource, SourceError};

use super::{
    ErrorKind, MapEntry, MapError, ResourceKey, ResourceLoader, ResourceRecord, ResourceType,
    file::{DEFAULT_DATA_STEM, MAP_FILE_NAME, parse_map},
    types::{Cursor, Sci0Parsers, TypeParseError, TypedParser, TypedResource, View},
};

/// Settings for opening a [`ResourceArchive`].
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    map_file: String,
    data_stem: String,
    parse_types: bool,
    parallel: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        ArchiveConfig {
            map_file: MAP_FILE_NAME.to_string(),
            data_stem: DEFAULT_DATA_STEM.to_string(),
            parse_types: true,
            parallel: true,
        }
    }
}

impl ArchiveConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_map_file(mut self, name: impl Into<String>) -> Self {
        self.map_file = name.into();
        self
    }

    #[must_use]
    pub fn with_data_stem(mut self, stem: impl Into<String>) -> Self {
        self.data_stem = stem.into();
        self
    }

    /// Whether to run the typed parsers over each loaded resource.
    #[must_use]
    pub fn with_typed_parsing(mut self, parse_types: bool) -> Self {
        self.parse_types = parse_types;
        self
    }

    /// Whether to load entries on the rayon thread pool.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn map_file(&self) -> &str {
        &self.map_file
    }

    #[must_use]
    pub fn data_stem(&self) -> &str {
        &self.data_stem
    }

    #[must_use]
    pub fn parse_types(&self) -> bool {
        self.parse_types
    }

    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Resource map {name} is unavailable")]
    MapUnavailable {
        name: String,
        #[source]
        source: SourceError,
    },
    #[error(transparent)]
    Map(#[from] MapError),
}

impl ArchiveError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArchiveError::MapUnavailable { .. } => ErrorKind::FileUnavailable,
            ArchiveError::Map(err) => err.kind(),
        }
    }
}

/// A loaded record together with the typed parser's verdict on it, if any.
#[derive(Debug)]
pub struct LoadedResource {
    record: ResourceRecord,
    typed: Option<Result<TypedResource, TypeParseError>>,
}

impl LoadedResource {
    #[must_use]
    pub fn record(&self) -> &ResourceRecord {
        &self.record
    }

    #[must_use]
    pub fn key(&self) -> ResourceKey {
        self.record.key()
    }

    #[must_use]
    pub fn typed(&self) -> Option<&Result<TypedResource, TypeParseError>> {
        self.typed.as_ref()
    }

    #[must_use]
    pub fn into_record(self) -> ResourceRecord {
        self.record
    }
}

/// Every resource named by a game's resource map, loaded and decoded.
#[derive(Debug)]
pub struct ResourceArchive {
    resources: Vec<LoadedResource>,
    index: HashMap<ResourceKey, usize>,
}

impl ResourceArchive {
    /// Reads the resource map from `source` and loads every entry in it,
    /// parsing views and cursors.
    pub fn open<S: ByteSource + ?Sized>(
        source: &S,
        config: &ArchiveConfig,
    ) -> Result<Self, ArchiveError> {
        let map = source
            .get(config.map_file())
            .map_err(|source| ArchiveError::MapUnavailable {
                name: config.map_file().to_string(),
                source,
            })?;
        Self::from_map_bytes(&map, source, config, &Sci0Parsers)
    }

    /// Loads every entry of an already-fetched resource map.
    pub fn from_map_bytes<S: ByteSource + ?Sized>(
        map: &[u8],
        source: &S,
        config: &ArchiveConfig,
        parser: &dyn TypedParser,
    ) -> Result<Self, ArchiveError> {
        let entries = parse_map(map)?;
        log::debug!("Resource map lists {} resources", entries.len());
        let loader = ResourceLoader::new().with_data_stem(config.data_stem());

        let load_one = |entry: &MapEntry| {
            let record = loader.load(entry, source);
            if let Some(err) = record.error() {
                log::warn!("Failed to load {record}");
                log::debug!("{}: {:?}", record.key(), err);
            }
            let typed = if config.parse_types() {
                record
                    .data()
                    .ok()
                    .and_then(|data| parser.parse(record.key(), data))
            } else {
                None
            };
            if let Some(Err(err)) = &typed {
                log::warn!("Failed to parse {}: {err}", record.key());
            }
            LoadedResource { record, typed }
        };

        let resources: Vec<LoadedResource> = if config.parallel() {
            entries.par_iter().map(load_one).collect()
        } else {
            entries.iter().map(load_one).collect()
        };

        let index = resources
            .iter()
            .enumerate()
            .map(|(i, res)| (res.key(), i))
            .collect();
        let archive = ResourceArchive { resources, index };
        log::info!(
            "Loaded {} of {} resources ({} failed)",
            archive.len() - archive.failures().count(),
            archive.len(),
            archive.failures().count()
        );
        Ok(archive)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// All resources, in map order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedResource> {
        self.resources.iter()
    }

    #[must_use]
    pub fn get(&self, key: ResourceKey) -> Option<&LoadedResource> {
        self.index.get(&key).map(|&i| &self.resources[i])
    }

    pub fn resources_of_type(
        &self,
        type_id: ResourceType,
    ) -> impl Iterator<Item = &LoadedResource> {
        self.iter().filter(move |res| res.key().type_id() == type_id)
    }

    /// Records that failed to load.
    pub fn failures(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.iter()
            .map(LoadedResource::record)
            .filter(|record| !record.is_ok())
    }

    /// Successfully parsed views.
    pub fn views(&self) -> impl Iterator<Item = (ResourceKey, &View)> {
        self.iter().filter_map(|res| match res.typed() {
            Some(Ok(TypedResource::View(view))) => Some((res.key(), view)),
            _ => None,
        })
    }

    /// Successfully parsed cursors.
    pub fn cursors(&self) -> impl Iterator<Item = (ResourceKey, &Cursor)> {
        self.iter().filter_map(|res| match res.typed() {
            Some(Ok(TypedResource::Cursor(cursor))) => Some((res.key(), cursor)),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a ResourceArchive {
    type Item = &'a LoadedResource;
    type IntoIter = std::slice::Iter<'a, LoadedResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
