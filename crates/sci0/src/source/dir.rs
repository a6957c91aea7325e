use std::{
    io,
    path::{Path, PathBuf},
};

use bytes::Bytes;

use super::{ByteSource, SourceError};

/// Reads files out of a game directory.
///
/// SCI games were shipped on case-insensitive file systems, so if the exact
/// name is missing the lowercase spelling is tried as well.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str, file_name: &str) -> Result<Option<Bytes>, SourceError> {
        match std::fs::read(self.root.join(file_name)) {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}

impl ByteSource for DirSource {
    fn get(&self, name: &str) -> Result<Bytes, SourceError> {
        if let Some(data) = self.read(name, name)? {
            return Ok(data);
        }
        let lower = name.to_ascii_lowercase();
        let found = if lower == name {
            None
        } else {
            self.read(name, &lower)?
        };
        found.ok_or_else(|| SourceError::NotFound {
            name: name.to_string(),
        })
    }
}
