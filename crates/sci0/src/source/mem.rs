use std::collections::HashMap;

use bytes::Bytes;

use super::{ByteSource, SourceError};

/// A source backed by an in-memory table of files.
#[derive(Debug, Clone, Default)]
pub struct MemSource {
    files: HashMap<String, Bytes>,
}

impl MemSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Bytes>) {
        self.files.insert(name.into(), data.into());
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(name, data);
        self
    }
}

impl ByteSource for MemSource {
    fn get(&self, name: &str) -> Result<Bytes, SourceError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                name: name.to_string(),
            })
    }
}
