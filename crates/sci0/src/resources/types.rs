//! Parsers that interpret the decoded bytes of particular resource types.

mod cursor;
mod view;

use crate::{
    resources::{ResourceKey, ResourceType},
    utils::mem_reader::MemReaderError,
};

pub use self::{
    cursor::{CURSOR_SIZE, Cursor, CursorPixel},
    view::{Cel, Loop, View},
};

#[derive(Debug, thiserror::Error)]
pub enum TypeParseError {
    #[error(transparent)]
    Read(#[from] MemReaderError),
    #[error("Cel is {width}x{height}, which exceeds the {limit} pixel limit")]
    CelTooLarge { width: u16, height: u16, limit: usize },
}

#[derive(Debug)]
pub enum TypedResource {
    View(View),
    Cursor(Cursor),
}

/// Interprets the decoded bytes of a resource.
///
/// Returns `None` for resources the parser has nothing to say about.
pub trait TypedParser: Send + Sync {
    fn parse(&self, key: ResourceKey, data: &[u8])
    -> Option<Result<TypedResource, TypeParseError>>;
}

/// Parses SCI0 views and cursors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sci0Parsers;

impl TypedParser for Sci0Parsers {
    fn parse(
        &self,
        key: ResourceKey,
        data: &[u8],
    ) -> Option<Result<TypedResource, TypeParseError>> {
        match key.type_id() {
            ResourceType::View => Some(View::from_bytes(data).map(TypedResource::View)),
            ResourceType::Cursor => Some(Cursor::from_bytes(data).map(TypedResource::Cursor)),
            _ => None,
        }
    }
}
