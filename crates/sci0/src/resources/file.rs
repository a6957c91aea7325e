//! The on-disk files of an SCI0 game: `RESOURCE.MAP` and the numbered
//! `RESOURCE.NNN` data files it points into.

pub mod map;
pub mod volume;

pub use self::{
    map::{MapEntry, MapError, parse_map},
    volume::{LoadError, ResourceLoader},
};

pub const MAP_FILE_NAME: &str = "RESOURCE.MAP";
pub const DEFAULT_DATA_STEM: &str = "RESOURCE";

/// The name of data file `file_number`, e.g. `RESOURCE.001`.
#[must_use]
pub fn data_file_name(stem: &str, file_number: u8) -> String {
    format!("{stem}.{file_number:03}")
}
