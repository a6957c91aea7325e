#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use sci0::{
    resources::{ArchiveConfig, ResourceArchive},
    source::MemSource,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let (len_bytes, file_data) = data.split_at(2);
    let map_len = usize::from(u16::from_le_bytes([len_bytes[0], len_bytes[1]]));
    if file_data.len() < map_len {
        return;
    }
    let (map_data, volume_data) = file_data.split_at(map_len);

    let source = MemSource::new()
        .with_file("RESOURCE.MAP", Bytes::copy_from_slice(map_data))
        .with_file("RESOURCE.001", Bytes::copy_from_slice(volume_data));
    let config = ArchiveConfig::new().with_parallel(false);
    if let Ok(archive) = ResourceArchive::open(&source, &config) {
        for res in &archive {
            drop(res.record().to_string());
        }
    }
});
