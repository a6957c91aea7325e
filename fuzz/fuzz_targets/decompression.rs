#![no_main]

use libfuzzer_sys::fuzz_target;
use sci0::utils::compression::{huffman::huffman_decode, lzw::decompress_lzw};

fuzz_target!(|input: (u16, &[u8])| {
    let (expected_len, payload) = input;
    let expected_len = usize::from(expected_len);
    drop(huffman_decode(payload, expected_len));
    drop(decompress_lzw(payload, expected_len));
});
