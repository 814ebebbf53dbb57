#![no_main]

use gep_utils::core::field::{try_decode_u64, BeField};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Walk arbitrary bytes as a sequence of mixed-width fields; must never panic
    let mut cursor = data;
    while !cursor.is_empty() {
        let before = cursor.len();
        let ok = match cursor[0] % 4 {
            0 => u8::take_be(&mut cursor).is_ok(),
            1 => i16::take_be(&mut cursor).is_ok(),
            2 => u32::take_be(&mut cursor).is_ok(),
            _ => i64::take_be(&mut cursor).is_ok(),
        };
        if !ok {
            assert_eq!(cursor.len(), before);
            break;
        }
        assert!(cursor.len() < before);
    }

    // Re-encoding a decoded field reproduces the input bytes
    if let Ok(v) = try_decode_u64(data) {
        let mut out = [0u8; 8];
        v.write_be(&mut out);
        assert_eq!(&out[..], &data[..8]);
    }
});
