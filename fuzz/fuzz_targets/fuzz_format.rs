#![no_main]

use gep_utils::utils::format::{bounded_format, hex_dump, printable_dump};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks the budget
    let max_len = data[0] as usize;
    let body = &data[1..];

    assert!(hex_dump(body, max_len).len() <= max_len);
    assert!(printable_dump(body, max_len).len() <= max_len);

    let text = String::from_utf8_lossy(body);
    assert!(bounded_format(max_len, format_args!("{text}")).len() <= max_len);
});
