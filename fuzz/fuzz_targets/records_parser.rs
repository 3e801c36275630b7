#![no_main]

use libfuzzer_sys::fuzz_target;
use solve_inlines::records::{parse_benchmarks, parse_inlines};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed records must come back as errors, never panics
        let _ = parse_inlines(input);
        let _ = parse_benchmarks(input);
    }
});
