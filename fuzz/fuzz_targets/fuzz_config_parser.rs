#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use recipebook_core::config::parse_config;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        let _ = parse_config(yaml, Path::new("recipebook.yaml"));
    }
});
