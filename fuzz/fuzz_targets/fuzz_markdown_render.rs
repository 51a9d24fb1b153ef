#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use recipebook_site::render_markdown;

fuzz_target!(|data: &[u8]| {
    if let Ok(markdown) = std::str::from_utf8(data) {
        let rendered = render_markdown(markdown);

        // Every heading gets a distinct anchor
        let mut seen = HashSet::new();
        for heading in &rendered.headings {
            assert!(!heading.id.is_empty(), "empty id for {:?}", heading.text);
            assert!(seen.insert(heading.id.as_str()), "duplicate id {:?}", heading.id);
        }
    }
});
