#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use recipebook_core::document::RecipeDocument;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        // Parsing must never panic; a parsed recipe must reparse from its
        // own serialized source.
        if let Ok(doc) = RecipeDocument::parse(Path::new("fuzz.md"), raw) {
            let source = doc.to_source();
            let reparsed = RecipeDocument::parse(Path::new("fuzz.md"), &source)
                .unwrap_or_else(|e| panic!("serialized recipe failed to reparse: {e}\n{source}"));
            assert_eq!(reparsed.front_matter, doc.front_matter);
            assert_eq!(reparsed.body, doc.body);
        }
    }
});
