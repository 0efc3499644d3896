#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz HTML parsing and text extraction with a few fixed selectors.
fuzz_target!(|data: &[u8]| {
    let doc = respdiff::HtmlDocument::parse(data);
    for selector in ["title", "h1", "div > p", ".price"] {
        let _ = doc.extract_text(selector);
    }
});
