#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the JSON differ with arbitrary bodies split at the first NUL.
fuzz_target!(|data: &[u8]| {
    let split = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let (a, b) = data.split_at(split);
    let b = b.get(1..).unwrap_or_default();
    let _ = respdiff::diff::diff_json(a, b);
    if let Ok(fragments) = respdiff::diff::diff_json(a, a) {
        assert!(fragments.is_empty());
    }
});
