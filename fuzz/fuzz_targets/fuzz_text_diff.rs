#![no_main]
use libfuzzer_sys::fuzz_target;
use respdiff::diff::{Op, TextDiffer};

/// Fuzz the text differ.
///
/// Splits the input in two at the first NUL and checks that the edit script
/// rebuilds both halves, with and without chunk mode.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (a, b) = s.split_once('\0').unwrap_or((s, ""));
    for differ in [TextDiffer::new(), TextDiffer::new().chunk_threshold(4)] {
        let edits = differ.diff(a, b);
        let old: String = edits
            .iter()
            .filter(|e| e.op != Op::Insert)
            .map(|e| e.text.as_str())
            .collect();
        let new: String = edits
            .iter()
            .filter(|e| e.op != Op::Delete)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(old, a);
        assert_eq!(new, b);
    }
});
