//! Property-based tests for the diff engines.
//!
//! The text differ must produce an edit script that rebuilds both inputs,
//! and the JSON differ must produce a delta that turns A into B.

use proptest::prelude::*;
use respdiff::diff::{diff_json, diff_values, Op, TextDiffer};
use respdiff::{diff_text, HtmlDocument};
use serde_json::{Map, Value};

fn rebuild(edits: &[respdiff::diff::Edit], keep: Op) -> String {
    edits
        .iter()
        .filter(|e| e.op == Op::Equal || e.op == keep)
        .map(|e| e.text.as_str())
        .collect()
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::from(i64::from(n))),
        "[a-z ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]{1,2}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn text_diff_of_equal_inputs_is_empty(s in "\\PC{0,200}") {
        prop_assert!(diff_text(&s, &s).is_empty());
    }

    #[test]
    fn text_edit_script_rebuilds_both_sides(a in "\\PC{0,120}", b in "\\PC{0,120}") {
        let edits = TextDiffer::new().diff(&a, &b);
        prop_assert_eq!(rebuild(&edits, Op::Delete), a);
        prop_assert_eq!(rebuild(&edits, Op::Insert), b);
    }

    #[test]
    fn chunked_edit_script_rebuilds_both_sides(
        a in prop::collection::vec("[a-c]{0,6}", 0..30),
        b in prop::collection::vec("[a-c]{0,6}", 0..30),
    ) {
        let a = a.join("\n");
        let b = b.join("\n");
        let edits = TextDiffer::new().chunk_threshold(8).diff(&a, &b);
        prop_assert_eq!(rebuild(&edits, Op::Delete), a);
        prop_assert_eq!(rebuild(&edits, Op::Insert), b);
    }

    #[test]
    fn text_fragments_never_empty(a in "\\PC{0,60}", b in "\\PC{0,60}") {
        for fragment in diff_text(&a, &b) {
            prop_assert!(!fragment.text.is_empty());
        }
    }

    #[test]
    fn json_diff_of_equal_documents_is_empty(v in json_value()) {
        let body = serde_json::to_vec(&v).unwrap();
        prop_assert!(diff_json(&body, &body).unwrap().is_empty());
    }

    #[test]
    fn json_delta_turns_a_into_b(a in json_value(), b in json_value()) {
        match diff_values(&a, &b) {
            None => prop_assert_eq!(a, b),
            Some(delta) => prop_assert_eq!(delta.apply(&a).unwrap(), b),
        }
    }

    #[test]
    fn json_diff_doesnt_panic_on_arbitrary_bytes(
        a in prop::collection::vec(any::<u8>(), 0..64),
        b in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let _ = diff_json(&a, &b);
    }

    #[test]
    fn html_extraction_doesnt_panic(body in "\\PC{0,300}", tag in "[a-z]{1,6}") {
        let doc = HtmlDocument::parse(body.as_bytes());
        prop_assert!(doc.extract_text(&tag).is_ok());
    }
}
