//! Line-oriented rendering of a JSON [`Delta`] and parsing back to fragments.
//!
//! Every rendered line is `<marker><indent><content>`: `+` for content only
//! in B, `-` for content only in A, a space for unchanged context.

use super::json::{ArrayEntry, Delta};
use crate::model::{DiffFragment, FragmentKind};
use serde_json::Value;

const CONTEXT: char = ' ';
const INDENT: &str = "  ";

/// Render `delta` over document `a` as an annotated, indented document.
#[must_use]
pub fn render_ascii(a: &Value, delta: &Delta) -> String {
    let mut renderer = AsciiRenderer::default();
    renderer.write_delta(0, None, a, delta, false);
    renderer.out
}

/// Turn rendered lines into fragments, dropping context lines.
///
/// Exactly one leading marker is stripped from each kept line.
pub fn fragments_from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<DiffFragment> {
    lines
        .into_iter()
        .filter_map(|line| {
            if let Some(rest) = line.strip_prefix(FragmentKind::Insertion.marker()) {
                Some(DiffFragment::insertion(rest))
            } else {
                line.strip_prefix(FragmentKind::Deletion.marker())
                    .map(DiffFragment::deletion)
            }
        })
        .collect()
}

#[derive(Default)]
struct AsciiRenderer {
    out: String,
}

impl AsciiRenderer {
    fn line(&mut self, marker: char, depth: usize, content: &str) {
        self.out.push(marker);
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(content);
        self.out.push('\n');
    }

    fn write_value(
        &mut self,
        marker: char,
        depth: usize,
        key: Option<&str>,
        value: &Value,
        comma: bool,
    ) {
        let label = label(key);
        let comma = if comma { "," } else { "" };
        match value {
            Value::Object(map) if !map.is_empty() => {
                self.line(marker, depth, &format!("{label}{{"));
                let last = map.len() - 1;
                for (i, (k, v)) in map.iter().enumerate() {
                    self.write_value(marker, depth + 1, Some(k), v, i < last);
                }
                self.line(marker, depth, &format!("}}{comma}"));
            }
            Value::Array(items) if !items.is_empty() => {
                self.line(marker, depth, &format!("{label}["));
                let last = items.len() - 1;
                for (i, v) in items.iter().enumerate() {
                    self.write_value(marker, depth + 1, None, v, i < last);
                }
                self.line(marker, depth, &format!("]{comma}"));
            }
            scalar => {
                self.line(marker, depth, &format!("{label}{}{comma}", scalar_text(scalar)));
            }
        }
    }

    fn write_delta(
        &mut self,
        depth: usize,
        key: Option<&str>,
        base: &Value,
        delta: &Delta,
        comma: bool,
    ) {
        match (delta, base) {
            (Delta::Added(value), _) => {
                self.write_value(FragmentKind::Insertion.marker(), depth, key, value, comma);
            }
            (Delta::Deleted(value), _) => {
                self.write_value(FragmentKind::Deletion.marker(), depth, key, value, comma);
            }
            (Delta::Modified { old, new }, _) => {
                self.write_value(FragmentKind::Deletion.marker(), depth, key, old, comma);
                self.write_value(FragmentKind::Insertion.marker(), depth, key, new, comma);
            }
            (Delta::Object(object), Value::Object(map)) => {
                let added: Vec<(&String, &Delta)> = object
                    .changes
                    .iter()
                    .filter(|(k, _)| !map.contains_key(k.as_str()))
                    .collect();
                let total = map.len() + added.len();
                let comma_at = |i: usize| i + 1 < total;

                self.line(CONTEXT, depth, &format!("{}{{", label(key)));
                for (i, (k, v)) in map.iter().enumerate() {
                    match object.changes.get(k) {
                        Some(change) => self.write_delta(depth + 1, Some(k), v, change, comma_at(i)),
                        None => self.write_value(CONTEXT, depth + 1, Some(k), v, comma_at(i)),
                    }
                }
                for (j, (k, change)) in added.into_iter().enumerate() {
                    self.write_delta(depth + 1, Some(k), &Value::Null, change, comma_at(map.len() + j));
                }
                self.line(CONTEXT, depth, if comma { "}," } else { "}" });
            }
            (Delta::Array(array), Value::Array(items)) => {
                let total = array.entries.len();
                self.line(CONTEXT, depth, &format!("{}[", label(key)));
                let mut old_index = 0;
                for (i, entry) in array.entries.iter().enumerate() {
                    let comma = i + 1 < total;
                    match entry {
                        ArrayEntry::Unchanged(value) => {
                            self.write_value(CONTEXT, depth + 1, None, value, comma);
                            old_index += 1;
                        }
                        ArrayEntry::Deleted(value) => {
                            self.write_value(FragmentKind::Deletion.marker(), depth + 1, None, value, comma);
                            old_index += 1;
                        }
                        ArrayEntry::Added(value) => {
                            self.write_value(FragmentKind::Insertion.marker(), depth + 1, None, value, comma);
                        }
                        ArrayEntry::Changed(change) => {
                            let old = items.get(old_index).unwrap_or(&Value::Null);
                            self.write_delta(depth + 1, None, old, change, comma);
                            old_index += 1;
                        }
                    }
                }
                self.line(CONTEXT, depth, if comma { "]," } else { "]" });
            }
            // A container delta always comes with a base of the same shape
            // when produced by `diff_values`; anything else is shown as-is.
            (_, other) => self.write_value(CONTEXT, depth, key, other, comma),
        }
    }
}

fn label(key: Option<&str>) -> String {
    key.map(|k| format!("{}: ", scalar_text(&Value::String(k.to_string()))))
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::json::diff_values;
    use serde_json::json;

    fn render(a: &Value, b: &Value) -> String {
        render_ascii(a, &diff_values(a, b).expect("documents differ"))
    }

    #[test]
    fn test_render_scalar_change() {
        let out = render(&json!({"a": 1, "b": "x"}), &json!({"a": 2, "b": "x"}));
        assert_eq!(out, " {\n-  \"a\": 1,\n+  \"a\": 2,\n   \"b\": \"x\"\n }\n");
    }

    #[test]
    fn test_render_added_object_expands() {
        let out = render(&json!({}), &json!({"n": {"x": [1]}}));
        assert_eq!(
            out,
            " {\n+  \"n\": {\n+    \"x\": [\n+      1\n+    ]\n+  }\n }\n"
        );
    }

    #[test]
    fn test_render_array_entries() {
        let out = render(&json!({"l": [1, 2]}), &json!({"l": [1, 3]}));
        assert_eq!(
            out,
            " {\n   \"l\": [\n     1,\n-    2,\n+    3\n   ]\n }\n"
        );
    }

    #[test]
    fn test_render_top_level_scalar() {
        assert_eq!(render(&json!(1), &json!("1")), "-1\n+\"1\"\n");
    }

    #[test]
    fn test_fragments_from_lines_strips_one_marker() {
        let fragments = fragments_from_lines([" {", "--1", "++2", "plain", "-", " }"]);
        assert_eq!(
            fragments,
            vec![
                DiffFragment::deletion("-1"),
                DiffFragment::insertion("+2"),
                DiffFragment::deletion(""),
            ]
        );
    }

    #[test]
    fn test_nested_fragment_order_follows_a() {
        let a = json!({"z": 1, "m": {"q": true}, "a": 0});
        let b = json!({"a": 1, "m": {"q": false}, "z": 2});
        let fragments = fragments_from_lines(render(&a, &b).lines());
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "  \"z\": 1,",
                "  \"z\": 2,",
                "    \"q\": true",
                "    \"q\": false",
                "  \"a\": 0",
                "  \"a\": 1",
            ]
        );
    }
}
