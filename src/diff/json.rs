//! Structural diff of JSON documents.
//!
//! [`diff_values`] builds a [`Delta`] tree shaped after document A. Objects
//! record only their changed keys; arrays record a full merged listing so
//! the renderer can show unchanged elements as context.

use super::render::{fragments_from_lines, render_ascii};
use crate::error::{ErrorContext, JsonErrorKind, RespDiffError, Result};
use crate::model::{DiffFragment, Side};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use similar::{capture_diff_slices, Algorithm, DiffOp};

/// Difference between two JSON values.
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    /// Value present only in B
    Added(Value),
    /// Value present only in A
    Deleted(Value),
    /// Scalar change, or a change of type
    Modified { old: Value, new: Value },
    /// Both sides are objects with differing members
    Object(ObjectDelta),
    /// Both sides are arrays with differing elements
    Array(ArrayDelta),
}

/// Changed members of an object, in A's key order followed by B-only keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDelta {
    pub changes: IndexMap<String, Delta>,
}

/// One position in the merged listing of two arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayEntry {
    Unchanged(Value),
    Deleted(Value),
    Added(Value),
    /// Element at the same position changed internally (object or array)
    Changed(Delta),
}

/// Merged element listing of two arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayDelta {
    pub entries: Vec<ArrayEntry>,
}

/// Compute the structural difference from `a` to `b`; `None` when equal.
#[must_use]
pub fn diff_values(a: &Value, b: &Value) -> Option<Delta> {
    match (a, b) {
        (Value::Object(left), Value::Object(right)) => {
            let delta = diff_objects(left, right);
            (!delta.changes.is_empty()).then_some(Delta::Object(delta))
        }
        (Value::Array(left), Value::Array(right)) => {
            let delta = diff_arrays(left, right);
            delta.has_changes().then_some(Delta::Array(delta))
        }
        _ if scalars_equal(a, b) => None,
        _ => Some(Delta::Modified {
            old: a.clone(),
            new: b.clone(),
        }),
    }
}

fn diff_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> ObjectDelta {
    let mut changes = IndexMap::new();
    for (key, old) in left {
        match right.get(key) {
            Some(new) => {
                if let Some(delta) = diff_values(old, new) {
                    changes.insert(key.clone(), delta);
                }
            }
            None => {
                changes.insert(key.clone(), Delta::Deleted(old.clone()));
            }
        }
    }
    for (key, new) in right {
        if !left.contains_key(key) {
            changes.insert(key.clone(), Delta::Added(new.clone()));
        }
    }
    ObjectDelta { changes }
}

/// Numbers compare by numeric value, so `1` and `1.0` are equal.
fn scalars_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_value(x) == number_value(y),
        _ => a == b,
    }
}

fn number_value(n: &Number) -> f64 {
    let value = n.as_f64().unwrap_or(f64::NAN);
    // -0.0 and 0.0 are the same number
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Copy of `value` with every number in its `f64` form.
fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) => Number::from_f64(number_value(n)).map_or(Value::Null, Value::Number),
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize_numbers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Canonical encoding used as the LCS key for array elements.
///
/// Numbers are normalized so keys agree with [`diff_values`] equality.
fn element_key(value: &Value) -> String {
    serde_json::to_string(&normalize_numbers(value)).unwrap_or_default()
}

fn is_container_pair(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_))
    )
}

fn diff_arrays(left: &[Value], right: &[Value]) -> ArrayDelta {
    let left_keys: Vec<String> = left.iter().map(element_key).collect();
    let right_keys: Vec<String> = right.iter().map(element_key).collect();
    let mut entries = Vec::with_capacity(left.len().max(right.len()));

    for op in capture_diff_slices(Algorithm::Myers, &left_keys, &right_keys) {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                entries.extend(
                    left[old_index..old_index + len]
                        .iter()
                        .cloned()
                        .map(ArrayEntry::Unchanged),
                );
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                entries.extend(
                    left[old_index..old_index + old_len]
                        .iter()
                        .cloned()
                        .map(ArrayEntry::Deleted),
                );
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                entries.extend(
                    right[new_index..new_index + new_len]
                        .iter()
                        .cloned()
                        .map(ArrayEntry::Added),
                );
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                let olds = &left[old_index..old_index + old_len];
                let news = &right[new_index..new_index + new_len];
                let pairwise = old_len == new_len
                    && olds.iter().zip(news).all(|(a, b)| is_container_pair(a, b));
                if pairwise {
                    for (old, new) in olds.iter().zip(news) {
                        entries.push(match diff_values(old, new) {
                            Some(delta) => ArrayEntry::Changed(delta),
                            None => ArrayEntry::Unchanged(old.clone()),
                        });
                    }
                } else {
                    entries.extend(olds.iter().cloned().map(ArrayEntry::Deleted));
                    entries.extend(news.iter().cloned().map(ArrayEntry::Added));
                }
            }
        }
    }
    ArrayDelta { entries }
}

impl ArrayDelta {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| !matches!(entry, ArrayEntry::Unchanged(_)))
    }
}

impl Delta {
    /// Apply this delta to `base` (document A), producing document B.
    pub fn apply(&self, base: &Value) -> Result<Value> {
        match self {
            Self::Added(value) | Self::Modified { new: value, .. } => Ok(value.clone()),
            Self::Deleted(_) => Err(mismatch("cannot apply a deletion to a whole document")),
            Self::Object(delta) => {
                let Value::Object(map) = base else {
                    return Err(mismatch("object delta applied to a non-object"));
                };
                let mut out = map.clone();
                for (key, change) in &delta.changes {
                    match change {
                        Self::Deleted(_) => {
                            out.remove(key);
                        }
                        Self::Added(value) => {
                            out.insert(key.clone(), value.clone());
                        }
                        nested => {
                            let old = map
                                .get(key)
                                .ok_or_else(|| mismatch(format!("missing key '{key}'")))?;
                            let value = nested.apply(old).with_context(|| format!("at key '{key}'"))?;
                            out.insert(key.clone(), value);
                        }
                    }
                }
                Ok(Value::Object(out))
            }
            Self::Array(delta) => {
                let Value::Array(items) = base else {
                    return Err(mismatch("array delta applied to a non-array"));
                };
                let mut out = Vec::with_capacity(delta.entries.len());
                let mut old_index = 0;
                for entry in &delta.entries {
                    match entry {
                        ArrayEntry::Unchanged(value) => {
                            out.push(value.clone());
                            old_index += 1;
                        }
                        ArrayEntry::Deleted(_) => old_index += 1,
                        ArrayEntry::Added(value) => out.push(value.clone()),
                        ArrayEntry::Changed(nested) => {
                            let old = items
                                .get(old_index)
                                .ok_or_else(|| mismatch(format!("missing index {old_index}")))?;
                            out.push(
                                nested
                                    .apply(old)
                                    .with_context(|| format!("at index {old_index}"))?,
                            );
                            old_index += 1;
                        }
                    }
                }
                Ok(Value::Array(out))
            }
        }
    }
}

fn mismatch(message: impl Into<String>) -> RespDiffError {
    RespDiffError::json("applying delta", JsonErrorKind::DeltaMismatch(message.into()))
}

/// Parse a response body as JSON.
pub fn parse_body(body: &[u8], side: Side) -> Result<Value> {
    serde_json::from_slice(body).with_context(|| format!("body of side {side}"))
}

/// Diff two JSON bodies and return the changed lines as fragments.
///
/// The delta is rendered against A's shape and the rendering is parsed
/// back: `+` lines become insertions, `-` lines deletions.
pub fn diff_json(body_a: &[u8], body_b: &[u8]) -> Result<Vec<DiffFragment>> {
    let a = parse_body(body_a, Side::A)?;
    let b = parse_body(body_b, Side::B)?;
    let Some(delta) = diff_values(&a, &b) else {
        tracing::debug!("JSON documents are structurally equal");
        return Ok(Vec::new());
    };
    let rendered = render_ascii(&a, &delta);
    Ok(fragments_from_lines(rendered.lines()))
}
