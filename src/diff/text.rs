//! Text diff engine.
//!
//! Produces a minimal edit script between two strings using Myers' algorithm
//! (via `similar`), then post-processes it in the diff-match-patch manner:
//! merge pass, semantic cleanup, and overlap extraction. Long inputs are
//! first diffed chunk-wise (lines, or words for single-line text) and only
//! the replaced regions are re-diffed character by character.

use super::chunk::{split_chunks, ChunkInterner, ChunkMode};
use super::cleanup::{cleanup_merge, cleanup_semantic, common_prefix, common_suffix};
use crate::model::DiffFragment;
use similar::{capture_diff_slices, Algorithm, DiffOp};

/// Inputs longer than this (in chars, both sides) are diffed chunk-wise first.
pub const DEFAULT_CHUNK_THRESHOLD: usize = 100;

/// Kind of a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Equal,
    Insert,
    Delete,
}

/// A run of text sharing one [`Op`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub op: Op,
    pub text: String,
}

impl Edit {
    pub fn new(op: Op, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Op::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Op::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Op::Delete, text)
    }
}

/// Stateless text differ. Cheap to construct; holds only settings.
#[derive(Debug, Clone, Copy)]
pub struct TextDiffer {
    chunk_threshold: usize,
    semantic_cleanup: bool,
}

impl Default for TextDiffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDiffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            semantic_cleanup: true,
        }
    }

    /// Set the length above which chunk-wise diffing kicks in.
    #[must_use]
    pub const fn chunk_threshold(mut self, chars: usize) -> Self {
        self.chunk_threshold = chars;
        self
    }

    /// Enable or disable the semantic cleanup pass.
    #[must_use]
    pub const fn semantic_cleanup(mut self, enabled: bool) -> Self {
        self.semantic_cleanup = enabled;
        self
    }

    /// Full edit script from `a` to `b`, equalities included.
    #[must_use]
    pub fn diff(&self, a: &str, b: &str) -> Vec<Edit> {
        let mut edits = self.diff_main(a, b, true);
        if self.semantic_cleanup {
            cleanup_semantic(&mut edits);
        }
        edits
    }

    /// Insertions and deletions from `a` to `b`, in document order.
    #[must_use]
    pub fn fragments(&self, a: &str, b: &str) -> Vec<DiffFragment> {
        to_fragments(self.diff(a, b))
    }

    fn diff_main(&self, a: &str, b: &str, chunked: bool) -> Vec<Edit> {
        if a == b {
            return if a.is_empty() {
                Vec::new()
            } else {
                vec![Edit::equal(a)]
            };
        }

        let prefix = common_prefix(a, b);
        let (a_rest, b_rest) = (&a[prefix..], &b[prefix..]);
        let suffix = common_suffix(a_rest, b_rest);
        let a_mid = &a_rest[..a_rest.len() - suffix];
        let b_mid = &b_rest[..b_rest.len() - suffix];

        let mut edits = Vec::new();
        if prefix > 0 {
            edits.push(Edit::equal(&a[..prefix]));
        }
        edits.extend(self.compute(a_mid, b_mid, chunked));
        if suffix > 0 {
            edits.push(Edit::equal(&a_rest[a_rest.len() - suffix..]));
        }
        cleanup_merge(&mut edits);
        edits
    }

    fn compute(&self, a: &str, b: &str, chunked: bool) -> Vec<Edit> {
        if a.is_empty() {
            return vec![Edit::insert(b)];
        }
        if b.is_empty() {
            return vec![Edit::delete(a)];
        }
        if chunked
            && a.chars().count() > self.chunk_threshold
            && b.chars().count() > self.chunk_threshold
        {
            return self.chunk_diff(a, b);
        }
        char_diff(a, b)
    }

    /// Diff on interned chunks, then refine each replaced block per char.
    fn chunk_diff(&self, a: &str, b: &str) -> Vec<Edit> {
        let mode = ChunkMode::for_texts(a, b);
        let mut interner = ChunkInterner::default();
        let a_tokens: Vec<usize> = split_chunks(a, mode)
            .map(|chunk| interner.intern(chunk))
            .collect();
        let b_tokens: Vec<usize> = split_chunks(b, mode)
            .map(|chunk| interner.intern(chunk))
            .collect();
        tracing::trace!(
            ?mode,
            a_chunks = a_tokens.len(),
            b_chunks = b_tokens.len(),
            "chunk-level diff"
        );

        let mut edits = Vec::new();
        for op in capture_diff_slices(Algorithm::Myers, &a_tokens, &b_tokens) {
            match op {
                DiffOp::Equal { old_index, len, .. } => {
                    edits.push(Edit::equal(interner.join(&a_tokens[old_index..old_index + len])));
                }
                DiffOp::Delete {
                    old_index, old_len, ..
                } => {
                    edits.push(Edit::delete(
                        interner.join(&a_tokens[old_index..old_index + old_len]),
                    ));
                }
                DiffOp::Insert {
                    new_index, new_len, ..
                } => {
                    edits.push(Edit::insert(
                        interner.join(&b_tokens[new_index..new_index + new_len]),
                    ));
                }
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => {
                    edits.push(Edit::delete(
                        interner.join(&a_tokens[old_index..old_index + old_len]),
                    ));
                    edits.push(Edit::insert(
                        interner.join(&b_tokens[new_index..new_index + new_len]),
                    ));
                }
            }
        }
        cleanup_semantic(&mut edits);

        let mut refined = Vec::with_capacity(edits.len());
        let mut deleted = String::new();
        let mut inserted = String::new();
        for edit in edits {
            match edit.op {
                Op::Delete => deleted.push_str(&edit.text),
                Op::Insert => inserted.push_str(&edit.text),
                Op::Equal => {
                    self.flush_block(&mut refined, &mut deleted, &mut inserted);
                    refined.push(edit);
                }
            }
        }
        self.flush_block(&mut refined, &mut deleted, &mut inserted);
        refined
    }

    fn flush_block(&self, out: &mut Vec<Edit>, deleted: &mut String, inserted: &mut String) {
        if !deleted.is_empty() && !inserted.is_empty() {
            out.extend(self.diff_main(deleted, inserted, false));
        } else if !deleted.is_empty() {
            out.push(Edit::delete(deleted.as_str()));
        } else if !inserted.is_empty() {
            out.push(Edit::insert(inserted.as_str()));
        }
        deleted.clear();
        inserted.clear();
    }
}

fn char_diff(a: &str, b: &str) -> Vec<Edit> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let collect = |chars: &[char]| chars.iter().collect::<String>();

    let mut edits = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &a_chars, &b_chars) {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                edits.push(Edit::equal(collect(&a_chars[old_index..old_index + len])));
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                edits.push(Edit::delete(collect(&a_chars[old_index..old_index + old_len])));
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                edits.push(Edit::insert(collect(&b_chars[new_index..new_index + new_len])));
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                edits.push(Edit::delete(collect(&a_chars[old_index..old_index + old_len])));
                edits.push(Edit::insert(collect(&b_chars[new_index..new_index + new_len])));
            }
        }
    }
    edits
}

/// Drop equalities and empty edits, keeping insertions and deletions.
#[must_use]
pub fn to_fragments(edits: Vec<Edit>) -> Vec<DiffFragment> {
    edits
        .into_iter()
        .filter(|edit| !edit.text.is_empty())
        .filter_map(|edit| match edit.op {
            Op::Insert => Some(DiffFragment::insertion(edit.text)),
            Op::Delete => Some(DiffFragment::deletion(edit.text)),
            Op::Equal => None,
        })
        .collect()
}

/// Diff two strings with default settings and return the changed spans.
#[must_use]
pub fn diff_text(a: &str, b: &str) -> Vec<DiffFragment> {
    TextDiffer::new().fragments(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(edits: &[Edit], keep: Op) -> String {
        edits
            .iter()
            .filter(|e| e.op == Op::Equal || e.op == keep)
            .map(|e| e.text.as_str())
            .collect()
    }

    #[test]
    fn test_identical_inputs_have_no_fragments() {
        assert!(diff_text("", "").is_empty());
        assert!(diff_text("same text", "same text").is_empty());
    }

    #[test]
    fn test_hello_hi() {
        assert_eq!(
            diff_text("Hello", "Hi"),
            vec![DiffFragment::deletion("ello"), DiffFragment::insertion("i")]
        );
    }

    #[test]
    fn test_pure_insertion_and_deletion() {
        assert_eq!(diff_text("", "abc"), vec![DiffFragment::insertion("abc")]);
        assert_eq!(diff_text("abc", ""), vec![DiffFragment::deletion("abc")]);
        assert_eq!(
            diff_text("abc", "abxc"),
            vec![DiffFragment::insertion("x")]
        );
    }

    #[test]
    fn test_semantic_cleanup_collapses_noise() {
        // Character-level Myers interleaves the shared 'e'; cleanup should
        // replace the whole word instead.
        let edits = TextDiffer::new().diff("mouse", "sofas");
        assert!(edits.iter().all(|e| e.op != Op::Equal), "{edits:?}");
        assert_eq!(rebuild(&edits, Op::Delete), "mouse");
        assert_eq!(rebuild(&edits, Op::Insert), "sofas");
    }

    #[test]
    fn test_edits_reconstruct_both_sides() {
        let a = "The quick brown fox jumps over the lazy dog.";
        let b = "The quick red fox leaps over the very lazy dog!";
        let edits = TextDiffer::new().diff(a, b);
        assert_eq!(rebuild(&edits, Op::Delete), a);
        assert_eq!(rebuild(&edits, Op::Insert), b);
    }

    #[test]
    fn test_chunked_diff_on_long_multiline_input() {
        let a: String = (0..60).map(|i| format!("line {i}\n")).collect();
        let b: String = (0..60)
            .map(|i| {
                if i % 7 == 0 {
                    format!("entry {i} changed\n")
                } else {
                    format!("line {i}\n")
                }
            })
            .collect();
        let edits = TextDiffer::new().diff(&a, &b);
        assert_eq!(rebuild(&edits, Op::Delete), a);
        assert_eq!(rebuild(&edits, Op::Insert), b);

        let inserted: String = to_fragments(edits)
            .iter()
            .filter(|f| f.is_insertion())
            .map(|f| f.text.as_str())
            .collect();
        assert!(inserted.contains("changed"), "{inserted:?}");
    }

    #[test]
    fn test_chunked_diff_on_long_single_line() {
        let a: String = (0..40).map(|i| format!("alpha{i} ")).collect();
        let b: String = (0..40)
            .map(|i| {
                if i % 3 == 0 {
                    format!("beta{i} ")
                } else {
                    format!("alpha{i} ")
                }
            })
            .collect();
        let edits = TextDiffer::new().diff(&a, &b);
        assert_eq!(rebuild(&edits, Op::Delete), a);
        assert_eq!(rebuild(&edits, Op::Insert), b);
    }

    #[test]
    fn test_multibyte_characters() {
        let edits = TextDiffer::new().diff("naïve café", "naive cafè");
        assert_eq!(rebuild(&edits, Op::Delete), "naïve café");
        assert_eq!(rebuild(&edits, Op::Insert), "naive cafè");
    }

    #[test]
    fn test_cleanup_can_be_disabled() {
        let raw = TextDiffer::new().semantic_cleanup(false).diff("mouse", "sofas");
        assert_eq!(rebuild(&raw, Op::Delete), "mouse");
        assert_eq!(rebuild(&raw, Op::Insert), "sofas");
    }

    #[test]
    fn test_swapped_inputs_swap_kinds_for_single_change() {
        assert_eq!(
            diff_text("Hi", "Hello"),
            vec![DiffFragment::deletion("i"), DiffFragment::insertion("ello")]
        );
        let mut swapped: Vec<DiffFragment> = diff_text("Hello", "Hi")
            .into_iter()
            .map(|f| DiffFragment {
                kind: f.kind.inverse(),
                text: f.text,
            })
            .collect();
        let mut expected = diff_text("Hi", "Hello");
        expected.sort_by_key(|f| f.is_insertion());
        swapped.sort_by_key(|f| f.is_insertion());
        assert_eq!(swapped, expected);
    }

    #[test]
    fn test_swapped_inputs_still_rebuild_both_sides() {
        let a = "c  aa\n\na  \nc ";
        let b = "a \n\n\n\na\n \na \n  \n\n   aa\n\n\n a\n  ";
        for (x, y) in [(a, b), (b, a)] {
            let edits = TextDiffer::new().diff(x, y);
            assert_eq!(rebuild(&edits, Op::Delete), x);
            assert_eq!(rebuild(&edits, Op::Insert), y);
        }
    }
}
