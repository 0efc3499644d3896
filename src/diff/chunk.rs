//! Chunking and interning for the coarse pass of the text diff.

use crate::utils::content_hash;
use std::collections::HashMap;

/// How long texts are cut before the coarse diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChunkMode {
    /// One chunk per line, newline included
    Lines,
    /// One chunk per word, trailing whitespace included
    Words,
}

impl ChunkMode {
    /// Lines when either side is multi-line, words otherwise.
    pub(crate) fn for_texts(a: &str, b: &str) -> Self {
        if a.contains('\n') || b.contains('\n') {
            Self::Lines
        } else {
            Self::Words
        }
    }
}

/// Split `text` into chunks whose concatenation is `text`.
pub(crate) fn split_chunks(text: &str, mode: ChunkMode) -> Box<dyn Iterator<Item = &str> + '_> {
    match mode {
        ChunkMode::Lines => Box::new(text.split_inclusive('\n')),
        ChunkMode::Words => Box::new(WordChunks { rest: text }),
    }
}

struct WordChunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for WordChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let mut seen_space = false;
        let mut end = self.rest.len();
        for (i, c) in self.rest.char_indices() {
            if c.is_whitespace() {
                seen_space = true;
            } else if seen_space {
                end = i;
                break;
            }
        }
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

/// Maps distinct chunks to dense integer tokens.
///
/// Chunks are bucketed by their xxh3 checksum and compared by content
/// within a bucket, so a checksum collision never merges distinct chunks.
#[derive(Debug, Default)]
pub(crate) struct ChunkInterner<'a> {
    chunks: Vec<&'a str>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl<'a> ChunkInterner<'a> {
    pub(crate) fn intern(&mut self, chunk: &'a str) -> usize {
        let bucket = self
            .buckets
            .entry(content_hash(chunk.as_bytes()))
            .or_default();
        if let Some(&id) = bucket.iter().find(|&&id| self.chunks[id] == chunk) {
            return id;
        }
        let id = self.chunks.len();
        self.chunks.push(chunk);
        bucket.push(id);
        id
    }

    /// Concatenate the chunks behind `tokens`.
    pub(crate) fn join(&self, tokens: &[usize]) -> String {
        tokens.iter().map(|&id| self.chunks[id]).collect()
    }
}
