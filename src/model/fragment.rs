//! Diff fragments and comparison results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a fragment is present only on the B side or only on the A side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Present only in B
    Insertion,
    /// Present only in A
    Deletion,
}

impl FragmentKind {
    /// Single-character marker used by line renderings.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Insertion => '+',
            Self::Deletion => '-',
        }
    }

    /// The opposite kind, as seen when A and B are swapped.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Insertion => Self::Deletion,
            Self::Deletion => Self::Insertion,
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insertion => write!(f, "insertion"),
            Self::Deletion => write!(f, "deletion"),
        }
    }
}

/// One contiguous span of text tagged as inserted or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffFragment {
    pub text: String,
    pub kind: FragmentKind,
}

impl DiffFragment {
    pub fn insertion(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FragmentKind::Insertion,
        }
    }

    pub fn deletion(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FragmentKind::Deletion,
        }
    }

    #[must_use]
    pub const fn is_insertion(&self) -> bool {
        matches!(self.kind, FragmentKind::Insertion)
    }

    #[must_use]
    pub const fn is_deletion(&self) -> bool {
        matches!(self.kind, FragmentKind::Deletion)
    }
}

impl fmt::Display for DiffFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.text)
    }
}

/// Which comparison path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Exactly one side failed to fetch
    FetchFailure,
    /// Both sides failed; their error messages were diffed
    ErrorText,
    /// Bodies were compared as JSON documents
    Json,
    /// Selected HTML elements were compared as text
    Html,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailure => write!(f, "fetch-failure"),
            Self::ErrorText => write!(f, "error-text"),
            Self::Json => write!(f, "json"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// The result of comparing two fetch outcomes.
///
/// An empty fragment list means no differences were detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub strategy: Strategy,
    pub fragments: Vec<DiffFragment>,
}

impl Comparison {
    #[must_use]
    pub const fn new(strategy: Strategy, fragments: Vec<DiffFragment>) -> Self {
        Self {
            strategy,
            fragments,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn insertions(&self) -> usize {
        self.fragments.iter().filter(|f| f.is_insertion()).count()
    }

    #[must_use]
    pub fn deletions(&self) -> usize {
        self.fragments.iter().filter(|f| f.is_deletion()).count()
    }

    #[must_use]
    pub fn into_fragments(self) -> Vec<DiffFragment> {
        self.fragments
    }
}
