//! Unified error types for respdiff.
//!
//! Fetch failures are not errors here: the classifier turns them into diff
//! fragments. Everything below aborts a comparison.

use thiserror::Error;

/// Main error type for respdiff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RespDiffError {
    /// Reading a response body failed
    #[error("Failed to read response body: {context}")]
    Body {
        context: String,
        #[source]
        source: BodyErrorKind,
    },

    /// A body expected to be JSON did not parse
    #[error("Failed to parse JSON: {context}")]
    Json {
        context: String,
        #[source]
        source: JsonErrorKind,
    },

    /// HTML extraction failed
    #[error("Failed to extract HTML: {context}")]
    Html {
        context: String,
        #[source]
        source: HtmlErrorKind,
    },

    /// The fetch layer could not be set up
    #[error("Fetch setup failed: {context}")]
    Fetch {
        context: String,
        #[source]
        source: FetchErrorKind,
    },
}

/// Specific body read error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BodyErrorKind {
    #[error("stream read failed: {0}")]
    ReadFailed(String),
}

/// Specific JSON error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JsonErrorKind {
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("delta does not fit document: {0}")]
    DeltaMismatch(String),
}

/// Specific HTML error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HtmlErrorKind {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Specific fetch setup error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchErrorKind {
    #[error("HTTP client could not be built: {0}")]
    ClientBuild(String),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for respdiff operations
pub type Result<T> = std::result::Result<T, RespDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RespDiffError {
    /// Create a body read error with context
    pub fn body(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Body {
            context: context.into(),
            source: BodyErrorKind::ReadFailed(source.to_string()),
        }
    }

    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: JsonErrorKind) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid selector error
    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Html {
            context: "parsing selector".to_string(),
            source: HtmlErrorKind::InvalidSelector {
                selector: selector.into(),
                reason: reason.into(),
            },
        }
    }

    /// Create a fetch setup error
    pub fn fetch(context: impl Into<String>, source: FetchErrorKind) -> Self {
        Self::Fetch {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<serde_json::Error> for RespDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(
            "JSON deserialization",
            JsonErrorKind::Malformed(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use respdiff::error::ErrorContext;
///
/// let value: serde_json::Value = serde_json::from_slice(body)
///     .with_context(|| format!("side {side}"))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error, prepending it to any existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RespDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RespDiffError, new_ctx: &str) -> RespDiffError {
    match err {
        RespDiffError::Body {
            context: existing,
            source,
        } => RespDiffError::Body {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RespDiffError::Json {
            context: existing,
            source,
        } => RespDiffError::Json {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RespDiffError::Html {
            context: existing,
            source,
        } => RespDiffError::Html {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RespDiffError::Fetch {
            context: existing,
            source,
        } => RespDiffError::Fetch {
            context: chain_context(new_ctx, &existing),
            source,
        },
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
