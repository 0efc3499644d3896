//! Diff engines for the two comparison paths.
//!
//! # Architecture
//!
//! - [`text`]: edit script between two strings, cleaned up semantically.
//!   Used for HTML element text and for diffing two fetch error messages.
//! - [`json`]: structural diff of two JSON documents, rendered as annotated
//!   lines and parsed back into fragments.
//! - [`html`]: CSS-selector text extraction feeding the text engine.
//!
//! All engines are plain functions or `Copy` settings structs; none keeps
//! state between calls.
//!
//! # Example
//!
//! ```
//! use respdiff::diff::diff_text;
//! use respdiff::model::DiffFragment;
//!
//! let fragments = diff_text("Hello", "Hi");
//! assert_eq!(
//!     fragments,
//!     vec![DiffFragment::deletion("ello"), DiffFragment::insertion("i")]
//! );
//! ```

mod chunk;
mod cleanup;
pub mod html;
pub mod json;
mod render;
pub mod text;

pub use html::HtmlDocument;
pub use json::{diff_json, diff_values, parse_body, ArrayDelta, ArrayEntry, Delta, ObjectDelta};
pub use render::{fragments_from_lines, render_ascii};
pub use text::{diff_text, to_fragments, Edit, Op, TextDiffer, DEFAULT_CHUNK_THRESHOLD};
