//! Value types shared by the comparison core and its callers.
//!
//! A comparison consumes two [`FetchOutcome`]s and yields a [`Comparison`],
//! an ordered list of [`DiffFragment`]s. Everything here is transient and
//! immutable once built.

mod fragment;
mod outcome;

pub use fragment::{Comparison, DiffFragment, FragmentKind, Strategy};
pub use outcome::{FetchError, FetchOutcome, Fetcher, Response, Side};
