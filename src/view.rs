//! Derived views over the catalog: filtering, searching and the projection
//! that composes them into what the list displays.
//!
//! Everything here is pure and total; an empty result is a normal value.

mod filter;
mod projection;
mod search;

pub use filter::{FilterSelection, apply_filter};
pub use projection::{project, sort_by_name};
pub use search::{Highlighted, fold, highlight, normalize_term, search};
