#![forbid(unsafe_code)]

//! Pure computations over BOM lines. Nothing here keeps state between calls.

mod reorder;
mod resolve;
mod totals;

pub use reorder::*;
pub use resolve::*;
pub use totals::*;
