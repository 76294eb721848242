//! Query-refinement extractors: year ranges in user text, fenced payloads in model text.

pub mod date_range;
pub mod fenced;

pub use date_range::{EARLIEST_YEAR, ExtractedRange, extract_date_range};
pub use fenced::{FencedBlock, extract_fenced};
