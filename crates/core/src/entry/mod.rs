//! Key-by-key amount entry.

pub mod buffer;

pub use buffer::{AmountBuffer, MAX_LEN, parse_amount};
