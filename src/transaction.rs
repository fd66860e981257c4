//! Transaction module; the record type lives in `types`

pub mod types;

pub use types::*;
