// Thin re-export module: implementation is in `blockchain/core.rs`, split into
// block/ledger types, linkage validation and the lock-guarded shared ledger.

pub mod core;
pub use core::*;
