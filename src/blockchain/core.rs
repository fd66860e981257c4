// core.rs splits ledger responsibilities into submodules.
pub mod chain;
pub mod shared;
pub mod validation;

pub use chain::*;
pub use shared::*;
pub use validation::*;
