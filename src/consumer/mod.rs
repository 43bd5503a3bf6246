// checker module
mod checker;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the consumer modules.
//─────────────────────────────────────────────────────────────────────────────
pub use checker::{NameNotFound, ReferenceChecker};
