//! Pure week arithmetic: ISO-8601 week identity and the
//! weeks-since-birth ordinal mapping.
//!
//! # Responsibility
//! - Keep all week/date computation in one place, as total functions
//!   with no storage or environment access.
//!
//! # Invariants
//! - One calendar representation (civil dates) throughout; mixing in a
//!   second representation is how the off-by-one-week year-boundary bugs
//!   happen.

pub mod birth;
pub mod iso;
