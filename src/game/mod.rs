//! Game Rules Module
//!
//! Pure winner determination. No I/O, no randomness.
//!
//! ## Module Structure
//!
//! - `rules`: Cyclic-half rule table and pairing resolution
//! - `table`: Help table rendering of the full outcome grid

pub mod rules;
pub mod table;

// Re-export key types
pub use rules::{RuleTable, Outcome, IndexError, build_rule_table};
pub use table::render_table;
