//! Session Module
//!
//! Orchestrates a single round: commit, prompt, resolve, disclose.
//!
//! ## Module Structure
//!
//! - `input`: Prompt line parsing
//! - `state`: Round state machine with guarded transitions
//! - `controller`: Prompt loop over any reader/writer pair

pub mod input;
pub mod state;
pub mod controller;

// Re-export key types
pub use input::{parse_selection, Selection, InvalidSelectionError};
pub use state::{Round, RoundPhase, RoundResult, RoundState, SessionError};
pub use controller::{SessionController, RoundEnd, RoundOptions};
