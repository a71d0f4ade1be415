//! Adaptive Hangul jamo romanization drills.
//!
//! [`Trainer`] is the entry point for a host UI: it presents symbols, scores
//! typed romanizations, applies hints and persists per-symbol mastery through
//! a [`store::KeyValueStore`]. Rendering, sound and timers live in the host;
//! the trainer only hands back structured outcomes and snapshots.

pub mod config;
pub mod engine;
pub mod session;
pub mod store;

pub use config::Config;
pub use engine::{FocusMode, Symbol};
pub use session::{HintReveal, Outcome, Trainer};
