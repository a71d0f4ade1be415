pub mod catalog;
pub mod decompose;
pub mod mastery;
pub mod scoring;
pub mod selector;
pub mod unlock;

pub use catalog::{HANGUL_JAMO, Symbol};
pub use mastery::{MAX_SCORE, MasteryRecord, UNLOCK_THRESHOLD};
pub use selector::{DrawContext, FocusMode};
