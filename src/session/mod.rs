pub mod evaluator;
pub mod hint_timer;
pub mod history;
pub mod lookahead;
pub mod trainer;

pub use evaluator::{HintReveal, Outcome};
pub use hint_timer::HintTicket;
pub use trainer::{ProgressSnapshot, ProgressSummary, ProgressTile, Trainer};
