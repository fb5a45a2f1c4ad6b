pub mod engine;
pub mod timer;

pub use engine::{
    Mode,
    Phase,
    QuizEngine,
    QuizEvent,
    CHOICE_COUNT,
};
pub use timer::AdvanceTimer;
