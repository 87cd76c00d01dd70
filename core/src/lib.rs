pub mod config;
pub mod error;
pub mod generator;
pub mod keypad;
pub mod pacing;
pub mod question;
pub mod session;
pub mod timer;

pub use config::{Configuration, InputPolicy, MaxFactor, QuestionCount};
pub use error::QuizError;
pub use keypad::{AnswerInput, Key};
pub use pacing::Pacing;
pub use question::Question;
pub use session::{Action, Effect, Feedback, Quiz, Round, Screen, Stage, Summary};
pub use timer::{Timer, TimerKind, TimerQueue};
