use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("cannot pick {requested} different questions from only {available} factor pairs")]
    Infeasible { requested: usize, available: usize },
    #[error("question count must be 5, 10 or 20, got {0}")]
    InvalidQuestionCount(u32),
    #[error("{action} is not available on the {screen} screen")]
    NotAvailable {
        action: &'static str,
        screen: &'static str,
    },
}
