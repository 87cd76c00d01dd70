use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Largest factor a question may use, clamped to `2..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct MaxFactor(u8);

impl MaxFactor {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 12;

    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Number of distinct ordered `(left, right)` pairs with both factors in `1..=self`.
    pub fn available_pairs(self) -> usize {
        let n = self.0 as usize;
        n * n
    }
}

impl Default for MaxFactor {
    fn default() -> Self {
        Self(5)
    }
}

impl From<u8> for MaxFactor {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<MaxFactor> for u8 {
    fn from(value: MaxFactor) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum QuestionCount {
    Five,
    #[default]
    Ten,
    Twenty,
}

impl QuestionCount {
    pub const ALL: [QuestionCount; 3] = [Self::Five, Self::Ten, Self::Twenty];

    pub fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Twenty => 20,
        }
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = QuizError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            20 => Ok(Self::Twenty),
            other => Err(QuizError::InvalidQuestionCount(other)),
        }
    }
}

impl From<QuestionCount> for u32 {
    fn from(value: QuestionCount) -> Self {
        value.get() as u32
    }
}

/// Parameters chosen on the settings screen before a round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration {
    pub max_factor: MaxFactor,
    pub question_count: QuestionCount,
}

impl Configuration {
    pub fn new(max_factor: MaxFactor, question_count: QuestionCount) -> Self {
        Self {
            max_factor,
            question_count,
        }
    }

    pub fn available_pairs(&self) -> usize {
        self.max_factor.available_pairs()
    }

    pub fn is_feasible(&self) -> bool {
        self.question_count.get() <= self.available_pairs()
    }
}

/// Whether keypad taps are accepted while feedback for the previous answer is
/// still on screen. Unlocked taps land in the next question's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPolicy {
    pub lock_during_feedback: bool,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self {
            lock_during_feedback: true,
        }
    }
}
