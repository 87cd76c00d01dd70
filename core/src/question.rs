use std::hash::{Hash, Hasher};

use uuid::Uuid;

/// One multiplication problem.
///
/// Equality and hashing only look at the factor pair; `id` exists so a view
/// can tell two otherwise identical questions apart.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: Uuid,
    pub left: u8,
    pub right: u8,
}

impl Question {
    pub fn new(left: u8, right: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            left,
            right,
        }
    }

    pub fn answer(&self) -> u32 {
        self.left as u32 * self.right as u32
    }

    pub fn display(&self) -> String {
        format!("{} × {}", self.left, self.right)
    }

    pub fn pair(&self) -> (u8, u8) {
        (self.left, self.right)
    }

    pub fn is_correct(&self, answer: u32) -> bool {
        self.answer() == answer
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.pair() == other.pair()
    }
}

impl Eq for Question {}

impl Hash for Question {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pair().hash(state);
    }
}
