#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Clear,
    Backspace,
}

impl Key {
    /// On-screen layout, top row first.
    pub const LAYOUT: [[Key; 3]; 4] = [
        [Key::Digit(1), Key::Digit(2), Key::Digit(3)],
        [Key::Digit(4), Key::Digit(5), Key::Digit(6)],
        [Key::Digit(7), Key::Digit(8), Key::Digit(9)],
        [Key::Clear, Key::Digit(0), Key::Backspace],
    ];

    pub fn label(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Key::Digit(d) => DIGITS.get(*d as usize).copied().unwrap_or("?"),
            Key::Clear => "C",
            Key::Backspace => "⌫",
        }
    }
}

/// The digits typed for the current question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerInput {
    buffer: String,
}

impl AnswerInput {
    pub const MAX_LEN: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a key press. Returns `false` when the press changed nothing.
    pub fn apply(&mut self, key: Key) -> bool {
        match key {
            Key::Digit(d) => self.push_digit(d),
            Key::Clear => {
                let changed = !self.buffer.is_empty();
                self.buffer.clear();
                changed
            }
            Key::Backspace => self.buffer.pop().is_some(),
        }
    }

    fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || self.buffer.len() >= Self::MAX_LEN {
            return false;
        }
        self.buffer.push(char::from(b'0' + digit));
        true
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// `None` for an empty buffer.
    pub fn value(&self) -> Option<u32> {
        self.buffer.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &[Key]) -> AnswerInput {
        let mut input = AnswerInput::new();
        for key in keys {
            input.apply(*key);
        }
        input
    }

    #[test]
    fn caps_at_three_digits() {
        let mut input = typed(&[Key::Digit(1), Key::Digit(2), Key::Digit(3)]);
        assert!(!input.apply(Key::Digit(4)));
        assert_eq!(input.as_str(), "123");
    }

    #[test]
    fn backspace_then_clear() {
        let mut input = typed(&[Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::Digit(4)]);
        input.apply(Key::Backspace);
        assert_eq!(input.as_str(), "12");
        input.apply(Key::Clear);
        assert_eq!(input.as_str(), "");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut input = AnswerInput::new();
        assert!(!input.apply(Key::Backspace));
        assert!(!input.apply(Key::Clear));
        assert!(input.is_empty());
    }

    #[test]
    fn out_of_range_digit_ignored() {
        let mut input = AnswerInput::new();
        assert!(!input.apply(Key::Digit(10)));
        assert!(input.is_empty());
    }

    #[test]
    fn value_parses_leading_zeros() {
        assert_eq!(typed(&[Key::Digit(0), Key::Digit(7)]).value(), Some(7));
        assert_eq!(AnswerInput::new().value(), None);
    }

    #[test]
    fn layout_labels() {
        let labels: Vec<_> = Key::LAYOUT[3].iter().map(Key::label).collect();
        assert_eq!(labels, vec!["C", "0", "⌫"]);
    }
}
