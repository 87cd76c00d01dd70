use std::time::Duration;

/// How long feedback stays up after an answer, and the gap before the next
/// question appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub feedback: Duration,
    pub pause: Duration,
}

impl Pacing {
    pub const DEFAULT_FEEDBACK: Duration = Duration::from_millis(1500);
    pub const DEFAULT_PAUSE: Duration = Duration::from_millis(300);

    pub fn new(feedback: Duration, pause: Duration) -> Self {
        Self { feedback, pause }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FEEDBACK, Self::DEFAULT_PAUSE)
    }
}
