use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Configuration, InputPolicy, MaxFactor, QuestionCount};
use crate::error::QuizError;
use crate::generator;
use crate::keypad::{AnswerInput, Key};
use crate::pacing::Pacing;
use crate::question::Question;
use crate::timer::{Timer, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub text: &'static str,
    pub is_correct: bool,
    pub correct_answer: u32,
}

impl Feedback {
    pub const CORRECT: &'static str = "Correct!";
    pub const WRONG: &'static str = "Wrong!";

    fn new(is_correct: bool, correct_answer: u32) -> Self {
        Self {
            text: if is_correct { Self::CORRECT } else { Self::WRONG },
            is_correct,
            correct_answer,
        }
    }
}

/// Where a round is between two answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Answering,
    ShowingFeedback,
    Pausing,
}

#[derive(Debug, Clone)]
pub struct Round {
    questions: Vec<Question>,
    current: usize,
    score: u32,
    input: AnswerInput,
    feedback: Option<Feedback>,
    stage: Stage,
}

impl Round {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            input: AnswerInput::new(),
            feedback: None,
            stage: Stage::Answering,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn input(&self) -> &AnswerInput {
        &self.input
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn position(&self) -> String {
        format!("Question {} of {}", self.current + 1, self.questions.len())
    }

    pub fn can_submit(&self) -> bool {
        self.stage == Stage::Answering && !self.input.is_empty()
    }

    fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u32,
    pub total: usize,
}

impl Summary {
    pub fn message(&self) -> String {
        format!("You scored {} out of {}", self.score, self.total)
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Settings,
    Playing(Round),
    Results(Summary),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Settings => "settings",
            Screen::Playing(_) => "playing",
            Screen::Results(_) => "results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetMaxFactor(u8),
    IncrementMaxFactor,
    DecrementMaxFactor,
    SetQuestionCount(QuestionCount),
    Start,
    Key(Key),
    Submit,
    PlayAgain,
    Fire(Timer),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetMaxFactor(_) => "set max factor",
            Action::IncrementMaxFactor => "increment max factor",
            Action::DecrementMaxFactor => "decrement max factor",
            Action::SetQuestionCount(_) => "set question count",
            Action::Start => "start",
            Action::Key(_) => "keypad",
            Action::Submit => "submit",
            Action::PlayAgain => "play again",
            Action::Fire(_) => "timer",
        }
    }
}

/// Work the caller has to carry out on the quiz's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Feed `Action::Fire(timer)` back in once `after` has elapsed.
    Schedule { after: Duration, timer: Timer },
}

/// The whole application state: configuration plus the active screen.
///
/// Every change goes through [`Quiz::dispatch`]. Delayed transitions come
/// back as [`Effect::Schedule`]; each submit, start and play-again bumps the
/// generation so a timer left over from an earlier answer or round is
/// recognised as stale and dropped.
#[derive(Debug)]
pub struct Quiz<R = StdRng> {
    config: Configuration,
    pacing: Pacing,
    policy: InputPolicy,
    screen: Screen,
    generation: u64,
    rng: R,
}

impl Quiz<StdRng> {
    pub fn new(config: Configuration, pacing: Pacing, policy: InputPolicy) -> Self {
        Self::with_rng(config, pacing, policy, StdRng::from_entropy())
    }
}

impl Default for Quiz<StdRng> {
    fn default() -> Self {
        Self::new(
            Configuration::default(),
            Pacing::default(),
            InputPolicy::default(),
        )
    }
}

impl<R: Rng> Quiz<R> {
    pub fn with_rng(config: Configuration, pacing: Pacing, policy: InputPolicy, rng: R) -> Self {
        Self {
            config,
            pacing,
            policy,
            screen: Screen::Settings,
            generation: 0,
            rng,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    pub fn policy(&self) -> &InputPolicy {
        &self.policy
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.screen {
            Screen::Playing(round) => Some(round),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Effect>, QuizError> {
        match action {
            Action::SetMaxFactor(value) => {
                self.configure(action, |c| c.max_factor = MaxFactor::new(value))
            }
            Action::IncrementMaxFactor => {
                self.configure(action, |c| c.max_factor = c.max_factor.increment())
            }
            Action::DecrementMaxFactor => {
                self.configure(action, |c| c.max_factor = c.max_factor.decrement())
            }
            Action::SetQuestionCount(count) => {
                self.configure(action, |c| c.question_count = count)
            }
            Action::Start => self.start(),
            Action::Key(key) => self.press(action, key),
            Action::Submit => self.submit(),
            Action::PlayAgain => self.play_again(),
            Action::Fire(timer) => Ok(self.fire(timer)),
        }
    }

    fn unavailable(&self, action: Action) -> QuizError {
        QuizError::NotAvailable {
            action: action.name(),
            screen: self.screen.name(),
        }
    }

    fn configure(
        &mut self,
        action: Action,
        update: impl FnOnce(&mut Configuration),
    ) -> Result<Vec<Effect>, QuizError> {
        if !matches!(self.screen, Screen::Settings) {
            return Err(self.unavailable(action));
        }
        update(&mut self.config);
        tracing::debug!(
            max_factor = self.config.max_factor.get(),
            question_count = self.config.question_count.get(),
            "configuration changed"
        );
        Ok(Vec::new())
    }

    fn start(&mut self) -> Result<Vec<Effect>, QuizError> {
        if !matches!(self.screen, Screen::Settings) {
            return Err(self.unavailable(Action::Start));
        }

        let questions = generator::generate(
            &mut self.rng,
            self.config.max_factor,
            self.config.question_count.get(),
        )?;
        if questions.is_empty() {
            return Err(QuizError::Infeasible {
                requested: 0,
                available: self.config.available_pairs(),
            });
        }

        self.generation += 1;
        tracing::info!(
            max_factor = self.config.max_factor.get(),
            questions = questions.len(),
            "round started"
        );
        self.screen = Screen::Playing(Round::new(questions));
        Ok(Vec::new())
    }

    fn press(&mut self, action: Action, key: Key) -> Result<Vec<Effect>, QuizError> {
        let lock = self.policy.lock_during_feedback;
        let Screen::Playing(round) = &mut self.screen else {
            return Err(self.unavailable(action));
        };

        if lock && round.stage != Stage::Answering {
            tracing::debug!(?key, "keypad locked while feedback is showing");
            return Ok(Vec::new());
        }
        if !round.input.apply(key) {
            tracing::debug!(?key, input = round.input.as_str(), "key press ignored");
        }
        Ok(Vec::new())
    }

    fn submit(&mut self) -> Result<Vec<Effect>, QuizError> {
        let Screen::Playing(round) = &mut self.screen else {
            return Err(self.unavailable(Action::Submit));
        };

        if round.stage != Stage::Answering {
            tracing::debug!("submit ignored until the next question is shown");
            return Ok(Vec::new());
        }
        let Some(answer) = round.input.value() else {
            tracing::debug!("submit ignored: no answer typed");
            return Ok(Vec::new());
        };

        let question = *round.current();
        let is_correct = question.is_correct(answer);
        if is_correct {
            round.score += 1;
        }
        round.feedback = Some(Feedback::new(is_correct, question.answer()));
        round.input.clear();
        round.stage = Stage::ShowingFeedback;
        tracing::debug!(
            question = %question.display(),
            answer,
            is_correct,
            score = round.score,
            "answer submitted"
        );

        self.generation += 1;
        Ok(vec![Effect::Schedule {
            after: self.pacing.feedback,
            timer: Timer {
                generation: self.generation,
                kind: TimerKind::HideFeedback,
            },
        }])
    }

    fn fire(&mut self, timer: Timer) -> Vec<Effect> {
        if timer.generation != self.generation {
            tracing::debug!(?timer, current = self.generation, "stale timer dropped");
            return Vec::new();
        }

        let Screen::Playing(round) = &mut self.screen else {
            tracing::debug!(?timer, screen = self.screen.name(), "timer outside a round dropped");
            return Vec::new();
        };

        match (timer.kind, round.stage) {
            (TimerKind::HideFeedback, Stage::ShowingFeedback) => {
                round.feedback = None;
                round.stage = Stage::Pausing;
                vec![Effect::Schedule {
                    after: self.pacing.pause,
                    timer: Timer {
                        generation: self.generation,
                        kind: TimerKind::Advance,
                    },
                }]
            }
            (TimerKind::Advance, Stage::Pausing) => {
                if round.is_last() {
                    let summary = Summary {
                        score: round.score,
                        total: round.questions.len(),
                    };
                    tracing::info!(score = summary.score, total = summary.total, "round finished");
                    self.screen = Screen::Results(summary);
                } else {
                    round.current += 1;
                    round.stage = Stage::Answering;
                }
                Vec::new()
            }
            (kind, stage) => {
                tracing::debug!(?kind, ?stage, "timer does not match round stage");
                Vec::new()
            }
        }
    }

    fn play_again(&mut self) -> Result<Vec<Effect>, QuizError> {
        if !matches!(self.screen, Screen::Results(_)) {
            return Err(self.unavailable(Action::PlayAgain));
        }
        self.generation += 1;
        self.screen = Screen::Settings;
        tracing::info!("back to settings");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(policy: InputPolicy) -> Quiz<StdRng> {
        Quiz::with_rng(
            Configuration::new(MaxFactor::new(6), QuestionCount::Five),
            Pacing::default(),
            policy,
            StdRng::seed_from_u64(11),
        )
    }

    fn playing(policy: InputPolicy) -> Quiz<StdRng> {
        let mut quiz = quiz(policy);
        quiz.dispatch(Action::Start).unwrap();
        quiz
    }

    fn type_number(quiz: &mut Quiz<StdRng>, value: u32) {
        for ch in value.to_string().chars() {
            let digit = ch.to_digit(10).unwrap() as u8;
            quiz.dispatch(Action::Key(Key::Digit(digit))).unwrap();
        }
    }

    fn single_timer(effects: Vec<Effect>) -> (Duration, Timer) {
        match effects.as_slice() {
            [Effect::Schedule { after, timer }] => (*after, *timer),
            other => panic!("expected one scheduled timer, got {other:?}"),
        }
    }

    /// Runs both delayed transitions for the last submit.
    fn finish_feedback(quiz: &mut Quiz<StdRng>, effects: Vec<Effect>) {
        let (_, hide) = single_timer(effects);
        let next = quiz.dispatch(Action::Fire(hide)).unwrap();
        let (_, advance) = single_timer(next);
        assert!(quiz.dispatch(Action::Fire(advance)).unwrap().is_empty());
    }

    #[test]
    fn start_resets_round() {
        let quiz = playing(InputPolicy::default());
        let round = quiz.round().unwrap();
        assert_eq!(round.questions().len(), 5);
        assert_eq!(round.current_index(), 0);
        assert_eq!(round.score(), 0);
        assert!(round.input().is_empty());
        assert!(round.feedback().is_none());
        assert_eq!(round.position(), "Question 1 of 5");
    }

    #[test]
    fn infeasible_start_stays_on_settings() {
        let mut quiz = quiz(InputPolicy::default());
        quiz.dispatch(Action::SetMaxFactor(2)).unwrap();
        let err = quiz.dispatch(Action::Start).unwrap_err();
        assert!(matches!(err, QuizError::Infeasible { requested: 5, available: 4 }));
        assert!(matches!(quiz.screen(), Screen::Settings));
    }

    #[test]
    fn empty_submit_is_noop() {
        let mut quiz = playing(InputPolicy::default());
        let generation = quiz.generation();
        assert!(quiz.dispatch(Action::Submit).unwrap().is_empty());

        let round = quiz.round().unwrap();
        assert_eq!(round.score(), 0);
        assert!(round.feedback().is_none());
        assert_eq!(round.stage(), Stage::Answering);
        assert_eq!(quiz.generation(), generation);
    }

    #[test]
    fn correct_answer_scores_and_schedules_feedback() {
        let mut quiz = playing(InputPolicy::default());
        let answer = quiz.round().unwrap().current().answer();
        type_number(&mut quiz, answer);

        let (after, timer) = single_timer(quiz.dispatch(Action::Submit).unwrap());
        assert_eq!(after, Pacing::DEFAULT_FEEDBACK);
        assert_eq!(timer.kind, TimerKind::HideFeedback);

        let round = quiz.round().unwrap();
        assert_eq!(round.score(), 1);
        assert_eq!(round.feedback().map(|f| f.text), Some(Feedback::CORRECT));
        assert!(round.input().is_empty());
    }

    #[test]
    fn wrong_answer_keeps_score() {
        let mut quiz = playing(InputPolicy::default());
        let answer = quiz.round().unwrap().current().answer();
        type_number(&mut quiz, answer + 1);
        quiz.dispatch(Action::Submit).unwrap();

        let round = quiz.round().unwrap();
        assert_eq!(round.score(), 0);
        let feedback = round.feedback().unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.text, Feedback::WRONG);
        assert_eq!(feedback.correct_answer, answer);
    }

    #[test]
    fn delays_advance_to_next_question() {
        let mut quiz = playing(InputPolicy::default());
        type_number(&mut quiz, 1);
        let (_, hide) = single_timer(quiz.dispatch(Action::Submit).unwrap());

        let (pause, advance) = single_timer(quiz.dispatch(Action::Fire(hide)).unwrap());
        assert_eq!(pause, Pacing::DEFAULT_PAUSE);
        let round = quiz.round().unwrap();
        assert!(round.feedback().is_none());
        assert_eq!(round.stage(), Stage::Pausing);
        assert_eq!(round.current_index(), 0);

        quiz.dispatch(Action::Fire(advance)).unwrap();
        let round = quiz.round().unwrap();
        assert_eq!(round.current_index(), 1);
        assert_eq!(round.stage(), Stage::Answering);
    }

    #[test]
    fn second_submit_during_feedback_is_ignored() {
        let mut quiz = playing(InputPolicy {
            lock_during_feedback: false,
        });
        let answer = quiz.round().unwrap().current().answer();
        type_number(&mut quiz, answer);
        quiz.dispatch(Action::Submit).unwrap();

        type_number(&mut quiz, answer);
        assert!(quiz.dispatch(Action::Submit).unwrap().is_empty());
        assert_eq!(quiz.round().unwrap().score(), 1);
    }

    #[test]
    fn locked_keypad_ignores_taps_during_feedback() {
        let mut quiz = playing(InputPolicy::default());
        type_number(&mut quiz, 5);
        let effects = quiz.dispatch(Action::Submit).unwrap();

        type_number(&mut quiz, 42);
        assert!(quiz.round().unwrap().input().is_empty());

        finish_feedback(&mut quiz, effects);
        assert!(quiz.round().unwrap().input().is_empty());
    }

    #[test]
    fn unlocked_taps_carry_into_next_question() {
        let mut quiz = playing(InputPolicy {
            lock_during_feedback: false,
        });
        type_number(&mut quiz, 5);
        let effects = quiz.dispatch(Action::Submit).unwrap();

        type_number(&mut quiz, 42);
        finish_feedback(&mut quiz, effects);

        let round = quiz.round().unwrap();
        assert_eq!(round.current_index(), 1);
        assert_eq!(round.input().as_str(), "42");
        assert!(round.can_submit());
    }

    #[test]
    fn timer_out_of_order_is_ignored() {
        let mut quiz = playing(InputPolicy::default());
        type_number(&mut quiz, 3);
        quiz.dispatch(Action::Submit).unwrap();

        let advance = Timer {
            generation: quiz.generation(),
            kind: TimerKind::Advance,
        };
        assert!(quiz.dispatch(Action::Fire(advance)).unwrap().is_empty());
        let round = quiz.round().unwrap();
        assert_eq!(round.stage(), Stage::ShowingFeedback);
        assert_eq!(round.current_index(), 0);
    }

    #[test]
    fn configuration_only_changes_on_settings() {
        let mut quiz = playing(InputPolicy::default());
        let err = quiz.dispatch(Action::IncrementMaxFactor).unwrap_err();
        assert_eq!(
            err,
            QuizError::NotAvailable {
                action: "increment max factor",
                screen: "playing"
            }
        );
        assert_eq!(quiz.config().max_factor.get(), 6);
    }

    #[test]
    fn stepper_and_count_buttons() {
        let mut quiz = quiz(InputPolicy::default());
        quiz.dispatch(Action::IncrementMaxFactor).unwrap();
        quiz.dispatch(Action::SetQuestionCount(QuestionCount::Twenty)).unwrap();
        assert_eq!(quiz.config().max_factor.get(), 7);
        assert_eq!(quiz.config().question_count, QuestionCount::Twenty);

        quiz.dispatch(Action::SetMaxFactor(40)).unwrap();
        assert_eq!(quiz.config().max_factor.get(), 12);
    }

    #[test]
    fn keypad_and_submit_need_a_round() {
        let mut quiz = quiz(InputPolicy::default());
        assert!(quiz.dispatch(Action::Key(Key::Digit(1))).is_err());
        assert!(quiz.dispatch(Action::Submit).is_err());
        assert!(quiz.dispatch(Action::PlayAgain).is_err());
    }
}
