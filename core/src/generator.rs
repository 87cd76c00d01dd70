use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::MaxFactor;
use crate::error::QuizError;
use crate::question::Question;

/// Random draws allowed per requested question before falling back to
/// picking from the pairs that have not come up yet.
const DRAWS_PER_QUESTION: usize = 64;

/// Draws `count` questions with pairwise distinct `(left, right)` pairs, both
/// factors in `1..=max_factor`, in the order they were accepted.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    max_factor: MaxFactor,
    count: usize,
) -> Result<Vec<Question>, QuizError> {
    let available = max_factor.available_pairs();
    if count > available {
        return Err(QuizError::Infeasible {
            requested: count,
            available,
        });
    }

    let max = max_factor.get();
    let mut seen = HashSet::with_capacity(count);
    let mut questions = Vec::with_capacity(count);
    let mut draws = 0;

    while questions.len() < count && draws < count * DRAWS_PER_QUESTION {
        draws += 1;
        let pair = (rng.gen_range(1..=max), rng.gen_range(1..=max));
        if seen.insert(pair) {
            questions.push(Question::new(pair.0, pair.1));
        }
    }

    if questions.len() < count {
        tracing::debug!(draws, accepted = questions.len(), "filling from unused pairs");
        let mut rest: Vec<(u8, u8)> = (1..=max)
            .flat_map(|left| (1..=max).map(move |right| (left, right)))
            .filter(|pair| !seen.contains(pair))
            .collect();
        rest.shuffle(rng);
        let missing = count - questions.len();
        questions.extend(
            rest.into_iter()
                .take(missing)
                .map(|(left, right)| Question::new(left, right)),
        );
    }

    Ok(questions)
}
