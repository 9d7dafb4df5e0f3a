use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses which question comes next.
///
/// Implementations must return an index in `[0, bank_size)`. `previous` is
/// the index of the question being replaced, or `None` at session start.
pub trait QuestionSelector: Send {
    fn pick_next(&mut self, bank_size: usize, previous: Option<usize>) -> usize;
}

/// Uniform pick over the whole bank. The same question may come up twice in a row.
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for RandomSelector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> RandomSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> QuestionSelector for RandomSelector<R> {
    fn pick_next(&mut self, bank_size: usize, _previous: Option<usize>) -> usize {
        if bank_size <= 1 {
            return 0;
        }
        self.rng.gen_range(0..bank_size)
    }
}

/// Uniform pick over every question except the one just shown.
pub struct NoRepeatSelector<R = StdRng> {
    rng: R,
}

impl NoRepeatSelector<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for NoRepeatSelector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> NoRepeatSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> QuestionSelector for NoRepeatSelector<R> {
    fn pick_next(&mut self, bank_size: usize, previous: Option<usize>) -> usize {
        if bank_size <= 1 {
            return 0;
        }
        match previous {
            Some(previous) if previous < bank_size => {
                // Draw from one slot fewer and skip over the previous index.
                let pick = self.rng.gen_range(0..bank_size - 1);
                if pick >= previous { pick + 1 } else { pick }
            }
            _ => self.rng.gen_range(0..bank_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_selector_stays_in_range() {
        let mut selector = RandomSelector::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..1000 {
            assert!(selector.pick_next(5, Some(2)) < 5);
        }
    }

    #[test]
    fn test_random_selector_covers_whole_bank() {
        let mut selector = RandomSelector::with_rng(StdRng::seed_from_u64(42));
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[selector.pick_next(4, None)] = true;
        }
        assert!(seen.iter().all(|s| *s), "every index should come up: {:?}", seen);
    }

    #[test]
    fn test_single_question_bank() {
        let mut random = RandomSelector::with_rng(StdRng::seed_from_u64(1));
        let mut no_repeat = NoRepeatSelector::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(random.pick_next(1, Some(0)), 0);
        assert_eq!(no_repeat.pick_next(1, Some(0)), 0);
    }

    #[test]
    fn test_no_repeat_selector_never_repeats() {
        let mut selector = NoRepeatSelector::with_rng(StdRng::seed_from_u64(3));
        let mut previous = selector.pick_next(3, None);
        for _ in 0..1000 {
            let next = selector.pick_next(3, Some(previous));
            assert!(next < 3);
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_no_repeat_selector_reaches_last_index() {
        let mut selector = NoRepeatSelector::with_rng(StdRng::seed_from_u64(9));
        let picks: Vec<usize> = (0..200).map(|_| selector.pick_next(2, Some(0))).collect();
        assert!(picks.iter().all(|p| *p == 1));
    }
}
