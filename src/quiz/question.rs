//! Multiplication question generation

use rand::Rng;
use serde::Serialize;

use super::level::DifficultyLevel;

/// A single multiplication problem. Replaced, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    num1: u32,
    num2: u32,
    answer: u32,
}

impl Question {
    /// Build a question from two operands
    pub fn new(num1: u32, num2: u32) -> Self {
        Self {
            num1,
            num2,
            answer: num1 * num2,
        }
    }

    /// Draw two independent operands uniformly from the level's inclusive range
    pub fn generate<R: Rng + ?Sized>(level: DifficultyLevel, rng: &mut R) -> Self {
        let range = level.range();
        let num1 = rng.random_range(range.min..=range.max);
        let num2 = rng.random_range(range.min..=range.max);
        Self::new(num1, num2)
    }

    pub fn num1(&self) -> u32 {
        self.num1
    }

    pub fn num2(&self) -> u32 {
        self.num2
    }

    pub fn answer(&self) -> u32 {
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_answer_is_product() {
        let q = Question::new(7, 8);
        assert_eq!(q.answer(), 56);
    }

    #[test]
    fn test_same_seed_same_questions() {
        let mut rng1 = Pcg32::seed_from_u64(42);
        let mut rng2 = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                Question::generate(DifficultyLevel::Expert, &mut rng1),
                Question::generate(DifficultyLevel::Expert, &mut rng2)
            );
        }
    }

    #[test]
    fn test_easy_covers_whole_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let q = Question::generate(DifficultyLevel::Easy, &mut rng);
            seen[q.num1() as usize] = true;
            seen[q.num2() as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    proptest! {
        #[test]
        fn prop_operands_in_range(seed in any::<u64>(), idx in 0usize..4) {
            let level = DifficultyLevel::ALL[idx];
            let mut rng = Pcg32::seed_from_u64(seed);
            let q = Question::generate(level, &mut rng);
            let range = level.range();
            prop_assert!(range.contains(q.num1()));
            prop_assert!(range.contains(q.num2()));
            prop_assert_eq!(q.answer(), q.num1() * q.num2());
        }
    }
}
