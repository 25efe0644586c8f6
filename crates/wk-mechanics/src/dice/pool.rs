//! Dice pool construction and rolling.

use rand::Rng;

use super::Die;
use super::roll::DieResult;
use crate::error::{MechError, MechResult};

/// Upper bound on dice in a single pool.
pub const MAX_DICE: u32 = 100;

/// Which dice of a pool count toward the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Keep {
    /// Every die counts.
    #[default]
    All,
    /// Only the `n` highest dice count (advantage).
    Highest(u32),
    /// Only the `n` lowest dice count (disadvantage).
    Lowest(u32),
}

/// A number of identical dice rolled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DicePool {
    /// The die type.
    pub die: Die,
    /// How many dice are rolled.
    pub count: u32,
    /// Which dice are kept.
    pub keep: Keep,
}

impl DicePool {
    /// Create a pool that keeps every die.
    pub fn new(die: Die, count: u32) -> Self {
        Self {
            die,
            count,
            keep: Keep::All,
        }
    }

    /// Keep only the `n` highest dice.
    pub fn keep_highest(mut self, n: u32) -> Self {
        self.keep = Keep::Highest(n);
        self
    }

    /// Keep only the `n` lowest dice.
    pub fn keep_lowest(mut self, n: u32) -> Self {
        self.keep = Keep::Lowest(n);
        self
    }

    /// Check the pool can be rolled.
    pub fn validate(&self) -> MechResult<()> {
        if self.count == 0 {
            return Err(MechError::Formula("a pool needs at least one die".into()));
        }
        if self.count > MAX_DICE {
            return Err(MechError::Formula(format!(
                "a pool holds at most {MAX_DICE} dice"
            )));
        }
        match self.keep {
            Keep::All => Ok(()),
            Keep::Highest(n) | Keep::Lowest(n) if n == 0 || n > self.count => Err(
                MechError::Formula(format!("cannot keep {n} of {} dice", self.count)),
            ),
            Keep::Highest(_) | Keep::Lowest(_) => Ok(()),
        }
    }

    /// Roll every die and mark the kept ones active.
    ///
    /// Ties are broken in roll order, so the earlier die is kept.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DieResult> {
        let mut dice: Vec<DieResult> = (0..self.count)
            .map(|_| DieResult {
                die: self.die,
                value: rng.random_range(1..=self.die.sides()),
                active: matches!(self.keep, Keep::All),
            })
            .collect();

        let (n, highest) = match self.keep {
            Keep::All => return dice,
            Keep::Highest(n) => (n, true),
            Keep::Lowest(n) => (n, false),
        };

        let mut order: Vec<usize> = (0..dice.len()).collect();
        if highest {
            order.sort_by(|&a, &b| dice[b].value.cmp(&dice[a].value));
        } else {
            order.sort_by(|&a, &b| dice[a].value.cmp(&dice[b].value));
        }
        for &index in order.iter().take(n as usize) {
            dice[index].active = true;
        }
        dice
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        match self.keep {
            Keep::All => Ok(()),
            Keep::Highest(1) => write!(f, "kh"),
            Keep::Lowest(1) => write!(f, "kl"),
            Keep::Highest(n) => write!(f, "kh{n}"),
            Keep::Lowest(n) => write!(f, "kl{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn roll_produces_valid_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let dice = DicePool::new(Die::D6, 10).roll(&mut rng);
        assert_eq!(dice.len(), 10);
        for d in &dice {
            assert!((1..=6).contains(&d.value));
            assert!(d.active);
        }
    }

    #[test]
    fn roll_deterministic_with_seed() {
        let pool = DicePool::new(Die::D20, 3);
        let a = pool.roll(&mut StdRng::seed_from_u64(99));
        let b = pool.roll(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn keep_highest_marks_one_maximum() {
        let pool = DicePool::new(Die::D20, 2).keep_highest(1);
        for seed in 0..50 {
            let dice = pool.roll(&mut StdRng::seed_from_u64(seed));
            let active: Vec<_> = dice.iter().filter(|d| d.active).collect();
            assert_eq!(active.len(), 1);
            let max = dice.iter().map(|d| d.value).max().unwrap();
            assert_eq!(active[0].value, max);
        }
    }

    #[test]
    fn keep_lowest_marks_minimum() {
        let pool = DicePool::new(Die::D12, 3).keep_lowest(1);
        for seed in 0..50 {
            let dice = pool.roll(&mut StdRng::seed_from_u64(seed));
            let active: Vec<_> = dice.iter().filter(|d| d.active).collect();
            assert_eq!(active.len(), 1);
            let min = dice.iter().map(|d| d.value).min().unwrap();
            assert_eq!(active[0].value, min);
        }
    }

    #[test]
    fn validate_rejects_bad_pools() {
        assert!(DicePool::new(Die::D6, 0).validate().is_err());
        assert!(DicePool::new(Die::D6, MAX_DICE + 1).validate().is_err());
        assert!(DicePool::new(Die::D20, 2).keep_highest(3).validate().is_err());
        assert!(DicePool::new(Die::D20, 2).keep_lowest(0).validate().is_err());
        assert!(DicePool::new(Die::D20, 2).keep_highest(1).validate().is_ok());
    }

    #[test]
    fn display() {
        assert_eq!(DicePool::new(Die::D20, 1).to_string(), "1d20");
        assert_eq!(DicePool::new(Die::D20, 2).keep_highest(1).to_string(), "2d20kh");
        assert_eq!(DicePool::new(Die::D6, 4).keep_highest(3).to_string(), "4d6kh3");
    }
}
