//! Dice roll results.

use serde::{Deserialize, Serialize};

use super::Die;

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
    /// Whether this die counts toward the result.
    pub active: bool,
}

/// The result of evaluating a formula: every die rolled plus flat terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results, in roll order.
    pub dice: Vec<DieResult>,
    /// Sum of the flat terms of the formula.
    pub modifier: i32,
}

impl RollResult {
    /// The kept die: the first active result in roll order.
    pub fn kept(&self) -> Option<u32> {
        self.dice.iter().find(|d| d.active).map(|d| d.value)
    }

    /// Every die value, kept or not.
    pub fn all_results(&self) -> Vec<u32> {
        self.dice.iter().map(|d| d.value).collect()
    }

    /// Sum of the active dice plus the modifier.
    pub fn total(&self) -> i32 {
        let dice: i64 = self
            .dice
            .iter()
            .filter(|d| d.active)
            .map(|d| i64::from(d.value))
            .sum();
        i32::try_from(dice + i64::from(self.modifier)).unwrap_or(i32::MAX)
    }

    /// Number of dice rolled.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.active {
                    d.value.to_string()
                } else {
                    format!("({})", d.value)
                }
            })
            .collect();
        write!(f, "[{}]", values.join(", "))?;
        match self.modifier {
            0 => {}
            m if m > 0 => write!(f, " +{m}")?,
            m => write!(f, " {m}")?,
        }
        write!(f, " = {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(values: &[(u32, bool)], modifier: i32) -> RollResult {
        RollResult {
            dice: values
                .iter()
                .map(|&(value, active)| DieResult {
                    die: Die::D20,
                    value,
                    active,
                })
                .collect(),
            modifier,
        }
    }

    #[test]
    fn kept_is_first_active() {
        let r = make_result(&[(4, false), (17, true)], 0);
        assert_eq!(r.kept(), Some(17));
        assert_eq!(r.all_results(), vec![4, 17]);
    }

    #[test]
    fn total_ignores_inactive_dice() {
        let r = make_result(&[(4, false), (17, true)], 3);
        assert_eq!(r.total(), 20);
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.kept(), None);
        assert_eq!(r.total(), 0);
        assert_eq!(r.count(), 0);
    }

    #[test]
    fn display() {
        let r = make_result(&[(19, true), (4, false)], 3);
        assert_eq!(r.to_string(), "[19, (4)] +3 = 22");
        let r = make_result(&[(7, true)], -2);
        assert_eq!(r.to_string(), "[7] -2 = 5");
    }
}
