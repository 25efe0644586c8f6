//! Roll formulas: building them from sheet data and evaluating them.
//!
//! A formula is a single dice pool followed by signed flat terms, e.g.
//! `1d20 +3 -2` or `2d20kh +5`. Building never validates; evaluation parses
//! the text and fails with [`MechError::Formula`] if it is malformed.

use std::fmt;
use std::str::FromStr;

use logos::Logos;
use rand::Rng;

use super::pool::{DicePool, Keep};
use super::roll::RollResult;
use super::Die;
use crate::error::{MechError, MechResult};

/// Assembles a formula string from a dice pool, a modifier, and a bonus/malus.
///
/// The output is `"<dice> <modifier>"`, with `" <±bonus>"` appended only
/// when the bonus/malus is non-zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaBuilder {
    dice: String,
    modifier: Option<String>,
    bonus_malus: i32,
}

impl FormulaBuilder {
    /// Start from a dice pool expression such as `"1d20"`.
    pub fn new(dice: impl Into<String>) -> Self {
        Self {
            dice: dice.into(),
            modifier: None,
            bonus_malus: 0,
        }
    }

    /// Use a numeric modifier, rendered with an explicit sign.
    pub fn modifier(mut self, modifier: i32) -> Self {
        self.modifier = Some(signed(modifier));
        self
    }

    /// Use a modifier exactly as written (e.g. `"+3"`).
    pub fn modifier_text(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    /// Set the situational bonus (positive) or malus (negative).
    pub fn bonus_malus(mut self, bonus_malus: i32) -> Self {
        self.bonus_malus = bonus_malus;
        self
    }

    /// Render the formula string.
    pub fn build(&self) -> String {
        let mut formula = self.dice.clone();
        if let Some(modifier) = &self.modifier {
            formula.push(' ');
            formula.push_str(modifier);
        }
        if self.bonus_malus != 0 {
            formula.push(' ');
            formula.push_str(&signed(self.bonus_malus));
        }
        formula
    }
}

fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Raw formula token, borrowing from the source text.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
enum RawToken<'a> {
    #[regex(r"[0-9]*[dD][0-9]+([kK][hHlL][0-9]*)?", |lex| lex.slice())]
    Dice(&'a str),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,
}

impl fmt::Display for RawToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dice(d) => write!(f, "{d}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// A parsed formula, ready to roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    pool: DicePool,
    modifier: i32,
}

impl Formula {
    /// Parse a formula string.
    pub fn parse(source: &str) -> MechResult<Self> {
        let mut lexer = RawToken::lexer(source);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            match result {
                Ok(token) => tokens.push(token),
                Err(()) => {
                    return Err(MechError::Formula(format!(
                        "unexpected '{}' at position {} in \"{source}\"",
                        lexer.slice(),
                        lexer.span().start
                    )));
                }
            }
        }

        let mut tokens = tokens.into_iter();
        let pool = match tokens.next() {
            Some(RawToken::Dice(text)) => parse_pool(text)?,
            Some(other) => {
                return Err(MechError::Formula(format!(
                    "formula must start with a dice pool, found '{other}'"
                )));
            }
            None => return Err(MechError::Formula("empty formula".into())),
        };

        let mut modifier: i64 = 0;
        while let Some(token) = tokens.next() {
            let sign = match token {
                RawToken::Plus => 1,
                RawToken::Minus => -1,
                other => {
                    return Err(MechError::Formula(format!(
                        "expected '+' or '-' before '{other}'"
                    )));
                }
            };
            let term = match tokens.next() {
                Some(RawToken::Number(n)) => n,
                Some(RawToken::Dice(d)) => {
                    return Err(MechError::Formula(format!(
                        "only one dice pool is supported, found '{d}'"
                    )));
                }
                Some(other) => {
                    return Err(MechError::Formula(format!(
                        "expected a number after sign, found '{other}'"
                    )));
                }
                None => return Err(MechError::Formula("formula ends with a sign".into())),
            };
            modifier = modifier
                .checked_add(sign * term)
                .ok_or_else(|| MechError::Formula("modifier overflow".into()))?;
        }

        let modifier = i32::try_from(modifier)
            .map_err(|_| MechError::Formula(format!("modifier {modifier} out of range")))?;

        Ok(Self {
            source: source.to_string(),
            pool,
            modifier,
        })
    }

    /// The dice pool.
    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// Sum of the flat terms.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Roll the pool against `rng`.
    pub fn evaluate<R: Rng + ?Sized>(&self, rng: &mut R) -> RollResult {
        let dice = self.pool.roll(rng);
        let result = RollResult {
            dice,
            modifier: self.modifier,
        };
        tracing::debug!(formula = %self.source, result = %result, "evaluated formula");
        result
    }
}

impl FromStr for Formula {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse a pool token like `2d20kh`, `d6`, or `4d6kl2`.
fn parse_pool(text: &str) -> MechResult<DicePool> {
    let lower = text.to_ascii_lowercase();
    let invalid = |reason: &str| MechError::Formula(format!("invalid dice pool '{text}': {reason}"));

    let (count, rest) = lower
        .split_once('d')
        .ok_or_else(|| invalid("missing 'd'"))?;
    let count = if count.is_empty() {
        1
    } else {
        count.parse::<u32>().map_err(|_| invalid("bad die count"))?
    };

    let (faces, keep) = match rest.split_once('k') {
        Some((faces, keep)) => (faces, Some(keep)),
        None => (rest, None),
    };
    let faces = faces.parse::<u32>().map_err(|_| invalid("bad face count"))?;
    let die = Die::from_sides(faces).ok_or_else(|| invalid("a die needs at least two faces"))?;

    let keep = match keep {
        None => Keep::All,
        Some(suffix) => {
            let mut chars = suffix.chars();
            let mode = chars.next().ok_or_else(|| invalid("keep must be 'kh' or 'kl'"))?;
            let n = chars.as_str();
            let n = if n.is_empty() {
                1
            } else {
                n.parse::<u32>().map_err(|_| invalid("bad keep count"))?
            };
            match mode {
                'h' => Keep::Highest(n),
                'l' => Keep::Lowest(n),
                _ => return Err(invalid("keep must be 'kh' or 'kl'")),
            }
        }
    };

    let pool = DicePool { die, count, keep };
    pool.validate()?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn builder_omits_zero_bonus() {
        insta::assert_snapshot!(FormulaBuilder::new("1d20").modifier(3).build(), @"1d20 +3");
        insta::assert_snapshot!(
            FormulaBuilder::new("1d20").modifier(3).bonus_malus(0).build(),
            @"1d20 +3"
        );
    }

    #[test]
    fn builder_signs_bonus_malus() {
        insta::assert_snapshot!(
            FormulaBuilder::new("1d20").modifier(3).bonus_malus(-2).build(),
            @"1d20 +3 -2"
        );
        insta::assert_snapshot!(
            FormulaBuilder::new("2d20kh").modifier_text("+4").bonus_malus(1).build(),
            @"2d20kh +4 +1"
        );
    }

    #[test]
    fn builder_negative_and_missing_modifier() {
        assert_eq!(FormulaBuilder::new("1d20").modifier(-1).build(), "1d20 -1");
        assert_eq!(FormulaBuilder::new("1d20").modifier(0).build(), "1d20 +0");
        assert_eq!(FormulaBuilder::new("1d20").build(), "1d20");
    }

    #[test]
    fn parse_simple() {
        let f = Formula::parse("1d20 +3 -2").unwrap();
        assert_eq!(*f.pool(), DicePool::new(Die::D20, 1));
        assert_eq!(f.modifier(), 1);
        assert_eq!(f.to_string(), "1d20 +3 -2");
    }

    #[test]
    fn parse_spaced_terms_and_bare_die() {
        let f = Formula::parse("d6 + 2").unwrap();
        assert_eq!(*f.pool(), DicePool::new(Die::D6, 1));
        assert_eq!(f.modifier(), 2);
    }

    #[test]
    fn parse_keep_modes() {
        let f: Formula = "2d20kh +5".parse().unwrap();
        assert_eq!(f.pool().keep, Keep::Highest(1));
        let f = Formula::parse("4D6KL2").unwrap();
        assert_eq!(f.pool().keep, Keep::Lowest(2));
    }

    #[test]
    fn parse_errors() {
        for bad in [
            "", "abc", "+3", "1d1", "0d6", "2d20kh3", "1d20 +", "1d20 3", "1d20 + 1d6",
            "1d20 +-2", "1d20 * 2", "2d20k",
        ] {
            assert!(
                matches!(Formula::parse(bad), Err(MechError::Formula(_))),
                "expected failure for {bad:?}"
            );
        }
    }

    #[test]
    fn single_die_has_one_kept_result() {
        let f = Formula::parse("1d20 +2").unwrap();
        for seed in 0..100 {
            let roll = f.evaluate(&mut StdRng::seed_from_u64(seed));
            assert_eq!(roll.all_results().len(), 1);
            assert_eq!(roll.kept(), Some(roll.all_results()[0]));
            assert_eq!(roll.total(), roll.all_results()[0] as i32 + 2);
        }
    }

    #[test]
    fn advantage_keeps_highest() {
        let f = Formula::parse("2d20kh").unwrap();
        for seed in 0..100 {
            let roll = f.evaluate(&mut StdRng::seed_from_u64(seed));
            let all = roll.all_results();
            assert_eq!(all.len(), 2);
            assert_eq!(roll.kept(), all.iter().copied().max());
        }
    }
}
