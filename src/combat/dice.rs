//! Hit dice
//!
//! Parsing and rolling of "NdM" dice expressions from content data.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A dice expression like `2d6`: roll two six-sided dice and sum them.
///
/// Serialized as its textual form so content files can simply write
/// `hit_die: "2d6"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HitDie {
    pub count: u32,
    pub sides: u32,
}

impl HitDie {
    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Roll the dice and return the total.
    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        if self.count == 0 || self.sides == 0 {
            return 0;
        }
        (0..self.count)
            .map(|_| rng.gen_range(1..=self.sides) as i32)
            .sum()
    }

    /// Highest possible roll.
    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32
    }

    /// A die with `extra` more dice of the same size.
    pub fn with_extra_dice(&self, extra: i32) -> Self {
        let count = (self.count as i32 + extra).max(0) as u32;
        Self::new(count, self.sides)
    }
}

impl fmt::Display for HitDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl FromStr for HitDie {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, sides) = s
            .split_once('d')
            .ok_or_else(|| GameError::UnknownKey(format!("hit die {s}")))?;
        let count = count
            .trim()
            .parse()
            .map_err(|_| GameError::UnknownKey(format!("hit die {s}")))?;
        let sides = sides
            .trim()
            .parse()
            .map_err(|_| GameError::UnknownKey(format!("hit die {s}")))?;
        Ok(Self { count, sides })
    }
}

impl TryFrom<String> for HitDie {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HitDie> for String {
    fn from(die: HitDie) -> Self {
        die.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_dice_expressions() {
        let die: HitDie = "2d8".parse().unwrap();
        assert_eq!(die, HitDie::new(2, 8));
        assert_eq!(die.to_string(), "2d8");
        assert!("banana".parse::<HitDie>().is_err());
        assert!("2dx".parse::<HitDie>().is_err());
    }

    #[test]
    fn rolls_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let die = HitDie::new(3, 6);
        for _ in 0..100 {
            let roll = die.roll(&mut rng);
            assert!((3..=18).contains(&roll));
        }
    }

    #[test]
    fn single_sided_dice_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(0);
        // Nd1 always rolls N, which tests lean on heavily
        assert_eq!(HitDie::new(10, 1).roll(&mut rng), 10);
        assert_eq!(HitDie::new(0, 6).roll(&mut rng), 0);
    }

    #[test]
    fn extra_dice_grow_the_pool() {
        let die = HitDie::new(2, 6);
        assert_eq!(die.with_extra_dice(1), HitDie::new(3, 6));
        assert_eq!(die.with_extra_dice(-5), HitDie::new(0, 6));
    }
}
