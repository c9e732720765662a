//! # Dice Notation
//!
//! Hazard and trap damage is authored as dice notation: `NdS` with an
//! optional flat modifier, e.g. `2d6`, `1d8+2`, `3d4-1`. The schemas
//! constrain the text with `^\d+d\d+([+-]\d+)?$`; [`DiceExpression`] parses
//! it into numbers and rejects zero dice or zero-sided dice, which the
//! pattern alone lets through.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RnrError;

/// A parsed `NdS[+/-M]` dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpression {
    count: u32,
    sides: u32,
    modifier: i32,
}

impl DiceExpression {
    /// Build an expression from its parts.
    pub fn new(count: u32, sides: u32, modifier: i32) -> Result<Self, RnrError> {
        if count == 0 {
            return Err(invalid(format!("{count}d{sides}"), "dice count must be at least 1"));
        }
        if sides == 0 {
            return Err(invalid(format!("{count}d{sides}"), "dice must have at least 1 side"));
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Number of dice rolled.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Faces per die.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Flat modifier added to the roll.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Lowest possible total.
    pub fn min_roll(&self) -> i64 {
        i64::from(self.count) + i64::from(self.modifier)
    }

    /// Highest possible total.
    pub fn max_roll(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier)
    }

    /// Expected total.
    pub fn average(&self) -> f64 {
        f64::from(self.count) * (f64::from(self.sides) + 1.0) / 2.0 + f64::from(self.modifier)
    }
}

fn invalid(value: impl Into<String>, reason: &'static str) -> RnrError {
    RnrError::InvalidDice {
        value: value.into(),
        reason,
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for DiceExpression {
    type Err = RnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, rest) = s
            .split_once('d')
            .ok_or_else(|| invalid(s, "expected NdS"))?;
        let count = parse_digits(count).ok_or_else(|| invalid(s, "dice count is not a number"))?;

        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let (sides, signed) = rest.split_at(idx);
                let magnitude = parse_digits(&signed[1..])
                    .and_then(|m| i32::try_from(m).ok())
                    .ok_or_else(|| invalid(s, "modifier is not a number"))?;
                let modifier = if signed.starts_with('-') { -magnitude } else { magnitude };
                (sides, modifier)
            }
            None => (rest, 0),
        };
        let sides = parse_digits(sides).ok_or_else(|| invalid(s, "die size is not a number"))?;

        Self::new(count, sides, modifier).map_err(|e| match e {
            RnrError::InvalidDice { reason, .. } => invalid(s, reason),
            other => other,
        })
    }
}

impl TryFrom<String> for DiceExpression {
    type Error = RnrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiceExpression> for String {
    fn from(d: DiceExpression) -> Self {
        d.to_string()
    }
}

impl std::fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let d: DiceExpression = "2d6".parse().unwrap();
        assert_eq!((d.count(), d.sides(), d.modifier()), (2, 6, 0));
        assert_eq!(d.min_roll(), 2);
        assert_eq!(d.max_roll(), 12);
        assert!((d.average() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_modifiers() {
        let plus: DiceExpression = "1d8+2".parse().unwrap();
        assert_eq!(plus.modifier(), 2);
        assert_eq!(plus.max_roll(), 10);

        let minus: DiceExpression = "3d4-1".parse().unwrap();
        assert_eq!(minus.modifier(), -1);
        assert_eq!(minus.min_roll(), 2);
        assert_eq!(minus.to_string(), "3d4-1");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in ["", "d6", "2d", "2x6", "2d6+", "2d6+a", "0d6", "2d0", "-1d6", "2d6 +1", "2D6"] {
            assert!(s.parse::<DiceExpression>().is_err(), "{s:?} should be rejected");
        }
    }

    #[test]
    fn test_error_carries_input() {
        let err = "0d6".parse::<DiceExpression>().unwrap_err();
        assert!(err.to_string().contains("0d6"));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_serde_as_string() {
        let d: DiceExpression = serde_json::from_str("\"1d10+3\"").unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"1d10+3\"");
        assert!(serde_json::from_str::<DiceExpression>("\"fire\"").is_err());
    }
}
