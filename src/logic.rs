//! The ternary signal algebra shared by every catalog part.
//!
//! Levels are `Low`, `High`, or `Floating` (undriven/unknown). `Floating`
//! is absorbing for the combinational operators: if either operand floats,
//! so does the result. The operators are implemented as the standard
//! bit-op traits so gate models read like plain boolean expressions.

use serde::{Deserialize, Serialize};

/// A ternary logic level carried by signals and IC pins.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogicLevel {
    /// Driven low (logic 0).
    Low,
    /// Driven high (logic 1).
    High,
    /// Undriven or unknown.
    #[default]
    Floating,
}

impl LogicLevel {
    /// Returns the boolean reading of a driven level, or `None` for `Floating`.
    pub fn try_as_bool(self) -> Option<bool> {
        match self {
            LogicLevel::Low => Some(false),
            LogicLevel::High => Some(true),
            LogicLevel::Floating => None,
        }
    }

    /// Parses the test-vector spelling of a level.
    ///
    /// `0`/`LOW`/`low` and `1`/`HIGH`/`high` are the driven spellings;
    /// every other token reads as `Floating`.
    pub fn parse(s: &str) -> Self {
        match s {
            "0" | "LOW" | "low" => LogicLevel::Low,
            "1" | "HIGH" | "high" => LogicLevel::High,
            _ => LogicLevel::Floating,
        }
    }
}

impl From<bool> for LogicLevel {
    fn from(value: bool) -> Self {
        match value {
            true => Self::High,
            false => Self::Low,
        }
    }
}

impl std::ops::BitAnd for LogicLevel {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        match self.try_as_bool().zip(rhs.try_as_bool()) {
            Some((a, b)) => Self::from(a & b),
            None => Self::Floating,
        }
    }
}
impl std::ops::BitOr for LogicLevel {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self.try_as_bool().zip(rhs.try_as_bool()) {
            Some((a, b)) => Self::from(a | b),
            None => Self::Floating,
        }
    }
}
impl std::ops::BitXor for LogicLevel {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        match self.try_as_bool().zip(rhs.try_as_bool()) {
            Some((a, b)) => Self::from(a ^ b),
            None => Self::Floating,
        }
    }
}
impl std::ops::Not for LogicLevel {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            LogicLevel::High => Self::Low,
            LogicLevel::Low => Self::High,
            LogicLevel::Floating => Self::Floating,
        }
    }
}

impl std::fmt::Display for LogicLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogicLevel::Low => "LOW (0)",
            LogicLevel::High => "HIGH (1)",
            LogicLevel::Floating => "FLOATING (Z)",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::LogicLevel::{self, Floating, High, Low};

    const DRIVEN: [LogicLevel; 2] = [Low, High];

    #[test]
    fn and_truth_table() {
        assert_eq!(Low & Low, Low);
        assert_eq!(Low & High, Low);
        assert_eq!(High & Low, Low);
        assert_eq!(High & High, High);
    }

    #[test]
    fn or_truth_table() {
        assert_eq!(Low | Low, Low);
        assert_eq!(Low | High, High);
        assert_eq!(High | Low, High);
        assert_eq!(High | High, High);
    }

    #[test]
    fn xor_truth_table() {
        assert_eq!(Low ^ Low, Low);
        assert_eq!(Low ^ High, High);
        assert_eq!(High ^ Low, High);
        assert_eq!(High ^ High, Low);
    }

    #[test]
    fn floating_absorbs_binary_ops() {
        for lvl in [Low, High, Floating] {
            assert_eq!(lvl & Floating, Floating);
            assert_eq!(Floating & lvl, Floating);
            assert_eq!(lvl | Floating, Floating);
            assert_eq!(Floating | lvl, Floating);
            assert_eq!(lvl ^ Floating, Floating);
            assert_eq!(Floating ^ lvl, Floating);
        }
    }

    #[test]
    fn not_is_involution_on_driven_levels() {
        for lvl in DRIVEN {
            assert_ne!(!lvl, lvl);
            assert_eq!(!!lvl, lvl);
        }
    }

    #[test]
    fn not_fixes_floating() {
        assert_eq!(!Floating, Floating);
    }

    #[test]
    fn parse_recognized_spellings() {
        assert_eq!(LogicLevel::parse("0"), Low);
        assert_eq!(LogicLevel::parse("LOW"), Low);
        assert_eq!(LogicLevel::parse("low"), Low);
        assert_eq!(LogicLevel::parse("1"), High);
        assert_eq!(LogicLevel::parse("HIGH"), High);
        assert_eq!(LogicLevel::parse("high"), High);
    }

    #[test]
    fn parse_everything_else_floats() {
        for s in ["", "Z", "X", "2", "Hi", "floating"] {
            assert_eq!(LogicLevel::parse(s), Floating);
        }
    }

    #[test]
    fn display_spellings() {
        assert_eq!(Low.to_string(), "LOW (0)");
        assert_eq!(High.to_string(), "HIGH (1)");
        assert_eq!(Floating.to_string(), "FLOATING (Z)");
    }
}
