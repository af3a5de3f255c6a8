//! Stochastic arithmetic and comparison on dice.
//!
//! Every operator evaluation rolls each die operand fresh: `a + b` is the sum
//! of one roll of `a` and one roll of `b`, and evaluating it again rolls again.
//! These operators are not pure and `Die == Die` is not an equivalence
//! relation. Use [`Die::matches`] to compare dice structurally.
//!
//! Operand kinds and result types:
//!
//! | left / right         | `+ - *`  | `/`   | comparisons |
//! |----------------------|----------|-------|-------------|
//! | `Die` and `Die`      | `i128`   | `f64` | roll vs roll |
//! | `Die` and `i64`      | `i128`   | `f64` | roll vs value |
//! | `Die` and `f64`      | `f64`    | `f64` | roll vs value |
//!
//! Integer results are `i128` so any roll combined with any `i64` is exact.
//! `Die * Die` saturates at `i128::MAX`, which needs both rolls above `2^63`.
//!
//! Both operand orders are provided (`5_i64 - &die` subtracts a roll from 5).
//! `/` follows IEEE float semantics; [`Die::floor_div`] is the checked
//! floor-division counterpart.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::die::Die;
use crate::error::{DiceError, Result};
use crate::rng::{RollSource, thread_source};

/// A resolved operand value: integer or float.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Right-hand side of a named dice operation: another die or a number.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Die(&'a Die),
    Int(i64),
    Float(f64),
}

impl Operand<'_> {
    /// Rolls the operand if it is a die, otherwise returns it unchanged.
    pub fn resolve_with<R: RollSource + ?Sized>(&self, source: &mut R) -> Number {
        match *self {
            Operand::Die(die) => Number::Int(signed(die.roll_with(source))),
            Operand::Int(value) => Number::Int(i128::from(value)),
            Operand::Float(value) => Number::Float(value),
        }
    }
}

impl<'a> From<&'a Die> for Operand<'a> {
    fn from(die: &'a Die) -> Self {
        Operand::Die(die)
    }
}

impl From<i64> for Operand<'_> {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

fn signed(total: u64) -> i128 {
    i128::from(total)
}

/// Floor division rounding toward negative infinity.
fn floor_div_int(a: i128, b: i128) -> i128 {
    let quotient = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

fn floor_div_numbers(a: Number, b: Number) -> Result<Number> {
    match (a, b) {
        (_, Number::Int(0)) => Err(DiceError::DivisionByZero),
        (_, Number::Float(divisor)) if divisor == 0.0 => Err(DiceError::DivisionByZero),
        (Number::Int(a), Number::Int(b)) => Ok(Number::Int(floor_div_int(a, b))),
        (a, b) => Ok(Number::Float((a.as_f64() / b.as_f64()).floor())),
    }
}

impl Die {
    fn roll_signed(&self) -> i128 {
        signed(self.roll())
    }

    /// Rolls this die and compares it with `other` (rolled if it is a die).
    ///
    /// Returns `1` if this roll is greater, `0` if equal, `-1` if less; an
    /// incomparable float (NaN) counts as equal. The result is stochastic and
    /// must not be used as a sort key.
    pub fn roll_against<'a>(&self, other: impl Into<Operand<'a>>) -> i8 {
        self.roll_against_with(other, &mut thread_source())
    }

    pub fn roll_against_with<'a, R: RollSource + ?Sized>(
        &self,
        other: impl Into<Operand<'a>>,
        source: &mut R,
    ) -> i8 {
        let roll = Number::Int(signed(self.roll_with(source)));
        let value = other.into().resolve_with(source);
        match roll.compare(value) {
            Some(Ordering::Greater) => 1,
            Some(Ordering::Less) => -1,
            _ => 0,
        }
    }

    /// Rolls this die and floor-divides the roll by `other`.
    ///
    /// Integer operands give [`Number::Int`], float operands [`Number::Float`].
    /// Dividing by a literal zero is [`DiceError::DivisionByZero`].
    pub fn floor_div<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Number> {
        self.floor_div_with(other, &mut thread_source())
    }

    pub fn floor_div_with<'a, R: RollSource + ?Sized>(
        &self,
        other: impl Into<Operand<'a>>,
        source: &mut R,
    ) -> Result<Number> {
        let roll = Number::Int(signed(self.roll_with(source)));
        floor_div_numbers(roll, other.into().resolve_with(source))
    }

    /// Floor-divides `numerator` by a fresh roll of this die.
    ///
    /// The numerator is resolved (rolled, if it is a die) before this die.
    /// A roll is at least 1, so [`DiceError::DivisionByZero`] is unreachable
    /// for a validated die.
    pub fn floor_div_from<'a>(&self, numerator: impl Into<Operand<'a>>) -> Result<Number> {
        self.floor_div_from_with(numerator, &mut thread_source())
    }

    pub fn floor_div_from_with<'a, R: RollSource + ?Sized>(
        &self,
        numerator: impl Into<Operand<'a>>,
        source: &mut R,
    ) -> Result<Number> {
        let numerator = numerator.into().resolve_with(source);
        let roll = Number::Int(signed(self.roll_with(source)));
        floor_div_numbers(numerator, roll)
    }
}

macro_rules! arithmetic {
    (@scalar $trait:ident, $method:ident, $op:tt, $scalar:ty => $output:ty, $widen:expr, $convert:expr) => {
        impl $trait<$scalar> for &Die {
            type Output = $output;
            fn $method(self, rhs: $scalar) -> $output {
                ($convert)(self.roll_signed()) $op ($widen)(rhs)
            }
        }
        impl $trait<$scalar> for Die {
            type Output = $output;
            fn $method(self, rhs: $scalar) -> $output {
                (&self).$method(rhs)
            }
        }
        impl $trait<&Die> for $scalar {
            type Output = $output;
            fn $method(self, rhs: &Die) -> $output {
                ($widen)(self) $op ($convert)(rhs.roll_signed())
            }
        }
        impl $trait<Die> for $scalar {
            type Output = $output;
            fn $method(self, rhs: Die) -> $output {
                self.$method(&rhs)
            }
        }
    };
    ($trait:ident, $method:ident, $op:tt, $saturating:ident) => {
        impl $trait<&Die> for &Die {
            type Output = i128;
            fn $method(self, rhs: &Die) -> i128 {
                self.roll_signed().$saturating(rhs.roll_signed())
            }
        }
        impl $trait<Die> for Die {
            type Output = i128;
            fn $method(self, rhs: Die) -> i128 {
                (&self).$method(&rhs)
            }
        }
        impl $trait<&Die> for Die {
            type Output = i128;
            fn $method(self, rhs: &Die) -> i128 {
                (&self).$method(rhs)
            }
        }
        impl $trait<Die> for &Die {
            type Output = i128;
            fn $method(self, rhs: Die) -> i128 {
                self.$method(&rhs)
            }
        }
        arithmetic!(@scalar $trait, $method, $op, i64 => i128, i128::from, |roll: i128| roll);
        arithmetic!(@scalar $trait, $method, $op, f64 => f64, |value: f64| value, |roll: i128| roll as f64);
    };
}

arithmetic!(Add, add, +, saturating_add);
arithmetic!(Sub, sub, -, saturating_sub);
arithmetic!(Mul, mul, *, saturating_mul);

macro_rules! true_division {
    ($lhs:ty, $rhs:ty, |$a:ident, $b:ident| $body:expr) => {
        impl Div<$rhs> for $lhs {
            type Output = f64;
            fn div(self, rhs: $rhs) -> f64 {
                let ($a, $b) = (self, rhs);
                $body
            }
        }
    };
}

true_division!(&Die, &Die, |a, b| a.roll_signed() as f64 / b.roll_signed() as f64);
true_division!(Die, Die, |a, b| &a / &b);
true_division!(&Die, Die, |a, b| a / &b);
true_division!(Die, &Die, |a, b| &a / b);
true_division!(&Die, i64, |a, b| a.roll_signed() as f64 / b as f64);
true_division!(Die, i64, |a, b| &a / b);
true_division!(i64, &Die, |a, b| a as f64 / b.roll_signed() as f64);
true_division!(i64, Die, |a, b| a / &b);
true_division!(&Die, f64, |a, b| a.roll_signed() as f64 / b);
true_division!(Die, f64, |a, b| &a / b);
true_division!(f64, &Die, |a, b| a / b.roll_signed() as f64);
true_division!(f64, Die, |a, b| a / &b);

impl PartialEq for Die {
    /// Rolls both dice and compares the totals.
    fn eq(&self, other: &Die) -> bool {
        self.roll_signed() == other.roll_signed()
    }
}

impl PartialOrd for Die {
    /// Rolls both dice once and orders the totals.
    fn partial_cmp(&self, other: &Die) -> Option<Ordering> {
        Some(self.roll_signed().cmp(&other.roll_signed()))
    }
}

macro_rules! scalar_comparison {
    ($scalar:ty, $wrap:expr) => {
        impl PartialEq<$scalar> for Die {
            fn eq(&self, other: &$scalar) -> bool {
                self.partial_cmp(other) == Some(Ordering::Equal)
            }
        }
        impl PartialOrd<$scalar> for Die {
            fn partial_cmp(&self, other: &$scalar) -> Option<Ordering> {
                Number::Int(self.roll_signed()).compare(($wrap)(*other))
            }
        }
        impl PartialEq<Die> for $scalar {
            fn eq(&self, other: &Die) -> bool {
                self.partial_cmp(other) == Some(Ordering::Equal)
            }
        }
        impl PartialOrd<Die> for $scalar {
            fn partial_cmp(&self, other: &Die) -> Option<Ordering> {
                ($wrap)(*self).compare(Number::Int(other.roll_signed()))
            }
        }
    };
}

scalar_comparison!(i64, |value: i64| Number::Int(i128::from(value)));
scalar_comparison!(f64, Number::Float);
