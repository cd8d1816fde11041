//! Core computation logic for math and comparison nodes

use crate::nodes::value::Value;
use std::cmp::Ordering;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Min,
    Max,
    Pow,
}

impl MathOp {
    pub const ALL: [MathOp; 8] = [
        MathOp::Add,
        MathOp::Sub,
        MathOp::Mul,
        MathOp::Div,
        MathOp::Mod,
        MathOp::Min,
        MathOp::Max,
        MathOp::Pow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MathOp::Add => "Add",
            MathOp::Sub => "Subtract",
            MathOp::Mul => "Multiply",
            MathOp::Div => "Divide",
            MathOp::Mod => "Modulo",
            MathOp::Min => "Min",
            MathOp::Max => "Max",
            MathOp::Pow => "Power",
        }
    }

    /// Library type name, e.g. `Math.Add`
    pub fn node_type(&self) -> &'static str {
        match self {
            MathOp::Add => "Math.Add",
            MathOp::Sub => "Math.Subtract",
            MathOp::Mul => "Math.Multiply",
            MathOp::Div => "Math.Divide",
            MathOp::Mod => "Math.Modulo",
            MathOp::Min => "Math.Min",
            MathOp::Max => "Math.Max",
            MathOp::Pow => "Math.Power",
        }
    }

    /// Apply the operator. Integral operands stay integral with wrapping
    /// arithmetic; a float operand promotes the result to float. Integer
    /// division or modulo by zero falls back to float (infinity or NaN).
    pub fn apply(&self, a: &Value, b: &Value) -> Value {
        if a.is_integral() && b.is_integral() {
            if let Some(result) = self.apply_int(a.as_int(), b.as_int()) {
                return Value::Int(result);
            }
        }
        Value::Float(self.apply_float(a.as_float(), b.as_float()))
    }

    fn apply_int(&self, a: i64, b: i64) -> Option<i64> {
        match self {
            MathOp::Add => Some(a.wrapping_add(b)),
            MathOp::Sub => Some(a.wrapping_sub(b)),
            MathOp::Mul => Some(a.wrapping_mul(b)),
            MathOp::Div => (b != 0).then(|| a.wrapping_div(b)),
            MathOp::Mod => (b != 0).then(|| a.wrapping_rem(b)),
            MathOp::Min => Some(a.min(b)),
            MathOp::Max => Some(a.max(b)),
            MathOp::Pow => u32::try_from(b).ok().map(|exp| a.wrapping_pow(exp)),
        }
    }

    fn apply_float(&self, a: f64, b: f64) -> f64 {
        match self {
            MathOp::Add => a + b,
            MathOp::Sub => a - b,
            MathOp::Mul => a * b,
            MathOp::Div => a / b,
            MathOp::Mod => a % b,
            MathOp::Min => a.min(b),
            MathOp::Max => a.max(b),
            MathOp::Pow => a.powf(b),
        }
    }
}

/// Comparison operators producing a Bool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Less,
    LessEq,
    Equal,
    NotEqual,
    GreaterEq,
    Greater,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Less,
        CompareOp::LessEq,
        CompareOp::Equal,
        CompareOp::NotEqual,
        CompareOp::GreaterEq,
        CompareOp::Greater,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CompareOp::Less => "Less",
            CompareOp::LessEq => "Less or Equal",
            CompareOp::Equal => "Equal",
            CompareOp::NotEqual => "Not Equal",
            CompareOp::GreaterEq => "Greater or Equal",
            CompareOp::Greater => "Greater",
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            CompareOp::Less => "Compare.Less",
            CompareOp::LessEq => "Compare.LessEq",
            CompareOp::Equal => "Compare.Equal",
            CompareOp::NotEqual => "Compare.NotEqual",
            CompareOp::GreaterEq => "Compare.GreaterEq",
            CompareOp::Greater => "Compare.Greater",
        }
    }

    /// Text compares with text lexically, everything else numerically.
    /// Any comparison involving NaN is false except NotEqual.
    pub fn apply(&self, a: &Value, b: &Value) -> Value {
        let ordering = match (a, b) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ if a.is_integral() && b.is_integral() => Some(a.as_int().cmp(&b.as_int())),
            _ => a.as_float().partial_cmp(&b.as_float()),
        };
        let result = match ordering {
            Some(ordering) => self.holds(ordering),
            None => *self == CompareOp::NotEqual,
        };
        Value::Bool(result)
    }

    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Less => ordering == Ordering::Less,
            CompareOp::LessEq => ordering != Ordering::Greater,
            CompareOp::Equal => ordering == Ordering::Equal,
            CompareOp::NotEqual => ordering != Ordering::Equal,
            CompareOp::GreaterEq => ordering != Ordering::Less,
            CompareOp::Greater => ordering == Ordering::Greater,
        }
    }
}
