// Binary and unary operator tokens

use std::fmt;
use std::str::FromStr;

use crate::value::RuntimeError;

// RUST CONCEPT: Precedence tiers are ordered so that `Tier::Power < Tier::Product`
// The evaluator reduces tiers in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Power,   // ^
    Product, // * /
    Sum,     // + -
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Pow,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Pow,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Pow => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
        }
    }

    pub fn tier(self) -> Tier {
        match self {
            BinaryOp::Pow => Tier::Power,
            BinaryOp::Mul | BinaryOp::Div => Tier::Product,
            BinaryOp::Add | BinaryOp::Sub => Tier::Sum,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinaryOp {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "^" => Ok(BinaryOp::Pow),
            "*" => Ok(BinaryOp::Mul),
            "/" => Ok(BinaryOp::Div),
            "+" => Ok(BinaryOp::Add),
            "-" => Ok(BinaryOp::Sub),
            other => Err(RuntimeError::UnknownOperator(other.to_string())),
        }
    }
}

// Unary operations replace the last operand and never consume an operator slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Sqrt,
    Factorial,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Factorial => "fact",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnaryOp {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "sqrt" => Ok(UnaryOp::Sqrt),
            "fact" => Ok(UnaryOp::Factorial),
            _ => Err(RuntimeError::UnknownOperator(token)),
        }
    }
}
