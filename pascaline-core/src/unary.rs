// Unary operations: square root and factorial
//
// Both take the most recently entered operand and return its replacement.
// The caller swaps the result in place; on error the operand is left as it was.

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use crate::operator::UnaryOp;
use crate::value::RuntimeError;

// Largest n whose factorial is still a finite f64 (170! ≈ 7.26e306)
pub const MAX_FACTORIAL: u64 = 170;

pub fn apply(op: UnaryOp, x: f64) -> Result<f64, RuntimeError> {
    match op {
        UnaryOp::Sqrt => sqrt(x),
        UnaryOp::Factorial => factorial(x),
    }
}

// RUST CONCEPT: Square root with domain checking
pub fn sqrt(x: f64) -> Result<f64, RuntimeError> {
    if x < 0.0 {
        return Err(RuntimeError::InvalidOperand(
            "sqrt of a negative number".to_string(),
        ));
    }
    Ok(x.sqrt())
}

// RUST CONCEPT: Exact factorial with BigInt accumulation
// The product is built as an arbitrary precision integer and converted once at the end
pub fn factorial(x: f64) -> Result<f64, RuntimeError> {
    if x.fract() != 0.0 || x < 0.0 {
        return Err(RuntimeError::InvalidOperand(
            "fact only accepts integers >= 0".to_string(),
        ));
    }

    let n = x as u64;
    if n > MAX_FACTORIAL {
        return Err(RuntimeError::DomainError(format!(
            "fact({}) is too large to represent",
            n
        )));
    }

    let product = (2..=n).fold(BigInt::one(), |acc, i| acc * i);
    product
        .to_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| RuntimeError::DomainError(format!("fact({}) is too large to represent", n)))
}
