//! Three-pass precedence evaluator
//!
//! Reduces a flat operand/operator sequence to a single number. Exponents are
//! folded first, then products and quotients, then the remaining sums and
//! differences are folded left to right. Within a tier, operators always
//! resolve left to right, so `8 / 4 / 2` is `(8 / 4) / 2`.
//!
//! The caller's slices are never modified: each call copies them into working
//! vectors and reduces those.

use tracing::debug;

use crate::operator::{BinaryOp, Tier};
use crate::value::RuntimeError;

/// Evaluate `operands[0] op[0] operands[1] op[1] ...` with standard precedence.
///
/// Requires `operators.len() == operands.len() - 1`. A single operand with no
/// operators evaluates to itself.
///
/// # Errors
///
/// * `ArityMismatch` if the sequence lengths are inconsistent
/// * `DivisionByZero` if a divisor is exactly zero
/// * `DomainError` if a power or the final result is not a finite number
pub fn evaluate(operands: &[f64], operators: &[BinaryOp]) -> Result<f64, RuntimeError> {
    if operands.is_empty() || operators.len() != operands.len() - 1 {
        return Err(RuntimeError::ArityMismatch {
            operands: operands.len(),
            operators: operators.len(),
        });
    }

    let mut nums = operands.to_vec();
    let mut ops = operators.to_vec();

    reduce_tier(&mut nums, &mut ops, Tier::Power)?;
    reduce_tier(&mut nums, &mut ops, Tier::Product)?;

    // Only + and - remain: a plain left fold, no removal needed
    let result = ops
        .iter()
        .zip(&nums[1..])
        .try_fold(nums[0], |acc, (&op, &rhs)| fold(op, acc, rhs))?;
    debug!(result = result, "sum pass complete");

    if !result.is_finite() {
        return Err(RuntimeError::DomainError(format!(
            "result is not a finite number ({})",
            result
        )));
    }
    Ok(result)
}

// RUST CONCEPT: In-place reduction of one precedence tier
// On a match, nums[i] and nums[i + 1] merge into nums[i] and the operator is dropped.
// The index stays put because the sequence just shrank under it.
fn reduce_tier(
    nums: &mut Vec<f64>,
    ops: &mut Vec<BinaryOp>,
    tier: Tier,
) -> Result<(), RuntimeError> {
    let mut i = 0;
    while i < ops.len() {
        if ops[i].tier() == tier {
            let folded = fold(ops[i], nums[i], nums[i + 1])?;
            debug!(op = %ops[i], lhs = nums[i], rhs = nums[i + 1], folded = folded, "fold");
            nums[i] = folded;
            nums.remove(i + 1);
            ops.remove(i);
        } else {
            i += 1;
        }
    }
    debug!(?tier, remaining = ops.len(), "tier reduced");
    Ok(())
}

fn fold(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, RuntimeError> {
    match op {
        BinaryOp::Pow => power(lhs, rhs),
        BinaryOp::Mul => Ok(lhs * rhs),
        // Divisors are also rejected at entry time; this guards direct callers
        BinaryOp::Div if rhs == 0.0 => Err(RuntimeError::DivisionByZero),
        BinaryOp::Div => Ok(lhs / rhs),
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Sub => Ok(lhs - rhs),
    }
}

// RUST CONCEPT: Exponentiation with NaN/infinity checking
// A negative base with a fractional exponent has no real result
fn power(base: f64, exponent: f64) -> Result<f64, RuntimeError> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(RuntimeError::DomainError(format!(
            "{} ^ {} has no real result",
            base, exponent
        )));
    }

    let result = base.powf(exponent);
    if result.is_nan() {
        return Err(RuntimeError::DomainError("pow result is NaN".to_string()));
    }
    if result.is_infinite() {
        return Err(RuntimeError::DomainError(
            "pow result is infinite".to_string(),
        ));
    }
    Ok(result)
}
