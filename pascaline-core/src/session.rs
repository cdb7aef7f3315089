// Evaluation session: collects operands and operators as the user enters them

use tracing::debug;

use crate::evaluator::evaluate;
use crate::operator::{BinaryOp, UnaryOp};
use crate::tokenizer::format_expression;
use crate::unary;
use crate::value::{RuntimeError, Value};

// RUST CONCEPT: An immutable record of one finished calculation
// `result` is already display-normalized, so what is printed is what is stored
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub expression: String,
    pub result: Value,
}

/// Owns the operand and operator sequences of one calculation.
///
/// The sequences always satisfy `operators.len() == operands.len() - 1`.
#[derive(Debug, Clone)]
pub struct Session {
    operands: Vec<f64>,
    operators: Vec<BinaryOp>,
}

impl Session {
    pub fn new(first: f64) -> Self {
        Self {
            operands: vec![first],
            operators: Vec::new(),
        }
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    pub fn operators(&self) -> &[BinaryOp] {
        &self.operators
    }

    pub fn last(&self) -> f64 {
        // Never empty: `new` seeds the first operand and nothing pops
        self.operands[self.operands.len() - 1]
    }

    /// Append `op operand`. A zero divisor is rejected here and nothing is appended.
    pub fn push(&mut self, op: BinaryOp, operand: f64) -> Result<(), RuntimeError> {
        if op == BinaryOp::Div && operand == 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
        self.operators.push(op);
        self.operands.push(operand);
        Ok(())
    }

    /// Apply a unary operation to the last operand and return the new value.
    ///
    /// On failure the operand keeps its previous value.
    pub fn apply(&mut self, op: UnaryOp) -> Result<f64, RuntimeError> {
        let index = self.operands.len() - 1;
        let value = unary::apply(op, self.operands[index])?;
        debug!(%op, from = self.operands[index], to = value, "unary applied");
        self.operands[index] = value;
        Ok(value)
    }

    pub fn expression(&self) -> String {
        format_expression(&self.operands, &self.operators)
    }

    /// Evaluate the collected sequence.
    ///
    /// Fewer than two operands is `InsufficientOperands`; evaluator errors pass through.
    pub fn finish(&self) -> Result<Evaluation, RuntimeError> {
        if self.operands.len() < 2 {
            return Err(RuntimeError::InsufficientOperands);
        }
        let result = evaluate(&self.operands, &self.operators)?;
        Ok(Evaluation {
            expression: self.expression(),
            result: Value::normalize(result),
        })
    }
}
