use std::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Results within this distance of an integer are shown and stored as that integer
pub const INTEGRAL_TOLERANCE: f64 = 1e-12;

// RUST CONCEPT: A display value is either an exact integer or a float
// Integer: the evaluator's f64 result snapped to its nearest integer
// Number: any other finite result, kept as-is
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(BigInt),
    Number(f64),
}

impl Value {
    // RUST CONCEPT: Display normalization (demotion to the simplest form)
    // 6.000000000000001 → Integer(6), 6.3 → Number(6.3)
    // Non-finite inputs have no nearest integer and stay as Number
    pub fn normalize(n: f64) -> Self {
        let nearest = n.round();
        if n.is_finite() && (n - nearest).abs() < INTEGRAL_TOLERANCE {
            if let Some(i) = BigInt::from_f64(nearest) {
                return Value::Integer(i);
            }
        }
        Value::Number(n)
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Value::Integer(i) => i.to_f64().unwrap_or(f64::NAN),
            Value::Number(n) => *n,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            // Shortest round-trip form: 1e-20 rather than 0.00000000000000000001
            Value::Number(n) => write!(f, "{:?}", n),
        }
    }
}

// RUST CONCEPT: Custom serde impls so history stores plain JSON numbers
// Integers are written with all their digits (serde_json `arbitrary_precision`),
// so the stored value is exactly the displayed one, even past i64
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => {
                let digits: serde_json::Number =
                    i.to_string().parse().map_err(serde::ser::Error::custom)?;
                digits.serialize(serializer)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        let text = number.to_string();

        // Integer literals keep every digit; anything else goes through f64
        if let Ok(i) = text.parse::<BigInt>() {
            return Ok(Value::Integer(i));
        }
        text.parse::<f64>()
            .map(Value::normalize)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    InvalidNumericInput(String),
    InvalidOperand(String),
    DivisionByZero,
    InsufficientOperands,
    ArityMismatch { operands: usize, operators: usize },
    UnknownOperator(String),
    DomainError(String),
}

// RUST CONCEPT: Implementing traits for custom error types
// The Display trait allows us to convert errors to strings
impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::InvalidNumericInput(input) => {
                write!(f, "Invalid number: '{}' (e.g. 12 or 12.5)", input)
            }
            RuntimeError::InvalidOperand(msg) => write!(f, "Invalid operand: {}", msg),
            RuntimeError::DivisionByZero => write!(f, "Division by zero"),
            RuntimeError::InsufficientOperands => write!(f, "At least 2 numbers are required"),
            RuntimeError::ArityMismatch {
                operands,
                operators,
            } => write!(
                f,
                "Malformed expression: {} operands need {} operators, got {}",
                operands,
                operands.saturating_sub(1),
                operators
            ),
            RuntimeError::UnknownOperator(token) => write!(f, "Unknown operator: {}", token),
            RuntimeError::DomainError(msg) => write!(f, "Domain error: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_near_integer() {
        assert_eq!(Value::normalize(6.000000000000001), Value::Integer(BigInt::from(6)));
        assert_eq!(Value::normalize(-2.0), Value::Integer(BigInt::from(-2)));
        assert_eq!(Value::normalize(5.999999999999999), Value::Integer(BigInt::from(6)));
    }

    #[test]
    fn test_normalize_keeps_fraction() {
        assert_eq!(Value::normalize(6.3), Value::Number(6.3));
        assert_eq!(Value::normalize(1e-9), Value::Number(1e-9));
    }

    #[test]
    fn test_normalize_non_finite() {
        assert!(matches!(Value::normalize(f64::INFINITY), Value::Number(n) if n.is_infinite()));
        assert!(matches!(Value::normalize(f64::NAN), Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::normalize(6.000000000000001).to_string(), "6");
        assert_eq!(Value::normalize(6.3).to_string(), "6.3");
        assert_eq!(Value::normalize(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn test_display_small_and_large_numbers() {
        assert_eq!(Value::normalize(1e-20).to_string(), "1e-20");
        assert_eq!(Value::normalize(0.1 * 3.0).to_string(), "0.30000000000000004");
        assert_eq!(Value::normalize(-2.5).to_string(), "-2.5");
    }

    #[test]
    fn test_json_keeps_integers_past_i64() {
        let big = Value::normalize(1e20);
        let json = serde_json::to_string(&big).unwrap();
        assert_eq!(json, "100000000000000000000");
        assert_eq!(json, big.to_string());

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, big);

        // Float literals that land on an integer are normalized on load
        let back: Value = serde_json::from_str("1e+20").unwrap();
        assert_eq!(back, big);
    }

    #[test]
    fn test_json_numbers() {
        let json = serde_json::to_string(&Value::normalize(120.0)).unwrap();
        assert_eq!(json, "120");

        let json = serde_json::to_string(&Value::normalize(2.5)).unwrap();
        assert_eq!(json, "2.5");

        let back: Value = serde_json::from_str("14").unwrap();
        assert_eq!(back, Value::Integer(BigInt::from(14)));

        let back: Value = serde_json::from_str("6.3").unwrap();
        assert_eq!(back, Value::Number(6.3));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(RuntimeError::DivisionByZero.to_string(), "Division by zero");
        let err = RuntimeError::ArityMismatch {
            operands: 3,
            operators: 1,
        };
        assert_eq!(
            err.to_string(),
            "Malformed expression: 3 operands need 2 operators, got 1"
        );
    }
}
