// Number parsing and expression (re)tokenization
//
// History records store expressions as text like "2.0 + 3.0 * 4.0". Operands
// and operators strictly alternate and are separated by whitespace, so a
// leading '-' is part of a number in operand position and a subtraction in
// operator position ("-3.0 - -2.0").

use crate::operator::BinaryOp;
use crate::value::RuntimeError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(BinaryOp),
}

/// Parse one user-entered number.
///
/// Surrounding whitespace is ignored. Infinities and NaN are rejected since
/// they cannot be stored in history.
pub fn parse_number(input: &str) -> Result<f64, RuntimeError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(RuntimeError::InvalidNumericInput(trimmed.to_string())),
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, RuntimeError> {
    let mut tokens = Vec::new();
    let mut expect_operand = true;

    for word in input.split_whitespace() {
        let token = if expect_operand {
            Token::Number(parse_number(word)?)
        } else {
            Token::Operator(word.parse()?)
        };
        tokens.push(token);
        expect_operand = !expect_operand;
    }

    Ok(tokens)
}

/// Rebuild the operand and operator sequences from an expression string.
pub fn parse_expression(input: &str) -> Result<(Vec<f64>, Vec<BinaryOp>), RuntimeError> {
    let mut operands = Vec::new();
    let mut operators = Vec::new();

    for token in tokenize(input)? {
        match token {
            Token::Number(n) => operands.push(n),
            Token::Operator(op) => operators.push(op),
        }
    }

    // A trailing operator leaves the sequences unbalanced
    if operands.is_empty() || operators.len() != operands.len() - 1 {
        return Err(RuntimeError::ArityMismatch {
            operands: operands.len(),
            operators: operators.len(),
        });
    }
    Ok((operands, operators))
}

/// Render sequences as `"<n0> <op0> <n1> ..."`.
///
/// Numbers use the shortest representation that parses back to the same
/// `f64`, always with a decimal point or exponent (`2.0`, `0.1`, `1e16`).
pub fn format_expression(operands: &[f64], operators: &[BinaryOp]) -> String {
    let mut expr = String::new();
    for (i, n) in operands.iter().enumerate() {
        if i > 0 {
            if let Some(op) = operators.get(i - 1) {
                expr.push_str(&format!(" {} ", op));
            }
        }
        expr.push_str(&format!("{:?}", n));
    }
    expr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::BinaryOp::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12").unwrap(), 12.0);
        assert_eq!(parse_number("  12.5\n").unwrap(), 12.5);
        assert_eq!(parse_number("-3e2").unwrap(), -300.0);
    }

    #[test]
    fn test_parse_number_rejects() {
        assert_eq!(
            parse_number(" abc "),
            Err(RuntimeError::InvalidNumericInput("abc".to_string()))
        );
        assert!(parse_number("").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }

    #[test]
    fn test_tokenize_alternates() {
        let tokens = tokenize("2.0  + 3.0\t^ 2.0 ").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator(Add),
                Token::Number(3.0),
                Token::Operator(Pow),
                Token::Number(2.0),
            ]
        );
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_negative_operands() {
        let (nums, ops) = parse_expression("-3.0 - -2.0").unwrap();
        assert_eq!(nums, vec![-3.0, -2.0]);
        assert_eq!(ops, vec![Sub]);
    }

    #[test]
    fn test_parse_expression_errors() {
        assert!(matches!(
            parse_expression("2.0 % 3.0"),
            Err(RuntimeError::UnknownOperator(_))
        ));
        assert!(matches!(
            parse_expression("2.0 +"),
            Err(RuntimeError::ArityMismatch { operands: 1, operators: 1 })
        ));
        assert!(matches!(
            parse_expression(""),
            Err(RuntimeError::ArityMismatch { operands: 0, operators: 0 })
        ));
        assert!(matches!(
            parse_expression("2.0 + +"),
            Err(RuntimeError::InvalidNumericInput(_))
        ));
    }

    #[test]
    fn test_format_expression() {
        assert_eq!(format_expression(&[2.0, 3.0, 4.0], &[Add, Mul]), "2.0 + 3.0 * 4.0");
        assert_eq!(format_expression(&[0.1], &[]), "0.1");
        assert_eq!(format_expression(&[-3.0, -2.0], &[Sub]), "-3.0 - -2.0");
    }

    #[test]
    fn test_format_parses_back() {
        let nums = vec![1.0 / 3.0, 1e16, 2.5e-8];
        let ops = vec![Pow, Div];
        let (n2, o2) = parse_expression(&format_expression(&nums, &ops)).unwrap();
        assert_eq!(n2, nums);
        assert_eq!(o2, ops);
    }
}
