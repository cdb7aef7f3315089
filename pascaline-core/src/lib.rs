//! # Pascaline Core
//!
//! Evaluation library for the Pascaline calculator.
//!
//! A calculation is a flat sequence of numbers joined by binary operators
//! (`^ * / + -`). Unary operations (`sqrt`, `fact`) are applied to the last
//! number as it is entered. `=` hands the whole sequence to the precedence
//! evaluator, and the display-normalized result is appended to a history log.
//!
//! ## Features
//!
//! - **Three-pass precedence**: powers, then products, then sums, each left to right
//! - **Pure evaluator**: works on copies, caller sequences are never modified
//! - **Exact factorial**: accumulated as a `BigInt` before conversion
//! - **Pluggable history**: JSON file or in-memory store behind one trait
//! - **Optional REPL input**: enable line editing with the `repl` feature
//!
//! ## Example
//!
//! ```
//! use pascaline_core::{BinaryOp, Value, evaluate};
//!
//! let result = evaluate(&[2.0, 3.0, 4.0], &[BinaryOp::Add, BinaryOp::Mul]).unwrap();
//! assert_eq!(result, 14.0);
//! assert_eq!(Value::normalize(result).to_string(), "14");
//! ```

// Public modules
pub mod config;
pub mod evaluator;
pub mod history;
pub mod operator;
pub mod repl;
pub mod session;
pub mod tokenizer;
pub mod unary;
pub mod value;

// Re-exports for convenience
pub use config::Config;
pub use evaluator::evaluate;
pub use history::{HistoryError, HistoryRecord, HistoryStore, JsonFileStore, MemoryStore};
pub use operator::{BinaryOp, Tier, UnaryOp};
pub use session::{Evaluation, Session};
pub use tokenizer::{format_expression, parse_expression, parse_number};
pub use value::{RuntimeError, Value};
