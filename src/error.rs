use crate::ast::Operator;
use crate::tok::{Position, Token};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LexError {
    #[error("unable to parse number '{text}' at {from}: {reason}")]
    MalformedNumber {
        text: String,
        reason: std::num::ParseFloatError,
        from: Position,
        to: Position,
    },
    #[error("number '{text}' at {from} does not fit in a 64-bit float")]
    NumberOutOfRange {
        text: String,
        from: Position,
        to: Position,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("expected an expression but found no tokens")]
    UnexpectedEof,
    #[error("'(' at token {at} is never closed")]
    UnclosedParen { at: usize },
    #[error("')' at token {at} has no matching '('")]
    UnmatchedCloseParen { at: usize },
    #[error("expected an operator at token {at}, found '{found}'")]
    ExpectedOperator { found: Token, at: usize },
    #[error("unknown operator '{symbol}' at token {at}")]
    UnknownOperator { symbol: String, at: usize },
    #[error("operator '{operator}' at token {at} can only follow '('")]
    UnexpectedOperator { operator: Operator, at: usize },
    #[error("unexpected symbol '{symbol}' at token {at}")]
    UnexpectedSymbol { symbol: String, at: usize },
    #[error("'{operator}' opened at token {at} has no operands")]
    MissingOperands { operator: Operator, at: usize },
    #[error("unexpected tokens after the expression, starting at token {at}")]
    TrailingTokens { at: usize },
    #[error("'(' at token {at} nests deeper than {limit} levels")]
    TooDeep { at: usize, limit: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum ArithmeticError {
    #[error("division by zero ({dividend} / 0)")]
    DivisionByZero { dividend: f64 },
    #[error("'{operator}' produced a non-finite result")]
    NonFinite { operator: Operator },
    #[error("'{operator}' was applied to no operands")]
    MissingOperands { operator: Operator },
}

#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("'{operator}' was applied to no operands")]
    MissingOperands { operator: Operator },
}

/// Returned when a symbol is not one of `+ - * /`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("unknown operator '{0}'")]
pub struct UnknownOperatorError(pub String);

/// Any failure along the tokenize -> parse -> interpret/compile pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}
