use crate::error::UnknownOperatorError;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

impl FromStr for Operator {
    type Err = UnknownOperatorError;

    fn from_str(string_value: &str) -> Result<Self, Self::Err> {
        match string_value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(UnknownOperatorError(String::from(other))),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.symbol())
    }
}

/// A prefix-notation arithmetic expression.
///
/// A `Call` always carries one of the supported operators; everything below it
/// is another `Expression`, so a tree is well formed by construction.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Call {
        operator: Operator,
        operands: Vec<Expression>,
    },
}

impl Expression {
    pub fn call(operator: Operator, operands: Vec<Expression>) -> Self {
        Expression::Call { operator, operands }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Number(value)
    }
}

// renders back to the s-expression form, e.g. `(+ -1 2 (* 1 3 5))`
impl Display for Expression {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(formatter, "{}", value),
            Expression::Call { operator, operands } => {
                write!(formatter, "({}", operator)?;
                for operand in operands {
                    write!(formatter, " {}", operand)?;
                }
                write!(formatter, ")")
            }
        }
    }
}
