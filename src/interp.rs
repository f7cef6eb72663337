use crate::ast::{Expression, Operator};
use crate::error::ArithmeticError;

impl Operator {
    /// One step of the left fold: `lhs OP rhs`.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, ArithmeticError> {
        let result = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide if rhs == 0.0 => {
                return Err(ArithmeticError::DivisionByZero { dividend: lhs })
            }
            Operator::Divide => lhs / rhs,
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(ArithmeticError::NonFinite { operator: self })
        }
    }
}

/// Reduces an expression tree to a number.
///
/// Operands are evaluated left to right before the call folds them, so
/// `(- 10 2 3)` is `(10 - 2) - 3`. A failure anywhere in the tree fails the
/// whole evaluation.
pub fn interpret(expr: &Expression) -> Result<f64, ArithmeticError> {
    evaluate(expr).map_err(|err| {
        tracing::debug!(%err, %expr, "interpret failed");
        err
    })
}

fn evaluate(expr: &Expression) -> Result<f64, ArithmeticError> {
    match expr {
        Expression::Number(value) => Ok(*value),
        Expression::Call { operator, operands } => {
            let values = operands
                .iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?;

            let (first, rest) = values
                .split_first()
                .ok_or(ArithmeticError::MissingOperands {
                    operator: *operator,
                })?;

            let result = rest
                .iter()
                .try_fold(*first, |acc, &value| operator.apply(acc, value))?;

            tracing::trace!(%operator, ?values, result, "reduced call");
            Ok(result)
        }
    }
}
