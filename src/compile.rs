use crate::ast::Expression;
use crate::error::CompileError;

/// Renders an expression tree in fully parenthesized infix form, with one
/// space between every element: `( -1 + 2 + ( 1 * 3 * 5 ) )`.
pub fn compile(expr: &Expression) -> Result<String, CompileError> {
    let mut out = String::new();

    match render(expr, &mut out) {
        Ok(()) => {
            tracing::trace!(%expr, %out, "compiled");
            Ok(out)
        }
        Err(err) => {
            tracing::debug!(%err, %expr, "compile failed");
            Err(err)
        }
    }
}

fn render(expr: &Expression, out: &mut String) -> Result<(), CompileError> {
    match expr {
        Expression::Number(value) => out.push_str(&value.to_string()),
        Expression::Call { operator, operands } => {
            let (first, rest) = operands
                .split_first()
                .ok_or(CompileError::MissingOperands {
                    operator: *operator,
                })?;

            out.push_str("( ");
            render(first, out)?;
            for operand in rest {
                out.push(' ');
                out.push_str(operator.symbol());
                out.push(' ');
                render(operand, out)?;
            }
            out.push_str(" )");
        }
    }

    Ok(())
}
