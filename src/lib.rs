//! A small s-expression arithmetic front end.
//!
//! Source text such as `(+ 1 2 3)` goes through [`tokenize`] and [`parse`] into
//! an [`Expression`] tree, which can then be evaluated with [`interpret`] or
//! rendered as infix notation with [`compile`].

pub mod ast;
pub mod compile;
pub mod error;
pub mod interp;
pub mod parser;
pub mod tok;

use std::sync::Once;

pub use ast::{Expression, Operator};
pub use compile::compile;
pub use error::{ArithmeticError, CompileError, Error, LexError, ParseError, UnknownOperatorError};
pub use interp::interpret;
pub use parser::{parse, RecursiveDescentParser};
pub use tok::{tokenize, GreedyTokenizer, Position, Token, TokenAndSpan};

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Tokenizes, parses and interprets a single expression.
pub fn evaluate(source: &str) -> Result<f64, Error> {
    let tokens = tokenize(source)?;
    let expr = parse(&tokens)?;
    Ok(interpret(&expr)?)
}

/// Tokenizes, parses and compiles a single expression to infix notation.
pub fn transpile(source: &str) -> Result<String, Error> {
    let tokens = tokenize(source)?;
    let expr = parse(&tokens)?;
    Ok(compile(&expr)?)
}
