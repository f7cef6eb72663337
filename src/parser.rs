use crate::ast::Expression;
use crate::error::ParseError;
use crate::tok::Token;

/// Deepest paren nesting the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Builds expression trees out of a token slice, one top-level expression at a
/// time.
pub struct RecursiveDescentParser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    depth: usize,
}

impl<'a> RecursiveDescentParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
        }
    }

    /// Returns `Ok(None)` once every token has been consumed.
    pub fn next_expression(&mut self) -> Result<Option<Expression>, ParseError> {
        if self.is_exhausted() {
            Ok(None)
        } else {
            self.parse_expression().map(Some)
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<(usize, &'a Token)> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some((self.cursor - 1, token))
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let (at, token) = self.advance().ok_or(ParseError::UnexpectedEof)?;

        match token {
            Token::Number(value) => Ok(Expression::Number(*value)),

            // open paren tokens indicate we should go down one level in parsing things
            Token::OpenParen => {
                if self.depth >= MAX_DEPTH {
                    return Err(ParseError::TooDeep {
                        at,
                        limit: MAX_DEPTH,
                    });
                }

                self.depth += 1;
                let call = self.parse_call(at);
                self.depth -= 1;
                call
            }

            Token::CloseParen => Err(ParseError::UnmatchedCloseParen { at }),
            Token::Operator(operator) => Err(ParseError::UnexpectedOperator {
                operator: *operator,
                at,
            }),
            Token::Unknown(symbol) => Err(ParseError::UnexpectedSymbol {
                symbol: symbol.clone(),
                at,
            }),
        }
    }

    // the opening paren at `open_at` has already been consumed
    fn parse_call(&mut self, open_at: usize) -> Result<Expression, ParseError> {
        let operator = match self.advance() {
            Some((_, Token::Operator(operator))) => *operator,
            Some((at, Token::Unknown(symbol))) => {
                return Err(ParseError::UnknownOperator {
                    symbol: symbol.clone(),
                    at,
                })
            }
            Some((at, found)) => {
                return Err(ParseError::ExpectedOperator {
                    found: found.clone(),
                    at,
                })
            }
            None => return Err(ParseError::UnclosedParen { at: open_at }),
        };

        let mut operands = vec![];
        loop {
            match self.tokens.get(self.cursor) {
                // close paren tokens indicate we should go up one level, and so return
                Some(Token::CloseParen) => {
                    self.cursor += 1;
                    break;
                }
                Some(_) => operands.push(self.parse_expression()?),
                None => return Err(ParseError::UnclosedParen { at: open_at }),
            }
        }

        if operands.is_empty() {
            return Err(ParseError::MissingOperands {
                operator,
                at: open_at,
            });
        }

        Ok(Expression::call(operator, operands))
    }
}

/// Parses exactly one expression, which must account for every token.
pub fn parse(tokens: &[Token]) -> Result<Expression, ParseError> {
    let mut parser = RecursiveDescentParser::new(tokens);

    let result = parser.parse_expression().and_then(|expr| {
        if parser.is_exhausted() {
            Ok(expr)
        } else {
            Err(ParseError::TrailingTokens { at: parser.cursor })
        }
    });

    match result {
        Ok(expr) => {
            tracing::trace!(%expr, "parsed");
            Ok(expr)
        }
        Err(err) => {
            tracing::debug!(%err, "parse failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::ast::Operator;

    fn number(value: f64) -> Token {
        Token::Number(value)
    }

    fn op(operator: Operator) -> Token {
        Token::Operator(operator)
    }

    #[test]
    fn it_handles_empty_token_stream() {
        assert_eq!(parse(&[]), Err(ParseError::UnexpectedEof));
        assert_eq!(RecursiveDescentParser::new(&[]).next_expression(), Ok(None));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(0.0)]
    #[case(188.0)]
    fn it_parses_leaf_tokens(#[case] value: f64) {
        assert_eq!(parse(&[number(value)]), Ok(Expression::Number(value)));
    }

    #[test]
    fn it_parses_expressions_with_args() {
        let tokens = vec![
            Token::OpenParen,
            op(Operator::Add),
            number(1.0),
            number(2.0),
            number(3.0),
            Token::CloseParen,
        ];

        assert_eq!(
            parse(&tokens),
            Ok(Expression::call(
                Operator::Add,
                vec![
                    Expression::Number(1.0),
                    Expression::Number(2.0),
                    Expression::Number(3.0)
                ]
            ))
        );
    }

    #[test]
    fn it_parses_expressions_with_args_that_are_expressions() {
        let tokens = vec![
            Token::OpenParen,
            op(Operator::Subtract),
            number(1.0),
            Token::OpenParen,
            op(Operator::Divide),
            number(2.0),
            number(4.0),
            Token::CloseParen,
            Token::CloseParen,
        ];

        assert_eq!(
            parse(&tokens),
            Ok(Expression::call(
                Operator::Subtract,
                vec![
                    Expression::Number(1.0),
                    Expression::call(
                        Operator::Divide,
                        vec![Expression::Number(2.0), Expression::Number(4.0)]
                    ),
                ]
            ))
        );
    }

    #[test]
    fn it_returns_multiple_statements_as_separate_expressions() {
        let tokens = vec![
            Token::OpenParen,
            op(Operator::Add),
            number(1.0),
            Token::CloseParen,
            number(7.0),
        ];

        let mut parser = RecursiveDescentParser::new(&tokens);
        assert_eq!(
            parser.next_expression(),
            Ok(Some(Expression::call(Operator::Add, vec![Expression::Number(1.0)])))
        );
        assert_eq!(parser.next_expression(), Ok(Some(Expression::Number(7.0))));
        assert_eq!(parser.next_expression(), Ok(None));

        // but a single parse refuses the leftovers
        assert_eq!(parse(&tokens), Err(ParseError::TrailingTokens { at: 4 }));
    }

    fn nested_adds(levels: usize) -> Vec<Token> {
        let mut tokens = vec![];
        for _ in 0..levels {
            tokens.push(Token::OpenParen);
            tokens.push(op(Operator::Add));
        }
        tokens.push(number(1.0));
        tokens.extend((0..levels).map(|_| Token::CloseParen));
        tokens
    }

    #[test]
    fn it_caps_paren_nesting() {
        assert!(parse(&nested_adds(MAX_DEPTH)).is_ok());

        assert_eq!(
            parse(&nested_adds(MAX_DEPTH + 1)),
            Err(ParseError::TooDeep {
                at: 2 * MAX_DEPTH,
                limit: MAX_DEPTH
            })
        );
    }

    #[rstest]
    #[case(
        vec![Token::OpenParen, op(Operator::Add), number(1.0), number(2.0)],
        ParseError::UnclosedParen { at: 0 }
    )]
    #[case(vec![Token::OpenParen], ParseError::UnclosedParen { at: 0 })]
    #[case(
        vec![Token::OpenParen, op(Operator::Add), Token::OpenParen, op(Operator::Add), number(1.0), Token::CloseParen],
        ParseError::UnclosedParen { at: 0 }
    )]
    #[case(vec![Token::CloseParen], ParseError::UnmatchedCloseParen { at: 0 })]
    #[case(
        vec![Token::OpenParen, number(1.0), number(2.0), Token::CloseParen],
        ParseError::ExpectedOperator { found: number(1.0), at: 1 }
    )]
    #[case(
        vec![Token::OpenParen, Token::CloseParen],
        ParseError::ExpectedOperator { found: Token::CloseParen, at: 1 }
    )]
    #[case(
        vec![Token::OpenParen, Token::Unknown(String::from("%")), number(1.0), Token::CloseParen],
        ParseError::UnknownOperator { symbol: String::from("%"), at: 1 }
    )]
    #[case(
        vec![Token::OpenParen, op(Operator::Add), op(Operator::Add), Token::CloseParen],
        ParseError::UnexpectedOperator { operator: Operator::Add, at: 2 }
    )]
    #[case(
        vec![Token::OpenParen, op(Operator::Add), Token::Unknown(String::from("x")), Token::CloseParen],
        ParseError::UnexpectedSymbol { symbol: String::from("x"), at: 2 }
    )]
    #[case(
        vec![Token::OpenParen, op(Operator::Multiply), Token::CloseParen],
        ParseError::MissingOperands { operator: Operator::Multiply, at: 0 }
    )]
    #[case(
        vec![Token::OpenParen, op(Operator::Add), number(1.0), Token::CloseParen, Token::CloseParen],
        ParseError::TrailingTokens { at: 4 }
    )]
    fn it_rejects_malformed_token_streams(#[case] tokens: Vec<Token>, #[case] error: ParseError) {
        assert_eq!(parse(&tokens), Err(error));
    }
}
