use crate::ast::Operator;
use crate::error::LexError;
use std::fmt::{self, Display};
use std::str::Chars;

const OPEN_PAREN_CHAR: char = '(';
const CLOSE_PAREN_CHAR: char = ')';
const NEWLINE_CHAR: char = '\n';
const MINUS_CHAR: char = '-';
const DECIMAL_POINT_CHAR: char = '.';

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // standard symbols
    OpenParen,
    CloseParen,

    // more complex stuff
    Operator(Operator),
    Number(f64),
    Unknown(String),
}

impl Display for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenParen => write!(formatter, "{}", OPEN_PAREN_CHAR),
            Token::CloseParen => write!(formatter, "{}", CLOSE_PAREN_CHAR),
            Token::Operator(operator) => write!(formatter, "{}", operator),
            Token::Number(value) => write!(formatter, "{}", value),
            Token::Unknown(text) => write!(formatter, "{}", text),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub line: usize,
    pub position: usize,
}

impl Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "line {} char {}", self.line, self.position)
    }
}

#[derive(Debug, PartialEq)]
pub struct TokenAndSpan {
    pub token: Token,
    pub from: Position,
    pub to: Position,
}

impl Display for TokenAndSpan {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(formatter, "{:?}[{}]", self.token, self.from)
        } else {
            write!(formatter, "{:?}[{} -> {}]", self.token, self.from, self.to)
        }
    }
}

#[derive(Clone, Copy)]
struct CharAndPosition {
    chr: Option<char>,
    line: usize,
    position: usize,
}

impl CharAndPosition {
    fn position(&self) -> Position {
        Position {
            line: self.line,
            position: self.position,
        }
    }
}

/// Splits source text into tokens one at a time, keeping track of where each
/// token starts and ends.
///
/// Parens are always tokens of their own. Everything between whitespace and
/// parens is an atom: one of `+ - * /`, a numeric literal (`-1` included), or
/// an unknown symbol that the parser will reject.
pub struct GreedyTokenizer<'a> {
    inbuf: Chars<'a>,
    line: usize,
    position: usize,
    current_char: CharAndPosition,
}

impl<'a> GreedyTokenizer<'a> {
    pub fn new(inbuf: &'a str) -> Self {
        let mut tok = GreedyTokenizer {
            inbuf: inbuf.chars(),
            line: 0,
            position: 0,
            current_char: CharAndPosition {
                chr: None,
                line: 0,
                position: 0,
            },
        };

        // start it off
        tok.step_next_char();

        tok
    }

    fn step_next_char(&mut self) {
        self.current_char = CharAndPosition {
            chr: self.inbuf.next(),
            line: self.line,
            position: self.position,
        };

        if let Some(chr) = self.current_char.chr {
            self.position += 1;
            if chr == NEWLINE_CHAR {
                self.line += 1;
                self.position = 0;
            }
        }
    }

    fn get_token(&mut self) -> Option<Result<TokenAndSpan, LexError>> {
        let mut tok = self.current_char;

        // remove any whitespace
        while is_whitespace(&tok) {
            self.step_next_char();
            tok = self.current_char;
        }

        let chr = tok.chr?;
        let from = tok.position();

        // find parens
        if chr == OPEN_PAREN_CHAR || chr == CLOSE_PAREN_CHAR {
            self.step_next_char();
            let token = if chr == OPEN_PAREN_CHAR {
                Token::OpenParen
            } else {
                Token::CloseParen
            };
            return Some(Ok(TokenAndSpan {
                token,
                from,
                to: from,
            }));
        }

        // anything else runs up to the next delimiter
        let mut atom = String::new();
        let mut to = from;
        while let Some(chr) = tok.chr.filter(|&chr| is_atom_char(chr)) {
            atom.push(chr);
            to = tok.position();
            self.step_next_char();
            tok = self.current_char;
        }

        Some(classify_atom(atom, from, to).map(|token| TokenAndSpan { token, from, to }))
    }
}

impl<'a> Iterator for GreedyTokenizer<'a> {
    type Item = Result<TokenAndSpan, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token_and_span = self.get_token();
        if let Some(Ok(ref token_and_span)) = token_and_span {
            tracing::trace!(%token_and_span, "token");
        }
        token_and_span
    }
}

/// Splits `source` into its tokens, in order of appearance.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    GreedyTokenizer::new(source)
        .map(|token_and_span| token_and_span.map(|token_and_span| token_and_span.token))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            tracing::debug!(%err, "tokenize failed");
            err
        })
}

fn classify_atom(atom: String, from: Position, to: Position) -> Result<Token, LexError> {
    if let Ok(operator) = atom.parse::<Operator>() {
        return Ok(Token::Operator(operator));
    }

    if !is_number_like(&atom) {
        return Ok(Token::Unknown(atom));
    }

    match atom.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Token::Number(value)),
        Ok(_) => Err(LexError::NumberOutOfRange {
            text: atom,
            from,
            to,
        }),
        Err(reason) => Err(LexError::MalformedNumber {
            text: atom,
            reason,
            from,
            to,
        }),
    }
}

fn is_whitespace(tok: &CharAndPosition) -> bool {
    if let Some(chr) = tok.chr {
        chr.is_whitespace()
    } else {
        false
    }
}

fn is_atom_char(chr: char) -> bool {
    !chr.is_whitespace() && chr != OPEN_PAREN_CHAR && chr != CLOSE_PAREN_CHAR
}

// a minus glued to a digit is a sign, not the subtraction operator
fn is_number_like(atom: &str) -> bool {
    atom.strip_prefix(MINUS_CHAR)
        .unwrap_or(atom)
        .starts_with(|chr: char| chr.is_ascii_digit() || chr == DECIMAL_POINT_CHAR)
}
