use thiserror::Error;

use crate::parser::lexer::Token;
use crate::span::Position;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unrecognized input at {position}")]
    UnrecognizedInput { position: Position },

    #[error("Unterminated string literal starting at {start}")]
    UnterminatedString { start: Position },
}

/// Token positions are indices into the token sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token '{token}' at token {position}")]
    UnexpectedToken { token: Token, position: usize },

    #[error("Unexpected end of input at token {position}")]
    UnexpectedEnd { position: usize },

    #[error("{} token(s) left after the last statement", .remaining_tokens.len())]
    TrailingInput { remaining_tokens: Vec<Token> },
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}
