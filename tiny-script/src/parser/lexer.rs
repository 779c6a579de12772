use std::fmt;

use tracing::{debug, trace};

use crate::config::{ErrorMode, NumberScan, Options};
use crate::error::LexError;
use crate::span::{Position, Span, Spanned};

use super::cursor::Cursor;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Let,
    Print,
    // Operators
    Assign, // =
    Plus,   // +
    // Identifiers and literals
    Identifier(String),
    Number(f64),
    String(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Let => write!(f, "let"),
            Token::Print => write!(f, "print"),
            Token::Assign => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::Number(value) => write!(f, "{value}"),
            Token::String(value) => {
                write!(f, "\"")?;
                for ch in value.chars() {
                    if matches!(ch, '"' | '\\') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                write!(f, "\"")
            }
        }
    }
}

/// Splits source text into tokens, one recognizer at a time.
///
/// Each recognizer either consumes exactly one token's worth of input or
/// leaves the cursor where it found it.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    numbers: NumberScan,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, numbers: NumberScan) -> Self {
        Self {
            cursor: Cursor::new(source),
            numbers,
        }
    }

    pub fn pos(&self) -> Position {
        self.cursor.pos()
    }

    /// The scalar the lexer is stopped at, if any input remains.
    pub fn peek_char(&self) -> Option<char> {
        self.cursor.peek()
    }

    /// Skips whitespace and reads one token.
    ///
    /// Returns `None` at the end of input or when no recognizer matches; in
    /// the latter case the cursor stays on the offending scalar.
    pub fn next_token(&mut self) -> Option<Spanned<Token>> {
        self.skip_whitespace();

        let start = self.cursor.pos();
        let token = self
            .read_operator()
            .or_else(|| self.read_identifier())
            .or_else(|| self.read_number())
            .or_else(|| self.read_string())?;
        let span = Span {
            start,
            end: self.cursor.pos(),
        };

        trace!(%token, %span, "recognized token");

        Some(Spanned { value: token, span })
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(char::is_whitespace);
    }

    fn read_operator(&mut self) -> Option<Token> {
        let start = self.cursor.clone();

        match self.cursor.bump() {
            Some('=') => Some(Token::Assign),
            Some('+') => Some(Token::Plus),
            _ => {
                self.cursor = start;
                None
            }
        }
    }

    fn read_identifier(&mut self) -> Option<Token> {
        if !self.cursor.peek().is_some_and(char::is_alphabetic) {
            return None;
        }

        let name = self.cursor.eat_while(char::is_alphanumeric);

        let token = match name.as_str() {
            "let" => Token::Let,
            "print" => Token::Print,
            _ => Token::Identifier(name),
        };

        Some(token)
    }

    fn read_number(&mut self) -> Option<Token> {
        if !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return None;
        }

        let start = self.cursor.clone();
        let digits = self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.numbers == NumberScan::ToEndOfInput && !self.cursor.is_eof() {
            self.cursor = start;
            return None;
        }

        match digits.parse::<f64>() {
            Ok(value) => Some(Token::Number(value)),
            Err(_) => {
                self.cursor = start;
                None
            }
        }
    }

    fn read_string(&mut self) -> Option<Token> {
        if self.cursor.peek() != Some('"') {
            return None;
        }

        let start = self.cursor.clone();
        self.cursor.bump();

        let mut value = String::new();
        let mut escaped = false;

        while let Some(ch) = self.cursor.bump() {
            match ch {
                '"' if !escaped => return Some(Token::String(value)),
                '\\' if !escaped => escaped = true,
                _ => {
                    value.push(ch);
                    escaped = false;
                }
            }
        }

        // ran out of input before the closing quote
        self.cursor = start;
        None
    }
}

impl Iterator for Lexer<'_> {
    type Item = Spanned<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenizes `source` with the default options.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(source, &Options::default())
}

pub fn tokenize_with(source: &str, options: &Options) -> Result<Vec<Token>, LexError> {
    let tokens = tokenize_spanned(source, options)?;
    Ok(tokens.into_iter().map(|token| token.value).collect())
}

pub fn tokenize_spanned(
    source: &str,
    options: &Options,
) -> Result<Vec<Spanned<Token>>, LexError> {
    let mut lexer = Lexer::new(source, options.numbers);
    let tokens: Vec<_> = lexer.by_ref().collect();

    if let Some(ch) = lexer.peek_char() {
        let position = lexer.pos();
        let error = if ch == '"' {
            LexError::UnterminatedString { start: position }
        } else {
            LexError::UnrecognizedInput { position }
        };

        match options.errors {
            ErrorMode::Strict => return Err(error),
            ErrorMode::Lenient => debug!(%error, "discarding unlexed input"),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn legacy_strict() -> Options {
        Options {
            errors: ErrorMode::Strict,
            numbers: NumberScan::ToEndOfInput,
        }
    }

    #[test]
    fn declaration_tokens() {
        let tokens = tokenize("let foo = \"bar\"").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Let,
                Token::Identifier("foo".to_string()),
                Token::Assign,
                Token::String("bar".to_string()),
            ]
        );
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t  ").unwrap().is_empty());
    }

    #[test]
    fn lone_number_under_both_rules() {
        assert_eq!(tokenize("5").unwrap(), vec![Token::Number(5.0)]);
        assert_eq!(
            tokenize_with("5", &legacy_strict()).unwrap(),
            vec![Token::Number(5.0)]
        );
        assert_eq!(
            tokenize_with("print 042", &legacy_strict()).unwrap(),
            vec![Token::Print, Token::Number(42.0)]
        );
    }

    #[test]
    fn digits_followed_by_text_are_not_a_number_at_end_of_input_rule() {
        assert_eq!(
            tokenize_with("5 apples", &legacy_strict()),
            Err(LexError::UnrecognizedInput {
                position: Position::default(),
            })
        );
        let tokens = tokenize_with("5 apples", &Options::legacy()).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn digits_followed_by_text_under_prefix_rule() {
        assert_eq!(
            tokenize("5 apples").unwrap(),
            vec![Token::Number(5.0), Token::Identifier("apples".to_string())]
        );
        assert_eq!(
            tokenize("12abc").unwrap(),
            vec![Token::Number(12.0), Token::Identifier("abc".to_string())]
        );
    }

    #[test]
    fn keywords_need_an_exact_match() {
        assert_eq!(
            tokenize("printer letter print let").unwrap(),
            vec![
                Token::Identifier("printer".to_string()),
                Token::Identifier("letter".to_string()),
                Token::Print,
                Token::Let,
            ]
        );
    }

    #[test]
    fn identifiers_take_unicode_letters_and_digits() {
        assert_eq!(
            tokenize("x1y2 été").unwrap(),
            vec![
                Token::Identifier("x1y2".to_string()),
                Token::Identifier("été".to_string()),
            ]
        );
    }

    #[test]
    fn escapes_keep_the_next_scalar_literally() {
        let tokens = tokenize(r#""a\"b\\c\n""#).unwrap();

        assert_eq!(tokens, vec![Token::String(r#"a"b\cn"#.to_string())]);
    }

    #[test]
    fn operators_need_no_whitespace() {
        assert_eq!(
            tokenize("a+\"b\"").unwrap(),
            vec![
                Token::Identifier("a".to_string()),
                Token::Plus,
                Token::String("b".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            tokenize("print \"abc"),
            Err(LexError::UnterminatedString {
                start: Position {
                    offset: 6,
                    line: 1,
                    column: 7,
                },
            })
        );
        assert_eq!(
            tokenize_with("print \"abc", &Options::legacy()).unwrap(),
            vec![Token::Print]
        );
    }

    #[test]
    fn unrecognized_scalar() {
        assert_eq!(
            tokenize("print 5 * 3"),
            Err(LexError::UnrecognizedInput {
                position: Position {
                    offset: 8,
                    line: 1,
                    column: 9,
                },
            })
        );
    }

    #[test]
    fn spans_follow_lines() {
        let options = Options::default();
        let tokens = tokenize_spanned("let\n  x", &options).unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(
            tokens[1].span,
            Span {
                start: Position {
                    offset: 6,
                    line: 2,
                    column: 3,
                },
                end: Position {
                    offset: 7,
                    line: 2,
                    column: 4,
                },
            }
        );
    }

    #[test]
    fn payloads_relex_to_themselves() {
        let tokens = [
            Token::Identifier("total2".to_string()),
            Token::String("plain".to_string()),
            Token::String(r#"say "hi" \o/"#.to_string()),
            Token::Number(123.0),
        ];

        for token in tokens {
            assert_eq!(tokenize(&token.to_string()).unwrap(), vec![token]);
        }
    }
}
