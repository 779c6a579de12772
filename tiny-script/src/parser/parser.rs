use tracing::{debug, instrument, trace};

use crate::config::ErrorMode;
use crate::error::ParseError;
use crate::ir::ast::{Expression, Program, Statement};

use super::lexer::Token;

pub fn parse_tokens(tokens: &[Token], errors: ErrorMode) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program(errors)
}

/// Recursive-descent parser with backtracking.
///
/// Every rule remembers the position it started at and restores it when it
/// fails, so a failed rule never moves the cursor.
struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    /// Furthest token index a rule has rejected. Used for error reporting only.
    furthest: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            furthest: 0,
        }
    }

    fn parse_program(&mut self, errors: ErrorMode) -> Result<Program, ParseError> {
        let mut statements = Vec::new();

        while let Some(statement) = self.read_statement() {
            statements.push(statement);
        }

        if !self.is_at_end() {
            let error = self.leftover_error();

            match errors {
                ErrorMode::Strict => return Err(error),
                ErrorMode::Lenient => debug!(%error, "discarding unparsed tokens"),
            }
        }

        Ok(Program { statements })
    }

    #[instrument(level = "trace", skip(self), fields(position = self.position))]
    fn read_statement(&mut self) -> Option<Statement> {
        let statement = self
            .read_declaration()
            .or_else(|| self.read_print_statement());
        trace!(matched = statement.is_some(), end = self.position);

        statement
    }

    /// Reserved for `let <name> = <expression>`; never matches yet.
    fn read_declaration(&mut self) -> Option<Statement> {
        None
    }

    fn read_print_statement(&mut self) -> Option<Statement> {
        let start = self.position;

        if !matches!(self.advance(), Some(Token::Print)) {
            return self.reject(start);
        }

        // `print` with nothing printable after it is not a statement
        match self.read_expression() {
            Some(value) => Some(Statement::Print(value)),
            None => {
                self.position = start;
                None
            }
        }
    }

    /// `operand ("+" operand)*`, folded to the right: `a + b + c` is
    /// `a + (b + c)`. A `+` without an operand after it is left unconsumed.
    fn read_expression(&mut self) -> Option<Expression> {
        let mut operands = vec![self.read_operand()?];

        loop {
            let before_plus = self.position;

            if !matches!(self.advance(), Some(Token::Plus)) {
                self.position = before_plus;
                break;
            }

            match self.read_operand() {
                Some(operand) => operands.push(operand),
                None => {
                    self.position = before_plus;
                    break;
                }
            }
        }

        let mut expression = operands.pop()?;
        while let Some(left) = operands.pop() {
            expression = Expression::addition(left, expression);
        }

        Some(expression)
    }

    fn read_operand(&mut self) -> Option<Expression> {
        let start = self.position;

        let operand = match self.advance() {
            Some(Token::Identifier(name)) => Expression::Variable(name.clone()),
            Some(Token::Number(value)) => Expression::Number(*value),
            Some(Token::String(value)) => Expression::String(value.clone()),
            _ => return self.reject(start),
        };

        trace!(?operand, position = start);
        Some(operand)
    }

    // Cursor helpers

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Restores the cursor to `start` and records the rejection.
    fn reject<T>(&mut self, start: usize) -> Option<T> {
        self.furthest = self.furthest.max(start);
        self.position = start;
        None
    }

    fn leftover_error(&self) -> ParseError {
        if self.furthest > self.position {
            match self.tokens.get(self.furthest) {
                Some(token) => ParseError::UnexpectedToken {
                    token: token.clone(),
                    position: self.furthest,
                },
                None => ParseError::UnexpectedEnd {
                    position: self.furthest,
                },
            }
        } else {
            ParseError::TrailingInput {
                remaining_tokens: self.tokens[self.position..].to_vec(),
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}
