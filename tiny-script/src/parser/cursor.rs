use std::str::Chars;

use crate::span::Position;

/// A read position over the unicode scalars of the source.
///
/// Cloning is cheap, so recognizers save a cursor by cloning it and
/// backtrack by assigning the saved copy back.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            pos: Position::default(),
        }
    }

    /// Returns the position of the next scalar.
    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.pos.advance(ch);
        Some(ch)
    }

    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut eaten = String::new();

        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.bump();
            eaten.push(ch);
        }

        eaten
    }
}
