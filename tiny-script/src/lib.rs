pub mod config;
pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

pub use config::{ErrorMode, NumberScan, Options};
pub use error::{LexError, ParseError, ScriptError};
pub use parser::lexer::{Token, tokenize, tokenize_with};
pub use parser::{parse, parse_with};
