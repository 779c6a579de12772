pub mod cursor;
pub mod lexer;
pub mod parser;

use crate::config::Options;
use crate::error::ScriptError;
use crate::ir::ast;

/// Source text to AST with the default options.
pub fn parse(source: &str) -> Result<ast::Program, ScriptError> {
    parse_with(source, &Options::default())
}

pub fn parse_with(source: &str, options: &Options) -> Result<ast::Program, ScriptError> {
    let tokens = lexer::tokenize_with(source, options)?;
    let program = parser::parse_tokens(&tokens, options.errors)?;
    Ok(program)
}
