use clap::ValueEnum;

/// What to do with input that no rule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum ErrorMode {
    /// Stop at the first unrecognized token or statement and report it.
    #[default]
    Strict,
    /// Keep whatever was recognized so far and silently drop the rest.
    Lenient,
}

/// How the lexer decides where a numeric literal ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum NumberScan {
    /// Take the longest run of digits and leave the rest for the next token.
    #[default]
    Prefix,
    /// A run of digits is a number only if nothing but digits follows it
    /// until the end of the input. `5 apples` is not a number under this rule.
    ToEndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub errors: ErrorMode,
    pub numbers: NumberScan,
}

impl Options {
    /// The original behaviour: silent truncation and end-of-input digit runs.
    pub fn legacy() -> Self {
        Self {
            errors: ErrorMode::Lenient,
            numbers: NumberScan::ToEndOfInput,
        }
    }
}
