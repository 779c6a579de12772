use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

use tiny_script::parser::{self, lexer};
use tiny_script::{ErrorMode, NumberScan, Options, ScriptError};

const LOG_ENV_NAME: &str = "TINY_SCRIPT_LOG";

#[derive(Parser)]
#[command(name = "tiny-script")]
#[command(about = "Lexer and parser for a tiny let/print scripting language", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of the input, one per line
    Tokens(InputArgs),

    /// Parse the input and print the AST
    Parse(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Source file
    #[arg(required_unless_present = "expr", conflicts_with = "expr")]
    input: Option<PathBuf>,

    /// Source text given directly instead of a file
    #[arg(short, long)]
    expr: Option<String>,

    /// Report unrecognized input or drop it silently
    #[arg(long, value_enum, default_value_t = ErrorMode::Strict)]
    errors: ErrorMode,

    /// Where a numeric literal ends
    #[arg(long, value_enum, default_value_t = NumberScan::Prefix)]
    numbers: NumberScan,

    /// Lenient errors and end-of-input digit runs, as the first version did
    #[arg(long, conflicts_with_all = ["errors", "numbers"])]
    legacy: bool,
}

impl InputArgs {
    fn source(&self) -> Result<String, ScriptError> {
        match (&self.expr, &self.input) {
            (Some(expr), _) => Ok(expr.clone()),
            (None, Some(path)) => Ok(fs::read_to_string(path)?),
            (None, None) => Ok(String::new()),
        }
    }

    fn options(&self) -> Options {
        if self.legacy {
            Options::legacy()
        } else {
            Options {
                errors: self.errors,
                numbers: self.numbers,
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_NAME)
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens(args) => {
            let source = args.source()?;
            let tokens = lexer::tokenize_spanned(&source, &args.options())?;

            for token in &tokens {
                println!("{:<12} {:?}", token.span.start.to_string(), token.value);
            }
        }
        Commands::Parse(args) => {
            let source = args.source()?;
            let program = parser::parse_with(&source, &args.options())?;

            println!("{:#?}", program);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn legacy_flag_selects_reference_options() {
        let cli =
            Cli::try_parse_from(["tiny-script", "parse", "-e", "print 5", "--legacy"]).unwrap();
        let Commands::Parse(args) = cli.command else {
            panic!("expected the parse command");
        };

        assert_eq!(args.options(), Options::legacy());
        assert_eq!(args.source().unwrap(), "print 5");
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["tiny-script", "tokens"]).is_err());
    }
}
