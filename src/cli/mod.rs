//! CLI module for blockgen
//!
//! This module provides the command-line interface over the generation engine and the reference handler library.
//!
//! ## Commands
//!
//! - `generate <file>` - Generate source code from a JSON program
//! - `kinds` - List node kinds known to the reference library
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The input program could not be loaded.
    pub const BAD_INPUT: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate source code from visual block programs
#[derive(Parser, Debug)]
#[command(name = "blockgen")]
#[command(version = VERSION)]
#[command(about = "Generate source code from visual block programs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate source code from a JSON program
    Generate {
        /// JSON program to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write the output here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: GenerateOptions,
    },

    /// List node kinds known to the reference library
    Kinds,
}

/// Flags mapped onto [`crate::codegen::GenConfig`].
#[derive(Args, Debug, Clone)]
pub struct GenerateOptions {
    /// Spaces per indentation level
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub indent: usize,
    /// Concatenate statements instead of wrapping them in a sequence call
    #[arg(long)]
    pub flat: bool,
    /// Extra word no generated identifier may take (repeatable)
    #[arg(long = "reserve", value_name = "WORD")]
    pub reserve: Vec<String>,
    /// Name of the sequence call wrapping multiple statements
    #[arg(long, value_name = "NAME", conflicts_with = "flat")]
    pub sequence_call: Option<String>,
    /// Line inserted at the top of every loop body (`%1` = node id)
    #[arg(long, value_name = "TEMPLATE")]
    pub loop_trap: Option<String>,
    /// Line inserted before every statement (`%1` = node id)
    #[arg(long, value_name = "TEMPLATE")]
    pub statement_prefix: Option<String>,
    /// Line inserted after every statement (`%1` = node id)
    #[arg(long, value_name = "TEMPLATE")]
    pub statement_suffix: Option<String>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate { file, output, options } => commands::generate_file(&file, output.as_deref(), &options),
        Command::Kinds => commands::list_kinds(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["blockgen", "generate", "program.json"]).unwrap();
        if let Command::Generate { file, output, options } = cli.command {
            assert_eq!(file, PathBuf::from("program.json"));
            assert!(output.is_none());
            assert_eq!(options.indent, 4);
            assert!(!options.flat);
            assert!(options.reserve.is_empty());
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "blockgen",
            "generate",
            "program.json",
            "-o",
            "out.py",
            "--indent",
            "2",
            "--reserve",
            "robot",
            "--reserve",
            "motor",
            "--sequence-call",
            "block",
            "--loop-trap",
            "guard(%1)",
        ])
        .unwrap();
        if let Command::Generate { output, options, .. } = cli.command {
            assert_eq!(output, Some(PathBuf::from("out.py")));
            assert_eq!(options.indent, 2);
            assert_eq!(options.reserve, vec!["robot", "motor"]);
            assert_eq!(options.sequence_call.as_deref(), Some("block"));
            assert_eq!(options.loop_trap.as_deref(), Some("guard(%1)"));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_flat_conflicts_with_sequence_call() {
        let result = Cli::try_parse_from([
            "blockgen",
            "generate",
            "program.json",
            "--flat",
            "--sequence-call",
            "block",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_kinds() {
        let cli = Cli::try_parse_from(["blockgen", "kinds"]).unwrap();
        assert!(matches!(cli.command, Command::Kinds));
    }
}
