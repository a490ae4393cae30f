//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use blockgen_tree::load_program;

use super::{CliError, CliResult, ExitCode, GenerateOptions};
use crate::codegen::{CodeGenerator, GenConfig, GenError, SequenceStyle};
use crate::library::standard_handlers;

/// Maximum source file size (10 MB)
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a program file.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (10 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Map CLI flags onto a generation config.
pub fn build_config(options: &GenerateOptions) -> GenConfig {
    let mut config = GenConfig::default()
        .with_indent(" ".repeat(options.indent))
        .with_reserved_words(options.reserve.iter().cloned());

    if options.flat {
        config = config.with_sequence(SequenceStyle::Lines);
    } else if let Some(call) = &options.sequence_call {
        config = config.with_sequence(SequenceStyle::Composite { call: call.clone() });
    }
    if let Some(template) = &options.loop_trap {
        config = config.with_loop_trap(line_template(template));
    }
    if let Some(template) = &options.statement_prefix {
        config = config.with_statement_prefix(line_template(template));
    }
    if let Some(template) = &options.statement_suffix {
        config = config.with_statement_suffix(line_template(template));
    }
    config
}

/// Templates given on the command line are whole lines.
fn line_template(template: &str) -> String {
    if template.ends_with('\n') {
        template.to_string()
    } else {
        format!("{template}\n")
    }
}

/// Render a generation error with its diagnostic code and help.
fn render_gen_error(err: GenError) -> String {
    format!("{:?}", miette::Report::new(err))
}

/// Generate source for a JSON program and print it or write it to `output`.
pub fn generate_file(file_path: &Path, output: Option<&Path>, options: &GenerateOptions) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = load_program(&source).map_err(|e| {
        CliError::new(
            format!("Error loading '{}': {}", file_path.display(), e),
            ExitCode::BAD_INPUT,
        )
    })?;

    let generator = CodeGenerator::new(standard_handlers(), build_config(options));
    let code = generator
        .generate_program(&program)
        .map_err(|e| CliError::failure(render_gen_error(e)))?;

    match output {
        Some(path) => {
            fs::write(path, &code)
                .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e)))?;
            tracing::info!(path = %path.display(), bytes = code.len(), "wrote generated source");
        }
        None => print!("{}", code),
    }
    Ok(ExitCode::SUCCESS)
}

/// Print every node kind the reference library handles, one per line.
pub fn list_kinds() -> CliResult<ExitCode> {
    let handlers = standard_handlers();
    for kind in handlers.kinds() {
        println!("{}", kind);
    }
    Ok(ExitCode::SUCCESS)
}
