#![forbid(unsafe_code)]

//! End-to-end run: arguments, palette, optional Swift patching
//!
//! Argument errors, an unreadable input file and a failed palette write end
//! the run with [`EXIT_FAILURE`]. Template problems are reported but never
//! change the exit code.

use crate::cli::args::{ArgError, Cli, ParsedArgs, RunConfiguration, parse_args, utf8_args};
use crate::output::Console;
use crate::palette::{Palette, PaletteError, write_palette};
use crate::template::{TemplateError, patch_template};
use log::warn;
use std::ffi::OsStr;
use thiserror::Error;

/// Exit codes for the command-line tool
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Fatal errors that end a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Args(#[from] ArgError),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of distinct colors written to the palette
    pub colors: usize,
    /// Whether the template had marker blocks to regenerate and they were saved
    pub template_patched: bool,
}

/// Run the tool for the given arguments (without the program name)
///
/// # Returns
///
/// Exit code:
/// - 0: Success, or help was printed
/// - 1: Fatal error, already reported on `console`
pub fn run_cli<S: AsRef<OsStr>>(args: &[S], console: &dyn Console) -> i32 {
    match run_cli_inner(args, console) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            console.write_error(&e.to_string());
            EXIT_FAILURE
        }
    }
}

fn run_cli_inner<S: AsRef<OsStr>>(args: &[S], console: &dyn Console) -> Result<(), RunError> {
    let args = utf8_args(args)?;
    let config = match parse_args(&args)? {
        ParsedArgs::Help => {
            console.write_line(Cli::help_text().trim_end());
            return Ok(());
        }
        ParsedArgs::Run(config) => config,
    };

    run(&config, console)?;
    Ok(())
}

/// Build the palette, write it, then patch the template if one is configured
pub fn run(config: &RunConfiguration, console: &dyn Console) -> Result<RunSummary, RunError> {
    let palette = Palette::from_file(config.palette_name(), &config.input)?;
    write_palette(&palette, &config.palette_output)?;
    console.write_line(&format!(
        "Wrote {} color{} to {}",
        palette.len(),
        if palette.len() == 1 { "" } else { "s" },
        config.palette_output.display()
    ));

    let template_patched = match &config.template {
        Some(path) => match patch_template(path, &palette) {
            Ok(outcome) => outcome.case_blocks + outcome.dictionary_blocks > 0,
            Err(e @ TemplateError::Read { .. }) => {
                warn!("skipping template: {}", e);
                false
            }
            Err(e @ TemplateError::Write { .. }) => {
                console.write_error(&e.to_string());
                false
            }
        },
        None => false,
    };

    Ok(RunSummary {
        colors: palette.len(),
        template_patched,
    })
}
