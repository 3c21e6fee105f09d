#![forbid(unsafe_code)]

//! Command-line argument parsing
//!
//! Arguments are read pairwise as `<flag> <value>`. `help` or `--help`
//! anywhere on the command line short-circuits everything else. The
//! recognised pairs are then handed to clap, which owns the typed
//! definitions, defaults and usage text.

use crate::palette::{DEFAULT_PALETTE_PATH, palette_name_for};
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsStr;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing the command line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("Unrecognized flag: {0}")]
    UnrecognizedFlag(String),

    #[error(
        "No input file specified.  Use the --in parameter to specify a file, or --help for more info"
    )]
    MissingInput,

    /// Flags and paths must be valid UTF-8
    #[error("Argument is not valid UTF-8: {0}")]
    NonUtf8Argument(String),

    /// A recognised flag carried a value clap rejected
    #[error("{0}")]
    InvalidValue(String),
}

/// sync-palette is used to generate color palette files (*.clr) for your Mac.
#[derive(Parser, Debug)]
#[command(
    name = "sync-palette",
    no_binary_name = true,
    disable_help_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Required, a text file with lines consisting of hex values and names ("#BB8954 Dark Khaki")
    #[arg(short = 'i', long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// The generated macOS palette file
    #[arg(short = 'o', long = "out", value_name = "PATH", default_value = DEFAULT_PALETTE_PATH)]
    pub out: PathBuf,

    /// Swift file whose KEYCASE and DICTIONARY marker blocks are regenerated
    #[arg(short = 's', long = "swift", value_name = "PATH")]
    pub swift: Option<PathBuf>,

    /// Print this message (`help` works too)
    #[arg(long = "help", action = ArgAction::Help)]
    _help: Option<bool>,
}

impl Cli {
    /// Usage text printed for `--help`
    pub fn help_text() -> String {
        Cli::command().render_help().to_string()
    }

    /// Run settings, or `None` when no input file was given
    pub fn into_config(self) -> Option<RunConfiguration> {
        Some(RunConfiguration {
            input: self.input?,
            palette_output: self.out,
            template: self.swift,
        })
    }
}

/// Validated settings for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Hex/name list to read
    pub input: PathBuf,
    /// Where the `.clr` palette is written
    pub palette_output: PathBuf,
    /// Swift file to patch, if any
    pub template: Option<PathBuf>,
}

impl RunConfiguration {
    /// Name stored inside the palette, derived from the output file name
    pub fn palette_name(&self) -> String {
        palette_name_for(&self.palette_output)
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedArgs {
    Help,
    Run(RunConfiguration),
}

/// Convert raw process arguments to strings
///
/// # Errors
///
/// Returns [`ArgError::NonUtf8Argument`] for the first argument that is not
/// valid UTF-8, rather than silently replacing the bad bytes.
pub fn utf8_args<S: AsRef<OsStr>>(args: &[S]) -> Result<Vec<String>, ArgError> {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            arg.to_str()
                .map(str::to_string)
                .ok_or_else(|| ArgError::NonUtf8Argument(arg.to_string_lossy().into_owned()))
        })
        .collect()
}

/// Parse the argument vector, excluding the program name
///
/// A trailing flag without a value is ignored. When a flag is repeated the
/// last value wins.
pub fn parse_args<S: AsRef<str>>(tokens: &[S]) -> Result<ParsedArgs, ArgError> {
    if tokens
        .iter()
        .any(|token| matches!(token.as_ref(), "help" | "--help"))
    {
        return Ok(ParsedArgs::Help);
    }

    let mut normalized = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks_exact(2) {
        let flag = pair[0].as_ref();
        let long = match flag.trim() {
            "-i" | "--in" => "in",
            "-o" | "--out" => "out",
            "-s" | "--swift" => "swift",
            _ => return Err(ArgError::UnrecognizedFlag(flag.to_string())),
        };
        // `--flag=value` keeps values that look like flags from being misread
        normalized.push(format!("--{}={}", long, pair[1].as_ref()));
    }

    let cli = Cli::try_parse_from(normalized)
        .map_err(|e| ArgError::InvalidValue(e.to_string().trim_end().to_string()))?;

    cli.into_config()
        .map(ParsedArgs::Run)
        .ok_or(ArgError::MissingInput)
}
