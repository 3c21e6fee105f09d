#![forbid(unsafe_code)]

use std::ffi::OsString;
use sync_palette::cli::run_cli;
use sync_palette::output::StandardConsole;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let console = StandardConsole::detect();
    std::process::exit(run_cli(&args, &console));
}
