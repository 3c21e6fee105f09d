#![forbid(unsafe_code)]

//! User-facing output sinks
//!
//! Everything the tool prints goes through a [`Console`], so the run logic can
//! be exercised in tests without touching the process's standard streams.

use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Destination for standard output and error lines
pub trait Console {
    /// Write a line to standard output
    fn write_line(&self, message: &str);

    /// Write a line to standard error
    fn write_error(&self, message: &str);
}

/// Console backed by the process's stdout and stderr
///
/// Errors are printed in red when the color choice allows it.
pub struct StandardConsole {
    stdout_choice: ColorChoice,
    stderr_choice: ColorChoice,
}

impl StandardConsole {
    /// Console using the same color choice for both streams
    pub fn new(color_choice: ColorChoice) -> Self {
        StandardConsole {
            stdout_choice: color_choice,
            stderr_choice: color_choice,
        }
    }

    /// Console that only colors streams attached to a terminal
    ///
    /// termcolor's `Auto` looks at `TERM` and `NO_COLOR` but not at whether
    /// the stream is redirected, so that is checked here.
    pub fn detect() -> Self {
        StandardConsole {
            stdout_choice: color_choice_for(io::stdout().is_terminal()),
            stderr_choice: color_choice_for(io::stderr().is_terminal()),
        }
    }

    fn write_colored(&self, stream: &mut StandardStream, message: &str) -> io::Result<()> {
        stream.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stream, "{}", message)?;
        stream.reset()?;
        writeln!(stream)
    }
}

impl Default for StandardConsole {
    fn default() -> Self {
        StandardConsole::detect()
    }
}

fn color_choice_for(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

impl Console for StandardConsole {
    fn write_line(&self, message: &str) {
        let mut stdout = StandardStream::stdout(self.stdout_choice);
        // Nothing sensible to do if stdout is gone (e.g. closed pipe).
        let _ = writeln!(stdout, "{}", message);
    }

    fn write_error(&self, message: &str) {
        let mut stderr = StandardStream::stderr(self.stderr_choice);
        let _ = self.write_colored(&mut stderr, message);
    }
}

/// Console that records lines in memory
#[derive(Debug, Default)]
pub struct BufferConsole {
    stdout: RefCell<Vec<String>>,
    stderr: RefCell<Vec<String>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written to standard output so far
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout.borrow().clone()
    }

    /// Lines written to standard error so far
    pub fn stderr_lines(&self) -> Vec<String> {
        self.stderr.borrow().clone()
    }
}

impl Console for BufferConsole {
    fn write_line(&self, message: &str) {
        self.stdout.borrow_mut().push(message.to_string());
    }

    fn write_error(&self, message: &str) {
        self.stderr.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_console_separates_streams() {
        let console = BufferConsole::new();
        console.write_line("hello");
        console.write_error("oops");
        console.write_line("world");

        assert_eq!(console.stdout_lines(), vec!["hello", "world"]);
        assert_eq!(console.stderr_lines(), vec!["oops"]);
    }

    #[test]
    fn test_redirected_streams_are_never_colored() {
        assert_eq!(color_choice_for(false), ColorChoice::Never);
        assert_eq!(color_choice_for(true), ColorChoice::Auto);
    }

    #[test]
    fn test_standard_console_never_colors_with_never() {
        let console = StandardConsole::new(ColorChoice::Never);
        console.write_line("plain output");
        console.write_error("plain error");
    }
}
