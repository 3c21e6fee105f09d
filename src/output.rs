//! Console output and file writing helpers

pub mod atomic;
pub mod console;

pub use atomic::write_atomically;
pub use console::{BufferConsole, Console, StandardConsole};
