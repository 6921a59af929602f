use std::io::{self, Write};

/// Console output for command results.
///
/// Results go to stdout; logs go to stderr through `tracing`.
pub struct ConsoleHelper;

impl ConsoleHelper {
    /// Prints label/value pairs on one line.
    pub fn info(parts: impl IntoIterator<Item = impl AsRef<str>>) {
        let line: String = parts.into_iter().map(|p| p.as_ref().to_string()).collect();
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
    }

    pub fn error(message: impl AsRef<str>) {
        let _ = writeln!(io::stderr().lock(), "Error: {}", message.as_ref());
    }
}
