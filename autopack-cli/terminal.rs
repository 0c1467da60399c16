//! The real-terminal side of the interaction boundary.

use std::io::{self, BufRead, Write};

use autopack_core::{Error, Interaction, Result};
use tracing::debug;

/// [`Interaction`] over the process's stdin, stdout and stderr.
///
/// Output is flushed after every write so prompts appear before input is
/// read. End of input is reported as [`Error::InputClosed`].
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    /// Creates a terminal interaction.
    pub fn new() -> Self {
        Self
    }
}

/// Reads one trimmed line from `input`.
///
/// End of input is [`Error::InputClosed`]; any other failure, such as bytes
/// that are not UTF-8, is an [`Error::Io`] on `<stdin>`.
fn read_trimmed_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Err(Error::InputClosed),
        Ok(_) => Ok(line.trim().to_string()),
        Err(err) => {
            debug!(error = %err, "reading stdin failed");
            Err(Error::io("<stdin>", err))
        }
    }
}

impl Interaction for Terminal {
    fn read_line(&mut self) -> Result<String> {
        let _ = io::stdout().flush();

        read_trimmed_line(&mut io::stdin().lock())
    }

    fn write_out(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn write_err(&mut self, text: &str) {
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(text.as_bytes());
        let _ = stderr.flush();
    }

    /// Reads a password without echo.
    ///
    /// Falls back to a plain line read when no terminal is attached, so
    /// answers can still be piped in.
    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        match rpassword::prompt_password(prompt) {
            Ok(secret) => Ok(secret),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(Error::InputClosed),
            Err(err) => {
                debug!(error = %err, "no terminal for hidden input, reading stdin");
                self.write_out(prompt);
                self.read_line()
            }
        }
    }
}
