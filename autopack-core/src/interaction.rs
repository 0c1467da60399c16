//! The interactive input/output boundary.
//!
//! Everything that talks to the user goes through [`Interaction`], so the
//! same flows run against a real terminal or a scripted sequence of answers.

use std::collections::VecDeque;

use crate::error::{Error, Result};

/// A line-oriented conversation with the user.
pub trait Interaction {
    /// Reads one line of input with surrounding whitespace trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] once the input stream has ended.
    fn read_line(&mut self) -> Result<String>;

    /// Writes `text` to the normal output channel, verbatim.
    fn write_out(&mut self, text: &str);

    /// Writes `text` to the error channel, verbatim.
    fn write_err(&mut self, text: &str);

    /// Shows `prompt` and reads a secret such as a password.
    ///
    /// The default implementation echoes like [`Interaction::read_line`];
    /// terminal implementations hide the typed characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] once the input stream has ended.
    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.write_out(prompt);
        self.read_line()
    }

    /// Asks a yes/no question until the answer starts with `y` or `n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] if input ends before an answer.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.write_out(prompt);
        loop {
            let answer = self.read_line()?;
            match answer.chars().next().map(|c| c.to_ascii_lowercase()) {
                Some('y') => return Ok(true),
                Some('n') => return Ok(false),
                _ => self.write_out("Invalid choice, please try again (y/n): "),
            }
        }
    }

    /// Asks for a number in `min..=max` until a valid one is entered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] if input ends before a valid choice.
    fn choose(&mut self, min: usize, max: usize) -> Result<usize> {
        loop {
            self.write_out("> ");
            let answer = self.read_line()?;
            match answer.parse::<usize>() {
                Ok(choice) if (min..=max).contains(&choice) => return Ok(choice),
                _ => self.write_out("Invalid choice, please try again\n"),
            }
        }
    }
}

/// An [`Interaction`] fed from a fixed list of answers.
///
/// Output written to either channel is captured for later inspection.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInteraction {
    answers: VecDeque<String>,
    /// Everything written to the normal channel
    pub output: String,
    /// Everything written to the error channel
    pub errors: String,
}

impl ScriptedInteraction {
    /// Creates a script that answers with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            output: String::new(),
            errors: String::new(),
        }
    }

    /// Number of answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Interaction for ScriptedInteraction {
    fn read_line(&mut self) -> Result<String> {
        self.answers
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or(Error::InputClosed)
    }

    fn write_out(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_err(&mut self, text: &str) {
        self.errors.push_str(text);
    }
}
