//! Line-oriented console prompts.
//!
//! # Responsibility
//! - Own the validate-or-retry loop around pure validators.
//! - Keep stdin/stdout behind `BufRead`/`Write` so scripted input can drive it.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

/// Console interaction failure.
#[derive(Debug)]
pub enum PromptError {
    /// Input reached end of file.
    Closed,
    Io(io::Error),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "input closed"),
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Closed => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub type PromptResult<T> = Result<T, PromptError>;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl Display) -> PromptResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Writes `prompt` without a newline and reads one line, trimmed.
    pub fn read_line(&mut self, prompt: &str) -> PromptResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Re-prompts until `parse` accepts the input, echoing each rejection.
    pub fn prompt_until<T, E, F>(&mut self, prompt: &str, parse: F) -> PromptResult<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(format_args!("\n{err}"))?,
            }
        }
    }

    /// Like `prompt_until`, but a blank line yields `None`.
    pub fn prompt_optional<T, E, F>(&mut self, prompt: &str, parse: F) -> PromptResult<Option<T>>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        self.prompt_until(prompt, |line| {
            if line.is_empty() {
                Ok(None)
            } else {
                parse(line).map(Some)
            }
        })
    }
}
