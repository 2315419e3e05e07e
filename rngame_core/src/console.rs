use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use log::trace;

pub const INVALID_INPUT: &str = "Invalid input, please re-enter.";

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("console io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("console input closed")]
    Closed,
}

/// Line-oriented prompting over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` without a newline and flushes.
    pub fn print(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    pub fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Reads one line with the line ending stripped.
    pub fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        trace!("read {line:?}");
        Ok(line)
    }

    /// Prints `label` and returns the trimmed reply.
    pub fn prompt(&mut self, label: &str) -> Result<String, ConsoleError> {
        self.print(label)?;
        Ok(self.read_line()?.trim().to_string())
    }

    /// Prompts until the reply parses as `T`.
    pub fn prompt_parse<T: FromStr>(&mut self, label: &str) -> Result<T, ConsoleError> {
        loop {
            match self.prompt(label)?.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(INVALID_INPUT)?,
            }
        }
    }

    /// Asks a `(Y/N)` question until answered, case-insensitively.
    pub fn prompt_yes_no(&mut self, question: &str) -> Result<bool, ConsoleError> {
        loop {
            self.say(&format!("{question} (Y/N)"))?;
            match self.prompt(">")?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say(INVALID_INPUT)?,
            }
        }
    }
}
