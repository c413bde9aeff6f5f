//! Prompt abstraction.
//!
//! Conflict menus and the registry token prompt go through `Prompter` so
//! the pipeline can run against pre-supplied answers in tests instead of a
//! real terminal.

use anyhow::{bail, Result};
use console::Term;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Prompter {
    /// Read one line of plain input.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read one line with input masked (secrets).
    fn read_secret(&mut self, prompt: &str) -> Result<String>;
}

/// Interactive terminal prompter. Refuses to prompt when stdin is not a
/// TTY rather than hanging on a pipe.
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn require_tty(&self) -> Result<()> {
        if !atty::is(atty::Stream::Stdin) {
            bail!(
                "Interactive input required but stdin is not a terminal.\n\
                 Run the bootstrapper from an interactive shell."
            );
        }
        Ok(())
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.require_tty()?;
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.require_tty()?;
        print!("{}", prompt);
        io::stdout().flush()?;

        let value = Term::stdout().read_secure_line()?;
        Ok(value.trim().to_string())
    }
}

/// Pre-supplied answers for tests. Answers are consumed in order; running
/// out of answers is an error so a test never blocks.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("Scripted prompter ran out of answers at prompt: {prompt}"),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["first", "second"]);
        assert_eq!(prompter.read_line("a: ").unwrap(), "first");
        assert_eq!(prompter.read_secret("b: ").unwrap(), "second");
    }

    #[test]
    fn test_scripted_exhaustion_is_an_error() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let err = prompter.read_line("choice: ").unwrap_err();
        assert!(err.to_string().contains("ran out of answers"));
    }
}
