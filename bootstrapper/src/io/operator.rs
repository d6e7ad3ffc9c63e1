//! The operator console: the only place the pipeline waits on a human.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::BootstrapError;

/// Interaction with the person running the bootstrap.
pub trait Operator {
    /// Print `banner`, then block until the operator confirms.
    fn confirm(&mut self, banner: &str) -> Result<()>;

    /// Ask a free-form question and return the trimmed answer.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Operator attached to a reader/writer pair, normally stdin/stdout.
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl ConsoleOperator<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("read operator input")?;
        if n == 0 {
            return Err(BootstrapError::InputClosed {
                prompt: prompt.trim().to_string(),
            }
            .into());
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn confirm(&mut self, banner: &str) -> Result<()> {
        write!(self.output, "{banner}").context("write banner")?;
        self.output.flush().context("flush banner")?;
        let _ = self.read_line("confirmation")?;
        debug!("operator confirmed");
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").context("write prompt")?;
        self.output.flush().context("flush prompt")?;
        let answer = self.read_line(question)?;
        debug!(answer = %answer, "operator answered");
        Ok(answer)
    }
}
