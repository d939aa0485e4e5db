//! Retry decisions taken between passes.

use anyhow::Result;
use async_trait::async_trait;
use std::io::{self, BufRead, Write};

use crate::core::config::RETRY_PROMPT;

/// Decides whether failed packages get another pass
#[async_trait]
pub trait RetryPolicy: Send {
    /// Called after a pass that left `failed` non-empty
    async fn should_retry(&mut self, failed: &[String]) -> Result<bool>;
}

/// Asks the operator on stdin; only "y" or "yes" retries
#[derive(Debug, Default)]
pub struct InteractivePrompt;

#[async_trait]
impl RetryPolicy for InteractivePrompt {
    async fn should_retry(&mut self, failed: &[String]) -> Result<bool> {
        println!("\n{}", describe_failures(failed));
        println!("{RETRY_PROMPT}");
        io::stdout().flush()?;

        let answer = tokio::task::spawn_blocking(|| read_answer(&mut io::stdin().lock())).await??;
        Ok(answer)
    }
}

/// Never retries; the first pass is the only pass
#[derive(Debug, Default)]
pub struct NeverRetry;

#[async_trait]
impl RetryPolicy for NeverRetry {
    async fn should_retry(&mut self, _failed: &[String]) -> Result<bool> {
        Ok(false)
    }
}

/// Retries up to a fixed number of extra passes without asking
#[derive(Debug)]
pub struct MaxRetries {
    remaining: usize,
}

impl MaxRetries {
    pub fn new(retries: usize) -> Self {
        Self { remaining: retries }
    }
}

#[async_trait]
impl RetryPolicy for MaxRetries {
    async fn should_retry(&mut self, _failed: &[String]) -> Result<bool> {
        if self.remaining == 0 {
            return Ok(false);
        }
        self.remaining -= 1;
        Ok(true)
    }
}

#[async_trait]
impl<F> RetryPolicy for F
where
    F: FnMut(&[String]) -> bool + Send,
{
    async fn should_retry(&mut self, failed: &[String]) -> Result<bool> {
        Ok(self(failed))
    }
}

/// Count-style message shown before the prompt
pub fn describe_failures(failed: &[String]) -> String {
    let noun = if failed.len() == 1 { "package" } else { "packages" };
    format!("{} {noun} failed: {}", failed.len(), failed.join(", "))
}

/// Reads one line and reports whether it is an affirmative answer.
/// End of input counts as "no".
pub fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(false);
    }
    Ok(is_affirmative(&input))
}

/// "y" and "yes" in any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
