//! Blocking line-based questions for the operator

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Source of operator answers
pub trait Prompter {
    /// Ask `question` and return the trimmed answer
    ///
    /// An empty answer yields `default` if there is one, else the empty string.
    /// End of input yields `default` if there is one, else
    /// [`ScaffoldError::EndOfInput`].
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String>;

    /// Ask a `[Y/n]` question; empty means `default`
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let fallback = if default { "y" } else { "n" };
        let answer = self.ask(question, Some(fallback))?;
        Ok(is_yes(&answer))
    }
}

/// `y` or `yes`, ignoring case
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

/// Prompter reading one line per question
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter over the process's standard input and output
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        write!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read answer")?;

        if read == 0 {
            return match default {
                Some(value) => Ok(value.to_string()),
                None => Err(ScaffoldError::EndOfInput(question.trim().to_string()).into()),
            };
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// Prompter replaying canned answers, for tests
#[cfg(test)]
pub(crate) struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub questions: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            questions: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        self.questions.push(question.to_string());
        match self.answers.pop_front() {
            Some(answer) if answer.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Some(answer) => Ok(answer),
            None => match default {
                Some(value) => Ok(value.to_string()),
                None => Err(ScaffoldError::EndOfInput(question.to_string()).into()),
            },
        }
    }
}
