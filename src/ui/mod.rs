//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{Result, ToolError};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_failure, display_warning, safety_message, CAUTION_MESSAGE,
};

/// Default confirmation question when rewriting history.
pub const CONFIRM_PROMPT: &str = "Are you sure you want to do this (yes/no)? ";

/// Responses accepted as "yes", compared after trimming and lowercasing.
pub const AFFIRMATIVE_RESPONSES: &[&str] =
    &["yes", "y", "1", "t", "true", "go ahead", "ok", "why not?"];

/// Whether `response` counts as agreement.
pub fn is_affirmative(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    AFFIRMATIVE_RESPONSES.contains(&response.as_str())
}

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Show `prompt` and return the raw line typed in response.
    fn ask(&self, prompt: &str) -> Result<String>;
}

/// Asks on standard output and reads the answer from standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Err(ToolError::prompt("standard input closed before an answer was given"));
        }
        Ok(input)
    }
}

/// Replays canned answers in order and remembers the prompts shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ToolError::prompt("no scripted answer left"))
    }
}

/// Ask `prompt` and report whether the answer was affirmative.
pub fn confirm<P: Prompter + ?Sized>(prompter: &P, prompt: &str) -> Result<bool> {
    let answer = prompter.ask(prompt)?;
    Ok(is_affirmative(&answer))
}
