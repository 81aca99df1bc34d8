use std::collections::VecDeque;
use std::fmt;

/// Message shown before submitting a destructive form.
pub const CONFIRM_DELETE_MESSAGE: &str =
    "Are you sure you want to delete this item? This action cannot be undone.";

/// The blocking confirmation dialog a real page would get from its host.
/// Declining is a deliberate cancellation, not an error.
pub trait ConfirmPrompt: fmt::Debug {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Accepts every confirmation. The default for a fresh page.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ConfirmPrompt for AcceptAll {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Declines every confirmation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl ConfirmPrompt for DeclineAll {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}

/// Answers from a queue and records what was asked; once the queue is
/// exhausted it declines.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
