//! Question answering for interactive workflows.
//!
//! Every question carries a stable key. An [`InteractionContext`] answers it
//! from the response store when the key is present, and otherwise falls back
//! to the configured prompting mode: terminal dialogs, plain stdio prompts,
//! or (in batch mode) the question's default.

mod prompt;
mod responses;

pub use prompt::{PromptMode, Prompted};
pub use responses::{RawResponse, Response, ResponseError, ResponseStore};

use std::io;

use anyhow::Result;

/// Per-invocation answer resolution state.
#[derive(Debug, Clone, Default)]
pub struct InteractionContext {
    responses: ResponseStore,
    mode: PromptMode,
}

impl InteractionContext {
    pub fn new(responses: ResponseStore, mode: PromptMode) -> Self {
        Self { responses, mode }
    }

    /// Pick the mode from the `--batch` and `--stdio` flags; batch wins.
    pub fn mode_from_flags(batch: bool, stdio: bool) -> PromptMode {
        if batch {
            PromptMode::NonInteractive
        } else if stdio {
            PromptMode::Stdio
        } else {
            PromptMode::Dialog
        }
    }

    /// Ask a yes/no question.
    pub fn confirm(&self, key: &str, question: &str, default: bool) -> Result<Prompted<bool>> {
        if let Some(r) = self.responses.get(key) {
            log::debug!("using stored response for {key}");
            if r.cancelled {
                return Ok(Prompted::Cancelled);
            }
            return Ok(Prompted::Answered(prompt::stored_confirmation(r)));
        }

        match self.mode {
            PromptMode::NonInteractive => {
                log::debug!("non-interactive, answering {key} with default {default}");
                Ok(Prompted::Answered(default))
            }
            PromptMode::Stdio => {
                let stdin = io::stdin();
                prompt::read_confirm(&mut stdin.lock(), &mut io::stdout(), question, default)
            }
            PromptMode::Dialog => prompt::dialog_confirm(question, default),
        }
    }

    /// Ask for a line of text.
    pub fn input(&self, key: &str, question: &str, default: &str) -> Result<Prompted<String>> {
        if let Some(r) = self.responses.get(key) {
            log::debug!("using stored response for {key}");
            return Ok(if r.cancelled {
                Prompted::Cancelled
            } else {
                Prompted::Answered(r.value.clone())
            });
        }

        match self.mode {
            PromptMode::NonInteractive => Ok(Prompted::Answered(default.to_string())),
            PromptMode::Stdio => {
                let stdin = io::stdin();
                prompt::read_input(&mut stdin.lock(), &mut io::stdout(), question, default)
            }
            PromptMode::Dialog => prompt::dialog_input(question, default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(mode: PromptMode) -> InteractionContext {
        let mut store = ResponseStore::new();
        store.set_response("yes", Response::default());
        store.set_response("no", Response::cancelled());
        store.set_response("email", Response::value("a@example.com"));
        InteractionContext::new(store, mode)
    }

    #[test]
    fn batch_wins_over_stdio() {
        assert_eq!(
            InteractionContext::mode_from_flags(true, true),
            PromptMode::NonInteractive
        );
        assert_eq!(InteractionContext::mode_from_flags(false, true), PromptMode::Stdio);
        assert_eq!(InteractionContext::mode_from_flags(false, false), PromptMode::Dialog);
    }

    #[test]
    fn stored_answers_skip_prompting() {
        // Dialog mode would need a terminal; stored keys never reach it.
        let ctx = context(PromptMode::Dialog);
        assert_eq!(ctx.confirm("yes", "?", false).unwrap(), Prompted::Answered(true));
        assert_eq!(ctx.confirm("no", "?", true).unwrap(), Prompted::Cancelled);
        assert_eq!(
            ctx.input("email", "?", "").unwrap(),
            Prompted::Answered("a@example.com".to_string())
        );
        assert_eq!(ctx.input("no", "?", "x").unwrap(), Prompted::Cancelled);
    }

    #[test]
    fn stored_false_cancels_confirmation() {
        let mut store = ResponseStore::new();
        store.load_str("q: false\n").unwrap();
        let ctx = InteractionContext::new(store, PromptMode::NonInteractive);
        assert_eq!(ctx.confirm("q", "?", true).unwrap(), Prompted::Cancelled);
    }

    #[test]
    fn stored_text_no_declines_without_cancelling() {
        let mut store = ResponseStore::new();
        store.set_response("q", Response::value("no"));
        let ctx = InteractionContext::new(store, PromptMode::NonInteractive);
        assert_eq!(ctx.confirm("q", "?", true).unwrap(), Prompted::Answered(false));
    }

    #[test]
    fn batch_mode_uses_defaults() {
        let ctx = context(PromptMode::NonInteractive);
        assert_eq!(ctx.confirm("unknown", "?", true).unwrap(), Prompted::Answered(true));
        assert_eq!(
            ctx.input("unknown", "?", "rsa").unwrap(),
            Prompted::Answered("rsa".to_string())
        );
    }
}
