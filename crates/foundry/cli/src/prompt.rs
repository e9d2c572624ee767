//! Interactive confirmation

use foundry_split::{Confirmer, SplitError};

/// Asks on the terminal unless `--yes` was given. A prompt that cannot be
/// shown (no TTY) counts as declined.
pub struct PromptConfirmer {
    assume_yes: bool,
}

impl PromptConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmer for PromptConfirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool, SplitError> {
        if self.assume_yes {
            return Ok(true);
        }

        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => Ok(answer),
            Err(err) => {
                tracing::debug!(error = %err, "Confirmation prompt unavailable, treating as declined");
                Ok(false)
            }
        }
    }
}
