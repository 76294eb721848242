use std::io;

use dialoguer::Input;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Ctrl-C while the prompt was waiting for input.
    #[error("query prompt interrupted")]
    Interrupted,

    #[error("failed to read query from terminal: {0}")]
    Terminal(#[source] dialoguer::Error),

    #[error("query prompt task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Ask for the research question on the terminal. Blank answers are re-asked.
///
/// The prompt blocks, so it runs on the blocking pool and the caller's
/// runtime keeps polling for Ctrl-C.
pub async fn read_query() -> Result<String, PromptError> {
    tokio::task::spawn_blocking(prompt_blocking).await?
}

fn prompt_blocking() -> Result<String, PromptError> {
    Input::<String>::new()
        .with_prompt("Enter your search query")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("query cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(classify)
}

/// A read cut short by SIGINT surfaces from the terminal as `Interrupted`.
fn classify(error: dialoguer::Error) -> PromptError {
    match error {
        dialoguer::Error::IO(io) if io.kind() == io::ErrorKind::Interrupted => {
            PromptError::Interrupted
        }
        other => PromptError::Terminal(other),
    }
}

/// Whether `error` comes from the user interrupting the prompt.
pub fn is_interrupted(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<PromptError>(),
            Some(PromptError::Interrupted)
        )
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn interrupted_read_maps_to_interrupt() {
        let error = classify(dialoguer::Error::IO(io::Error::from(
            io::ErrorKind::Interrupted,
        )));
        assert!(matches!(error, PromptError::Interrupted));
    }

    #[test]
    fn other_read_errors_stay_terminal_failures() {
        let error = classify(dialoguer::Error::IO(io::Error::from(
            io::ErrorKind::UnexpectedEof,
        )));
        assert!(matches!(error, PromptError::Terminal(_)));
    }

    #[test]
    fn interrupt_is_found_through_context() {
        let error = Err::<(), _>(PromptError::Interrupted)
            .context("reading query")
            .unwrap_err();
        assert!(is_interrupted(&error));

        let error = anyhow::Error::new(classify(dialoguer::Error::IO(io::Error::from(
            io::ErrorKind::BrokenPipe,
        ))));
        assert!(!is_interrupted(&error));
    }
}
