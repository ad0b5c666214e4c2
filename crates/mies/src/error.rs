//! CLI error types.

use std::error::Error;

use mies_site::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Messages of `err` and its causes, outermost first.
///
/// A cause whose message is already part of the previous one is skipped.
pub(crate) fn error_chain(err: &dyn Error) -> Vec<String> {
    let mut messages = vec![err.to_string()];
    let mut previous = messages[0].clone();
    let mut source = err.source();

    while let Some(cause) = source {
        let message = cause.to_string();
        if !previous.contains(&message) {
            messages.push(message.clone());
        }
        previous = message;
        source = cause.source();
    }
    messages
}
