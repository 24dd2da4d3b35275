// ABOUTME: Exec request parsing for the gateway.
// ABOUTME: Accepts a command string (split with POSIX quoting) or an argument list.

use super::error::{ApiError, MISSING_COMMAND};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The command as submitted, echoed back in the exec response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExecCommand {
    Line(String),
    Argv(Vec<String>),
}

impl ExecCommand {
    /// Argument vector handed to the engine.
    pub fn argv(&self) -> std::result::Result<Vec<String>, SplitError> {
        match self {
            ExecCommand::Line(line) => split_words(line),
            ExecCommand::Argv(args) => Ok(args.clone()),
        }
    }
}

/// A validated exec request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub command: ExecCommand,
    pub argv: Vec<String>,
}

impl ExecRequest {
    /// Parse and validate a raw request body.
    ///
    /// Fails with [`ApiError::InvalidRequest`] for a missing or unreadable
    /// body, a missing or null `command`, a `command` that is neither a string
    /// nor a list of strings, or a string with unbalanced quoting.
    pub fn from_body(body: &[u8]) -> std::result::Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| ApiError::InvalidRequest(MISSING_COMMAND.to_string()))?;

        let command = match value.get("command") {
            None | Some(Value::Null) => {
                return Err(ApiError::InvalidRequest(MISSING_COMMAND.to_string()));
            }
            Some(Value::String(line)) => ExecCommand::Line(line.clone()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(ExecCommand::Argv)
                .ok_or_else(invalid_command_type)?,
            Some(_) => return Err(invalid_command_type()),
        };

        let argv = command
            .argv()
            .map_err(|e| ApiError::InvalidRequest(format!("Comando inválido: {e}")))?;

        Ok(Self { command, argv })
    }
}

fn invalid_command_type() -> ApiError {
    ApiError::InvalidRequest(
        "Campo \"command\" deve ser uma string ou uma lista de strings".to_string(),
    )
}

/// Errors from splitting a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("aspas não fechadas")]
    UnterminatedQuote,

    #[error("barra invertida no fim do comando")]
    TrailingEscape,
}

/// Split a command line into words using POSIX shell quoting.
///
/// Single quotes preserve everything literally. Inside double quotes a
/// backslash escapes only `"` and `\`. Outside quotes a backslash escapes
/// the next character. No variable expansion or globbing happens.
pub fn split_words(line: &str) -> std::result::Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(SplitError::UnterminatedQuote),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\')) => current.push(ch),
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(SplitError::UnterminatedQuote),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(SplitError::UnterminatedQuote),
                    }
                }
            }
            '\\' => match chars.next() {
                Some(ch) => {
                    in_word = true;
                    current.push(ch);
                }
                None => return Err(SplitError::TrailingEscape),
            },
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}
