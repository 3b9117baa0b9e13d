use colored::Colorize;
use std::fmt::{self, Display, Formatter};

/// The failure classes the driver distinguishes. Everything is fatal on
/// first occurrence; there is no recovery or error collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    File,
    ExternalTool,
}

#[derive(Debug, Clone)]
pub struct CompileError {
    pub kind: ErrorKind,
    message: String,
    line: Option<usize>,
    column: Option<usize>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ErrorKind::Lexical => "Lexical error",
            ErrorKind::Syntax => "Parse error",
            ErrorKind::File => "File error",
            ErrorKind::ExternalTool => "External tool error",
        };

        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(
                f,
                "{} at line {}, column {}: {}",
                label.red().bold(),
                line,
                column,
                self.message
            ),
            _ => write!(f, "{}: {}", label.red().bold(), self.message),
        }
    }
}

impl std::error::Error for CompileError {}

pub mod builders {
    use super::*;

    pub fn lexical(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::Lexical, message)
    }

    pub fn syntax(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::Syntax, message)
    }

    pub fn file(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::File, message)
    }

    pub fn external_tool(message: impl Into<String>) -> CompileError {
        CompileError::new(ErrorKind::ExternalTool, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positioned_message() {
        colored::control::set_override(false);
        let err = builders::syntax("Expected ')' after arguments").at(3, 14);
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 14: Expected ')' after arguments"
        );
    }

    #[test]
    fn test_unpositioned_message() {
        colored::control::set_override(false);
        let err = builders::file("Cannot open file: missing.peach");
        assert_eq!(err.to_string(), "File error: Cannot open file: missing.peach");
    }
}
