use thiserror::Error;

use crate::inline::ResolveError;
use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::program::ProgramError;

/// Any failure a compile can report, in pipeline order. The first error
/// encountered aborts the compile; no partial output is produced.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl Error {
    /// True when the error carries a source position (everything except
    /// table-level errors like a missing `main`).
    fn has_position(&self) -> bool {
        !matches!(self, Error::Program(ProgramError::General { .. }))
    }

    /// Render for the CLI: `<path>:<line>:<col>: <kind>: <message>`, or
    /// `<path>: <kind>: <message>` when no position is available.
    pub fn with_path(&self, path: &str) -> String {
        if self.has_position() {
            format!("{}:{}", path, self)
        } else {
            format!("{}: {}", path, self)
        }
    }
}
