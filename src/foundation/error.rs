/// Convenience result type used across mdlrender.
pub type MdlResult<T> = Result<T, MdlError>;

/// Top-level error taxonomy used by the renderer.
///
/// Every variant except [`MdlError::Other`] is fatal to the whole run: analysis errors are raised
/// before any frame renders, and output errors stop the sequence at the failing frame.
#[derive(thiserror::Error, Debug)]
pub enum MdlError {
    /// Inconsistent animation directives or references in an otherwise parseable script.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The script text could not be turned into a command stream.
    #[error("parse error: {0}")]
    Parse(String),

    /// A `pop` with no matching `push`.
    #[error("transform stack underflow in frame {frame} at command #{command}: pop without matching push")]
    StackUnderflow {
        /// Frame being rendered (or analyzed) when the underflow happened.
        frame: u64,
        /// 0-based index of the offending command in the script.
        command: usize,
    },

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while persisting, assembling, or displaying images.
    #[error("output error: {0}")]
    Output(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MdlError {
    /// Build a [`MdlError::Syntax`] value.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    /// Build a [`MdlError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`MdlError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MdlError::Output`] value.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
