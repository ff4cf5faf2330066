//! Error types for the markup engine.

/// Result alias used throughout this crate.
pub type TimResult<T> = Result<T, TimError>;

/// Every fallible path the engine can take, aggregated the way `thag_styling`
/// aggregates `ThemeError` under `StylingError`.
#[derive(Debug, thiserror::Error)]
pub enum TimError {
    /// A macro definition whose name does not start with `!`.
    #[error("macro names must start with `!`, got {0:?}")]
    InvalidMacroName(String),
    /// A cursor tag was not of the form `(y;x)`.
    #[error("cursor tags must have exactly one `;` separating two values, got {0:?}")]
    InvalidCursorTag(String),
    /// A macro was invoked but has no binding in the context.
    #[error("undefined macro {0:?}")]
    UndefinedMacro(String),
    /// A `/!name` clearer matched no macro currently in scope.
    #[error("cannot use clearer {0:?} with nothing to target")]
    DanglingMacroClearer(String),
    /// A color spec could not be parsed by the color oracle.
    #[error("invalid color spec {0:?}")]
    ColorSyntaxError(String),
    /// An SGR part could not be classified during ANSI tokenization.
    #[error("could not parse ANSI sequence: {0}")]
    AnsiParseError(String),
    /// Writing rendered output to the caller-supplied sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
