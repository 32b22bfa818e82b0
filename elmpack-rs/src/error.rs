use thiserror::Error;

/// Result type alias using ElmpackError.
pub type ElmpackResult<T> = Result<T, ElmpackError>;

/// Errors that can occur while assembling and minifying a script.
#[derive(Debug, Error)]
pub enum ElmpackError {
    /// The generated bundle is not a single self-invoking function wrapper.
    #[error("Malformed bundle shape: {0}")]
    MalformedBundleShape(String),

    /// The global object handle passed to unwrap is not a JavaScript identifier.
    #[error("Invalid global object handle: `{0}`")]
    InvalidGlobalHandle(String),

    /// The assembled script failed to parse.
    #[error("SyntaxError: {message} ({line}:{column})")]
    SyntaxError {
        message: String,
        /// 1-based line of the offending token.
        line: usize,
        /// 0-based column of the offending token.
        column: usize,
    },

    /// The assembled script uses syntax newer than the ES2015 output target.
    #[error("Unsupported syntax: {feature} is not available in ES2015 ({line}:{column})")]
    UnsupportedSyntax {
        feature: &'static str,
        /// 1-based line of the construct.
        line: usize,
        /// 0-based column of the construct.
        column: usize,
    },

    /// Code generation failed.
    #[error("Emit error: {0}")]
    Emit(String),

    /// Minifier configuration or another internal invariant failed.
    #[error("Internal error: `{0}`")]
    Internal(String),
}

impl From<std::string::FromUtf8Error> for ElmpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ElmpackError::Emit(err.to_string())
    }
}

impl From<serde_json::Error> for ElmpackError {
    fn from(err: serde_json::Error) -> Self {
        ElmpackError::Internal(err.to_string())
    }
}
