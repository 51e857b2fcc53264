use std::fmt;

/////////////////////////////////////////////// Error //////////////////////////////////////////////

/// Errors that stop a run before or while it processes input.
///
/// Configuration errors are detected before the first line is read.  Resource errors surface when
/// a required file cannot be opened or a stream cannot be read or written.
#[derive(Debug)]
pub enum Error {
    /// A required positional argument was not supplied.
    MissingArgument {
        /// The argument's placeholder name.
        name: String,
        /// How the mode is invoked.
        usage: String,
    },
    /// The requested mode does not exist.
    UnknownMode {
        /// The mode as given.
        mode: String,
    },
    /// The chunk size was not a positive integer.
    InvalidChunkSize {
        /// The chunk size as given.
        value: String,
    },
    /// The token length was not a non-negative integer.
    InvalidTokenLength {
        /// The token length as given.
        value: String,
    },
    /// The replacement count was zero.
    InvalidReplacementCount {
        /// The replacement count as given.
        value: usize,
    },
    /// The output format is not one of the supported formats.
    InvalidFormat {
        /// The format as given.
        format: String,
    },
    /// A class spec contained a character outside `u`, `l`, `d`, `s`, `b`.
    InvalidClassSpec {
        /// The spec as given.
        spec: String,
        /// The first character that names no class.
        invalid: char,
    },
    /// A file could not be opened or read.
    File {
        /// The file that failed.
        path: String,
        /// Why it failed.
        err: std::io::Error,
    },
    /// Reading input or writing output failed.
    Io(std::io::Error),
    /// Serializing a record failed.
    Json(serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path that produced it.
    pub fn file(path: impl Into<String>, err: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            err,
        }
    }

    /// Wrap a missing positional argument with the usage line for its mode.
    pub fn missing_argument(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::MissingArgument {
            name: name.into(),
            usage: usage.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingArgument { name, usage } => {
                write!(f, "Not enough arguments provided: missing {name}\nSuggestion: Invoke as {usage}")
            }
            Error::UnknownMode { mode } => {
                write!(f, "Unknown mode '{mode}'\nSuggestion: Use one of mask, match, sub, mutate, tokens, partial, remove")
            }
            Error::InvalidChunkSize { value } => {
                write!(f, "Invalid chunk size '{value}'\nSuggestion: The chunk size must be a positive integer")
            }
            Error::InvalidTokenLength { value } => {
                write!(f, "Invalid token length '{value}'\nSuggestion: The token length must be a non-negative integer")
            }
            Error::InvalidReplacementCount { value } => {
                write!(f, "Invalid replacement count {value}\nSuggestion: Make at least one replacement per item")
            }
            Error::InvalidFormat { format } => {
                write!(f, "Invalid output format '{format}'\nSuggestion: Use text or json")
            }
            Error::InvalidClassSpec { spec, invalid } => {
                write!(f, "Invalid mask characters '{spec}': '{invalid}' is not a class\nSuggestion: Mask characters can only contain 'u', 'l', 'd', 's', and 'b'")
            }
            Error::File { path, err } => write!(f, "Could not read {path}: {err}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::File { err, .. } => Some(err),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

///////////////////////////////////////////// MaskError ////////////////////////////////////////////

/// Why a line read from a mask file is not a well-formed mask.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MaskError {
    /// A sentinel that does not open a class token.
    StraySentinel {
        /// The offset of the sentinel, in code points.
        position: usize,
    },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::StraySentinel { position } => {
                write!(f, "'?' at position {position} does not start one of ?u, ?l, ?d, ?s")
            }
        }
    }
}

impl std::error::Error for MaskError {}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
