use core::{
    error::Error,
    fmt::{Display, Formatter},
};

pub type Result<T> = core::result::Result<T, WireError>;

/// Error type for wire operations.
///
/// This error is returned by the JSON bridge of `Optional` and
/// `Outcome`. It never signals misuse of the containers themselves.
#[derive(Debug)]
pub enum WireError {
    /// The outcome wire form carried neither a value nor an error.
    MissingDiscriminator,

    /// The JSON parser or writer rejected the data.
    Json(serde_json::Error),
}

impl WireError {
    /// Indicates whether this is the missing discriminator error.
    #[inline]
    pub fn is_missing_discriminator(&self) -> bool {
        matches!(self, WireError::MissingDiscriminator)
    }
}

impl Error for WireError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WireError::MissingDiscriminator => None,
            WireError::Json(error) => Some(error),
        }
    }
}

impl Display for WireError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            WireError::MissingDiscriminator => write!(f, "no value or error parsed"),
            WireError::Json(error) => write!(f, "invalid json: {error}"),
        }
    }
}

impl From<serde_json::Error> for WireError {
    fn from(error: serde_json::Error) -> Self {
        WireError::Json(error)
    }
}

/// Misuse of a container API.
///
/// These are not returned as values: the containers panic with the
/// message of the matching variant. The `is_*` predicates let callers
/// avoid them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misuse {
    /// `value` called on an absent `Optional`.
    UnwrapAbsent,

    /// `value` called on a failed `Outcome`.
    UnwrapFail,

    /// `error` called on a successful `Outcome`.
    UnwrapOk,

    /// `fail` called with an empty diagnostic.
    NilError,
}

impl Display for Misuse {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Misuse::UnwrapAbsent => write!(f, "can't unwrap none value"),
            Misuse::UnwrapFail => write!(f, "can't unwrap value in the outcome with an error"),
            Misuse::UnwrapOk => write!(f, "can't unwrap error in the outcome with a value"),
            Misuse::NilError => write!(f, "error can't be empty"),
        }
    }
}
