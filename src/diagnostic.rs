use core::{
    error::Error,
    fmt::{Display, Formatter},
};

use crate::error::Misuse;

/// The failure carried by a failed `Outcome`.
///
/// A diagnostic is opaque apart from its message, which is never empty.
/// Two diagnostics are equal when their messages are equal, whatever error
/// they were captured from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    /// Human-readable description of the failure.
    message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with the given message.
    ///
    /// # Panics
    ///
    /// Panics if the message is empty. Use [`Diagnostic::try_new`] when an
    /// empty message stands for "no error".
    #[inline]
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        match Self::try_new(message) {
            Some(diagnostic) => diagnostic,
            None => panic!("{}", Misuse::NilError),
        }
    }

    /// Creates a diagnostic, or `None` if the message is empty.
    #[inline]
    pub fn try_new(message: impl Into<String>) -> Option<Self> {
        let message = message.into();
        if message.is_empty() {
            None
        } else {
            Some(Self { message })
        }
    }

    /// Captures the rendered message of an error.
    ///
    /// An error that renders as an empty message is recorded under its
    /// type name.
    pub fn from_error<E: Error + ?Sized>(error: &E) -> Self {
        Self::try_new(error.to_string()).unwrap_or_else(|| Self {
            message: core::any::type_name::<E>().into(),
        })
    }

    /// Returns the message of the diagnostic.
    #[inline(always)]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Error for Diagnostic {}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&str> for Diagnostic {
    #[track_caller]
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Diagnostic {
    #[track_caller]
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Diagnostic {
    fn from(error: Box<dyn Error + Send + Sync>) -> Self {
        Self::from_error(error.as_ref())
    }
}

impl From<Diagnostic> for String {
    fn from(diagnostic: Diagnostic) -> Self {
        diagnostic.message
    }
}
