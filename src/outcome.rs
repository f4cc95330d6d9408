use core::{
    error::Error,
    fmt::{Display, Formatter},
    marker::PhantomData,
};

use serde::{
    de::{self, IgnoredAny, MapAccess, Visitor},
    ser::SerializeStruct,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
    codec::{Field, JsonCodec},
    diagnostic::Diagnostic,
    error::{self, Misuse, WireError},
};

/// A container that either holds a value or the diagnostic of a failure.
///
/// The state is fixed when the container is built. On the wire a value is
/// written as `{"value": ...}` and a failure as `{"error": "<message>"}`.
/// When reading, a non-empty `"error"` always wins over `"value"`, and an
/// empty or `null` error counts as no error.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Outcome<T> {
    /// The computation produced a value.
    Ok(T),

    /// The computation failed.
    Fail(Diagnostic),
}

impl<T> Outcome<T> {
    /// Creates a successful outcome holding `value`.
    #[inline(always)]
    pub const fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    /// Creates a failed outcome.
    ///
    /// # Panics
    ///
    /// Panics if `error` is an empty message: a failure must say what
    /// failed.
    #[inline]
    #[track_caller]
    pub fn fail(error: impl Into<Diagnostic>) -> Self {
        Self::Fail(error.into())
    }

    /// Creates an outcome from a value and an optional error, as returned by
    /// code that reports both side by side.
    ///
    /// A present, non-empty error wins and the value is dropped; an empty
    /// one counts as no error. Prefer [`Outcome::ok`] and [`Outcome::fail`]
    /// in new code.
    pub fn from_pair<M: Into<String>>(value: T, error: Option<M>) -> Self {
        match error.and_then(Diagnostic::try_new) {
            Some(diagnostic) => Self::Fail(diagnostic),
            None => Self::Ok(value),
        }
    }

    /// Indicates whether the outcome holds a value.
    #[inline(always)]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Indicates whether the outcome holds a value matching `predicate`.
    ///
    /// The predicate is not called on a failure.
    #[inline]
    pub fn is_ok_and(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Ok(value) => predicate(value),
            Self::Fail(_) => false,
        }
    }

    /// Indicates whether the outcome is a failure.
    #[inline(always)]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Indicates whether the outcome failed with a diagnostic matching
    /// `predicate`.
    ///
    /// The predicate is not called on a value.
    #[inline]
    pub fn is_fail_and(&self, predicate: impl FnOnce(&Diagnostic) -> bool) -> bool {
        match self {
            Self::Ok(_) => false,
            Self::Fail(diagnostic) => predicate(diagnostic),
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure.
    #[inline]
    #[track_caller]
    pub fn value(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Fail(_) => panic!("{}", Misuse::UnwrapFail),
        }
    }

    /// Returns the diagnostic of the failure.
    ///
    /// # Panics
    ///
    /// Panics if the outcome holds a value.
    #[inline]
    #[track_caller]
    pub fn error(self) -> Diagnostic {
        match self {
            Self::Ok(_) => panic!("{}", Misuse::UnwrapOk),
            Self::Fail(diagnostic) => diagnostic,
        }
    }

    /// Returns the contained value or `fallback`.
    #[inline]
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Fail(_) => fallback,
        }
    }

    /// Returns the contained value or computes one from `fallback`, which
    /// is only called on a failure.
    #[inline]
    pub fn value_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Fail(_) => fallback(),
        }
    }

    /// Returns the contained value or the default value of `T`.
    #[inline]
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Ok(value) => value,
            Self::Fail(_) => T::default(),
        }
    }

    /// Returns a reference to the value, if any.
    #[inline(always)]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Fail(_) => None,
        }
    }

    /// Returns a reference to the diagnostic, if any.
    #[inline(always)]
    pub const fn as_error(&self) -> Option<&Diagnostic> {
        match self {
            Self::Ok(_) => None,
            Self::Fail(diagnostic) => Some(diagnostic),
        }
    }

    /// Converts into a standard `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, Diagnostic> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Fail(diagnostic) => Err(diagnostic),
        }
    }
}

impl<T, E: Error> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Fail(Diagnostic::from_error(&error)),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Diagnostic> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T: Display> Display for Outcome<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ok(value) => write!(f, "Value: {value}"),
            Self::Fail(diagnostic) => write!(f, "Error: {diagnostic}"),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 1)?;
        match self {
            Self::Ok(value) => state.serialize_field("value", value)?,
            Self::Fail(diagnostic) => state.serialize_field("error", diagnostic.message())?,
        }
        state.end()
    }
}

/// Wire form of an `Outcome`, before a state is picked.
struct Repr<T> {
    value: Option<T>,
    error: Option<String>,
}

impl<T> Repr<T> {
    fn resolve(self) -> error::Result<Outcome<T>> {
        let diagnostic = self.error.and_then(|message| {
            let diagnostic = Diagnostic::try_new(message);
            if diagnostic.is_none() {
                tracing::trace!("ignoring empty error");
            }
            diagnostic
        });

        match (self.value, diagnostic) {
            (value, Some(diagnostic)) => {
                if value.is_some() {
                    tracing::trace!(
                        error = diagnostic.message(),
                        "error present, discarding decoded value"
                    );
                }
                Ok(Outcome::Fail(diagnostic))
            }
            (Some(value), None) => Ok(Outcome::Ok(value)),
            (None, None) => {
                tracing::debug!("outcome carried neither a value nor an error");
                Err(WireError::MissingDiscriminator)
            }
        }
    }
}

/// Reads the wire object of an `Outcome`; anything but an object is
/// rejected.
struct ReprVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ReprVisitor<T> {
    type Value = Repr<T>;

    fn expecting(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("an object with a \"value\" or an \"error\" key")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut value: Option<Option<T>> = None;
        let mut error: Option<Option<String>> = None;
        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Value if value.is_some() => {
                    return Err(de::Error::duplicate_field("value"));
                }
                Field::Value => value = Some(map.next_value()?),
                Field::Error if error.is_some() => {
                    return Err(de::Error::duplicate_field("error"));
                }
                Field::Error => error = Some(map.next_value()?),
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(Repr {
            value: value.flatten(),
            error: error.flatten(),
        })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Repr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReprVisitor(PhantomData))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Outcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Repr::<T>::deserialize(deserializer)?
            .resolve()
            .map_err(de::Error::custom)
    }
}

impl<T> JsonCodec for Outcome<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    fn from_json(bytes: &[u8]) -> error::Result<Self> {
        serde_json::from_slice::<Repr<T>>(bytes)?.resolve()
    }
}
