use core::{
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
    error::{self, Misuse},
};

/// A container that either holds a value or holds nothing.
///
/// The state is fixed when the container is built. On the wire a present
/// value is written as `{"value": ...}` and an absent one as `{}`; when
/// reading, a `null` value is the same as a missing one.
///
/// A payload whose own JSON form is `null` (such as `()`) reads back as
/// `Absent`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Optional<T> {
    /// A value is present.
    Present(T),

    /// No value.
    Absent,
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Optional<T> {
    /// Creates a present container. Default values of `T` are still present.
    #[inline(always)]
    pub const fn some(value: T) -> Self {
        Self::Present(value)
    }

    /// Creates an absent container.
    #[inline(always)]
    pub const fn none() -> Self {
        Self::Absent
    }

    /// Indicates whether a value is present.
    #[inline(always)]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Indicates whether a value is present and matches `predicate`.
    ///
    /// The predicate is not called when the container is absent.
    #[inline]
    pub fn is_present_and(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Present(value) => predicate(value),
            Self::Absent => false,
        }
    }

    /// Indicates whether no value is present.
    #[inline(always)]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Indicates whether no value is present and `predicate` holds.
    ///
    /// The predicate is not called when a value is present.
    #[inline]
    pub fn is_absent_and(&self, predicate: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Present(_) => false,
            Self::Absent => predicate(),
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the container is absent. Use [`Optional::is_present`] or
    /// one of the `value_or*` methods when absence is expected.
    #[inline]
    #[track_caller]
    pub fn value(self) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => panic!("{}", Misuse::UnwrapAbsent),
        }
    }

    /// Returns the contained value or `fallback`.
    #[inline]
    pub fn value_or(self, fallback: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => fallback,
        }
    }

    /// Returns the contained value or computes one from `fallback`.
    ///
    /// `fallback` is only called when the container is absent.
    #[inline]
    pub fn value_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => fallback(),
        }
    }

    /// Returns the contained value or the default value of `T`.
    #[inline]
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Present(value) => value,
            Self::Absent => T::default(),
        }
    }

    /// Returns a container borrowing the value.
    #[inline(always)]
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Present(value) => Optional::Present(value),
            Self::Absent => Optional::Absent,
        }
    }

    /// Converts into a standard `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Absent,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T: Display> Display for Optional<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Present(value) => write!(f, "Some: {value}"),
            Self::Absent => f.write_str("None"),
        }
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Optional", self.is_present() as usize)?;
        if let Self::Present(value) = self {
            state.serialize_field("value", value)?;
        }
        state.end()
    }
}

/// Reads the wire object of an `Optional`. A missing or `null` value
/// decodes as absent; anything but an object is rejected.
struct OptionalVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OptionalVisitor<T> {
    type Value = Optional<T>;

    fn expecting(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("an object with an optional \"value\" key")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut value: Option<Option<T>> = None;
        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Value if value.is_some() => {
                    return Err(de::Error::duplicate_field("value"));
                }
                Field::Value => value = Some(map.next_value()?),
                Field::Error | Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(Optional::from(value.flatten()))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OptionalVisitor(PhantomData))
    }
}

impl<T> JsonCodec for Optional<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    fn from_json(bytes: &[u8]) -> error::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_state() {
        let some = Optional::some(42);
        assert!(some.is_present());
        assert!(!some.is_absent());

        let none = Optional::<i32>::none();
        assert!(none.is_absent());
        assert!(!none.is_present());

        assert_eq!(Optional::<i32>::default(), none);
        assert_ne!(some, none);
        assert_eq!(some, Optional::from(42));
        assert_ne!(some, Optional::some(1337));
    }

    #[test]
    fn test_default_payload_is_present() {
        assert!(Optional::some(0).is_present());
        assert!(Optional::some(String::new()).is_present());
        assert!(Optional::some(Vec::<u8>::new()).is_present());
    }

    #[test]
    fn test_predicates() {
        let calls = Cell::new(0);
        let is_answer = |value: &i32| {
            calls.set(calls.get() + 1);
            *value == 42
        };

        assert!(Optional::some(42).is_present_and(is_answer));
        assert!(!Optional::some(7).is_present_and(is_answer));
        assert!(!Optional::<i32>::none().is_present_and(is_answer));
        assert_eq!(calls.get(), 2);

        let calls = Cell::new(0);
        let yes = || {
            calls.set(calls.get() + 1);
            true
        };

        assert!(Optional::<i32>::none().is_absent_and(yes));
        assert!(!Optional::some(42).is_absent_and(yes));
        assert!(!Optional::<i32>::none().is_absent_and(|| false));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_value() {
        assert_eq!(Optional::some(42).value(), 42);

        let text = Optional::some(String::from("text"));
        assert_eq!(text.as_ref().value(), "text");
        assert!(text.is_present());
    }

    #[test]
    #[should_panic(expected = "can't unwrap none value")]
    fn test_value_absent() {
        Optional::<i32>::none().value();
    }

    #[test]
    fn test_fallbacks() {
        let some = Optional::some(42);
        let none = Optional::<i32>::none();

        assert_eq!(some.value_or(1337), 42);
        assert_eq!(none.value_or(1337), 1337);

        let called = Cell::new(false);
        let fallback = || {
            called.set(true);
            1337
        };
        assert_eq!(some.value_or_else(fallback), 42);
        assert!(!called.get());
        assert_eq!(none.value_or_else(fallback), 1337);
        assert!(called.get());

        assert_eq!(some.value_or_default(), 42);
        assert_eq!(none.value_or_default(), 0);
        assert_eq!(Optional::<String>::none().value_or_default(), "");
    }

    #[test]
    fn test_option_bridge() {
        assert_eq!(Optional::from(Some(42)), Optional::some(42));
        assert_eq!(Optional::<i32>::from(None), Optional::none());
        assert_eq!(Optional::some(42).into_option(), Some(42));
        assert_eq!(Option::<i32>::from(Optional::none()), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Optional::some(42).to_string(), "Some: 42");
        assert_eq!(Optional::some("text").to_string(), "Some: text");
        assert_eq!(Optional::<i32>::none().to_string(), "None");
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Optional::some(42).to_json_string().unwrap(), r#"{"value":42}"#);
        assert_eq!(Optional::<i32>::none().to_json().unwrap(), b"{}");

        let nested = Optional::some(vec![Optional::some("a"), Optional::none()]);
        assert_eq!(
            serde_json::to_value(nested).unwrap(),
            json!({ "value": [{ "value": "a" }, {}] })
        );
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            Optional::<i32>::from_json(br#"{"value":42}"#).unwrap(),
            Optional::some(42)
        );
        assert_eq!(Optional::<i32>::from_json(b"{}").unwrap(), Optional::none());
        assert_eq!(
            Optional::<i32>::from_json(br#"{"value":null}"#).unwrap(),
            Optional::none()
        );
        // Unknown keys are ignored.
        assert_eq!(
            Optional::<i32>::from_json_str(r#"{"other":1,"value":0}"#).unwrap(),
            Optional::some(0)
        );
    }

    #[test]
    #[should_panic(expected = "can't unwrap none value")]
    fn test_from_json_absent_value() {
        Optional::<i32>::from_json(b"{}").unwrap().value();
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Optional::<i32>::from_json(br#"{"value":"42"}"#),
            Err(error::WireError::Json(_))
        ));
        assert!(Optional::<i32>::from_json(b"[").is_err());
        assert!(Optional::<i32>::from_json(b"42").is_err());
        assert!(Optional::<i32>::from_json(br#"{"value":1,"value":2}"#).is_err());
    }

    #[test]
    fn test_from_json_array() {
        assert!(matches!(
            Optional::<i32>::from_json(b"[42]"),
            Err(error::WireError::Json(_))
        ));
        assert!(Optional::<i32>::from_json(b"[]").is_err());
    }

    #[test]
    fn test_round_trip() {
        for optional in [Optional::some(String::from("text")), Optional::none()] {
            let bytes = optional.to_json().unwrap();
            assert_eq!(Optional::from_json(&bytes).unwrap(), optional);
        }
    }

    #[test]
    fn test_embedded() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Record {
            id: u32,
            nickname: Optional<String>,
        }

        let record = Record {
            id: 7,
            nickname: Optional::none(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "id": 7, "nickname": {} }));
        assert_eq!(serde_json::from_value::<Record>(value).unwrap(), record);

        let value: Value = json!({ "id": 8, "nickname": { "value": "eight" } });
        let record = serde_json::from_value::<Record>(value).unwrap();
        assert_eq!(record.nickname, Optional::some(String::from("eight")));
    }
}
