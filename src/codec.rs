use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Keys of the wire object. Anything else is read and ignored.
#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
pub(crate) enum Field {
    Value,
    Error,
    #[serde(other)]
    Other,
}

/// Trait for containers with a JSON wire form.
///
/// The wire form is an object whose keys are omitted when they do not
/// apply, so that an absent payload, a present payload and a failure are
/// each distinguishable without a tag field.
pub trait JsonCodec: Serialize + Sized {
    /// Creates an instance of `Self` from its JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid JSON for `Self` or do
    /// not carry enough information to pick a state.
    fn from_json(bytes: &[u8]) -> Result<Self>;

    /// Encodes `self` as JSON bytes.
    #[inline]
    fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encodes `self` as a JSON string.
    #[inline]
    fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Creates an instance of `Self` from a JSON string.
    #[inline]
    fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json(json.as_bytes())
    }
}
