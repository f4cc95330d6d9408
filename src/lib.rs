//! Optional and outcome containers that can be passed, stored and sent
//! over the wire as plain values.

pub mod codec;
pub mod diagnostic;
pub mod error;
pub mod optional;
pub mod outcome;

pub use codec::JsonCodec;
pub use diagnostic::Diagnostic;
pub use error::{Misuse, WireError};
pub use optional::Optional;
pub use outcome::Outcome;
