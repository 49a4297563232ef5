//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod secret_name;

pub use secret_name::SecretName;
