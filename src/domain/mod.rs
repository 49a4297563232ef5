//! Domain Layer
//!
//! Types and interfaces for the secrets side of gosm, free of I/O.
//!
//! - `value_objects/` - Validated values (SecretName)
//! - `ports/` - Interfaces the infrastructure layer implements

pub mod ports;
pub mod value_objects;
