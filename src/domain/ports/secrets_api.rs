//! SecretsApi port - read access to organization secrets
//!
//! Only secret names are ever returned; values never leave the platform
//! through this interface.

use crate::domain::value_objects::SecretName;
use crate::error::GosmResult;

pub trait SecretsApi {
    /// List every secret name of `org`, following pagination
    fn list_secret_names(&self, org: &str) -> GosmResult<Vec<SecretName>>;
}
