use async_trait::async_trait;

use crate::models::principal::PrincipalModel;

/// Repository trait for resolving the principal that owns a canonical identity.
///
/// Source hardware may reuse identifiers, so several principals can share an
/// identity key. Implementations return the most recently updated active one.
#[async_trait]
pub trait FindPrincipalByIdentityKey: Send + Sync {
    /// Find the authoritative principal for an identity key
    ///
    /// # Arguments
    /// * `identity_key` - The canonical decimal identity
    ///
    /// # Returns
    /// * `Ok(Some(PrincipalModel))` - The matching active principal
    /// * `Ok(None)` - If no active principal carries this key
    /// * `Err` - An error if the query could not be executed
    async fn find_by_identity_key(
        &self,
        identity_key: &str,
    ) -> Result<Option<PrincipalModel>, Box<dyn std::error::Error + Send + Sync>>;
}
