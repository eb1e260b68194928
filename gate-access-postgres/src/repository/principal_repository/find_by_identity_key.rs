use async_trait::async_trait;
use gate_access_db::models::principal::PrincipalModel;
use gate_access_db::repository::find_principal_by_identity_key::FindPrincipalByIdentityKey;
use crate::utils::TryFromRow;
use std::error::Error;

use super::repo_impl::PrincipalRepositoryImpl;

impl PrincipalRepositoryImpl {
    pub(super) async fn find_by_identity_key_impl(
        repo: &PrincipalRepositoryImpl,
        identity_key: &str,
    ) -> Result<Option<PrincipalModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT id, identity_key, identity_key_hash, name, email, position, access_level,
                   active, last_access, last_gate_id, last_gate_name, created_at, updated_at
            FROM principal
            WHERE identity_key = $1 AND active
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(identity_key)
        .fetch_optional(&*repo.pool)
        .await?;

        row.map(|row| PrincipalModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl FindPrincipalByIdentityKey for PrincipalRepositoryImpl {
    async fn find_by_identity_key(
        &self,
        identity_key: &str,
    ) -> Result<Option<PrincipalModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_identity_key_impl(self, identity_key).await
    }
}
